/// Database module for the SQLite-backed orders store
///
/// This module provides:
/// - Connection pooling over a single SQLite file
/// - The order repository used by the API handlers
/// - Table creation and reset
/// - Diesel ORM integration

pub mod connection;
pub mod initializer;
pub mod models;
pub mod repositories;
pub mod schema;

use std::sync::Arc;

pub use connection::{establish_connection_pool, DatabaseError, DatabasePool};
pub use repositories::{OrderRepository, OrderRepositoryImpl};

/// Open the orders database and make sure the table exists
pub fn open_order_repository(
    database_url: &str,
    pool_size: u32,
    busy_timeout_ms: u64,
) -> Result<Arc<dyn OrderRepository>, DatabaseError> {
    let pool = establish_connection_pool(database_url, pool_size, busy_timeout_ms)?;

    let repository = OrderRepositoryImpl::new(move || pool.get_conn());
    repository.create_table()?;

    tracing::info!("Orders table ready");

    Ok(Arc::new(repository))
}
