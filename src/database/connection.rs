use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use thiserror::Error;

/// Type alias for SQLite connection pool
pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Type alias for pooled connection
///
/// Returned to the pool when dropped, on both success and error paths.
pub type SqlitePooledConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Shared handle to the orders database file
#[derive(Clone)]
pub struct DatabasePool {
    pool: Arc<SqlitePool>,
}

impl DatabasePool {
    /// Wrap an existing pool instance
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Check out a connection for the duration of one storage call
    pub fn get_conn(&self) -> Result<SqlitePooledConnection, DatabaseError> {
        self.pool
            .get()
            .map_err(|e| DatabaseError::ConnectionPoolError(e.to_string()))
    }
}

/// Database-related errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    ConnectionPoolError(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Blocking storage task failed: {0}")]
    TaskFailed(String),

    #[error("Diesel error: {0}")]
    DieselError(#[from] diesel::result::Error),
}

/// Pragmas applied to every connection the pool opens
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas {
    busy_timeout_ms: u64,
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA journal_mode = WAL;",
            self.busy_timeout_ms
        ))
        .map_err(r2d2::Error::QueryError)
    }
}

/// Establish the connection pool for the orders database
///
/// # Arguments
/// * `database_url` - Path of the SQLite file (created if missing)
/// * `pool_size` - Maximum number of pooled connections
/// * `busy_timeout_ms` - How long SQLite waits on a locked database before failing
pub fn establish_connection_pool(
    database_url: &str,
    pool_size: u32,
    busy_timeout_ms: u64,
) -> Result<DatabasePool, DatabaseError> {
    tracing::info!("Establishing SQLite connection pool at {}...", database_url);

    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = r2d2::Pool::builder()
        .max_size(pool_size)
        .connection_customizer(Box::new(SqlitePragmas { busy_timeout_ms }))
        .build(manager)
        .map_err(|e| DatabaseError::ConnectionPoolError(format!("Orders pool: {}", e)))?;

    tracing::info!("Orders database pool created with max size: {}", pool_size);

    // Test connection
    let _ = pool
        .get()
        .map_err(|e| DatabaseError::ConnectionFailed(format!("Orders database: {}", e)))?;

    tracing::info!("Orders database connection successful");

    Ok(DatabasePool::new(pool))
}
