// Library Crate Root
// lib.rs

pub mod api;
pub mod config;
pub mod database;

// pub use = re-export at crate root
pub use api::{create_router, ApiError, OrdersState};
pub use config::ServerConfig;
pub use database::{open_order_repository, DatabaseError, OrderRepository};
