use crate::database::connection::{DatabaseError, SqlitePooledConnection};
use crate::database::initializer::{create_orders_table, drop_orders_table};
use crate::database::models::{NewOrder, Order};
use crate::database::schema::orders;
use diesel::prelude::*;
use std::sync::Arc;

/// Order repository trait - every storage operation the API needs
///
/// Each call checks out its own connection and returns it before the call
/// ends, so implementations hold no per-request state.
pub trait OrderRepository: Send + Sync {
    /// Create the orders table if absent
    fn create_table(&self) -> Result<(), DatabaseError>;

    /// Insert a new order; the id is assigned by storage
    fn insert(&self, new_order: NewOrder) -> Result<usize, DatabaseError>;

    /// Get all orders. Order of the result is unspecified.
    fn get_all(&self) -> Result<Vec<Order>, DatabaseError>;

    /// Delete every order, keeping the table
    fn delete_all(&self) -> Result<usize, DatabaseError>;

    /// Drop the table and recreate it empty
    fn reset_table(&self) -> Result<(), DatabaseError>;
}

/// Concrete implementation of OrderRepository backed by SQLite
pub struct OrderRepositoryImpl {
    get_conn: Arc<dyn Fn() -> Result<SqlitePooledConnection, DatabaseError> + Send + Sync>,
}

impl OrderRepositoryImpl {
    /// Create new order repository with connection provider
    pub fn new<F>(get_conn: F) -> Self
    where
        F: Fn() -> Result<SqlitePooledConnection, DatabaseError> + Send + Sync + 'static,
    {
        Self {
            get_conn: Arc::new(get_conn),
        }
    }
}

impl OrderRepository for OrderRepositoryImpl {
    fn create_table(&self) -> Result<(), DatabaseError> {
        let mut conn = (self.get_conn)()?;

        create_orders_table(&mut conn).map_err(DatabaseError::from)
    }

    fn insert(&self, new_order: NewOrder) -> Result<usize, DatabaseError> {
        let mut conn = (self.get_conn)()?;

        diesel::insert_into(orders::table)
            .values(&new_order)
            .execute(&mut conn)
            .map_err(DatabaseError::from)
    }

    fn get_all(&self) -> Result<Vec<Order>, DatabaseError> {
        let mut conn = (self.get_conn)()?;

        orders::table
            .select(Order::as_select())
            .load::<Order>(&mut conn)
            .map_err(DatabaseError::from)
    }

    fn delete_all(&self) -> Result<usize, DatabaseError> {
        let mut conn = (self.get_conn)()?;

        diesel::delete(orders::table)
            .execute(&mut conn)
            .map_err(DatabaseError::from)
    }

    fn reset_table(&self) -> Result<(), DatabaseError> {
        let mut conn = (self.get_conn)()?;

        // Take the write lock up front so concurrent requests never see the
        // table between DROP and CREATE
        conn.immediate_transaction::<_, DatabaseError, _>(|conn| {
            drop_orders_table(conn)?;
            create_orders_table(conn)?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::establish_connection_pool;
    use tempfile::TempDir;

    fn repository(temp_dir: &TempDir) -> OrderRepositoryImpl {
        let path = temp_dir.path().join("orders.db");
        let pool = establish_connection_pool(path.to_str().unwrap(), 4, 5000).unwrap();
        let repo = OrderRepositoryImpl::new(move || pool.get_conn());
        repo.create_table().unwrap();
        repo
    }

    fn ids(repo: &OrderRepositoryImpl) -> Vec<i64> {
        let mut ids: Vec<i64> = repo.get_all().unwrap().into_iter().map(|o| o.id).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn test_insert_and_get_all() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir);

        assert_eq!(repo.insert(NewOrder::new("KMD", 12.5, 10, "buy")).unwrap(), 1);

        let orders = repo.get_all().unwrap();
        assert_eq!(
            orders,
            vec![Order {
                id: 1,
                symbol: "KMD".to_string(),
                price: 12.5,
                quantity: 10,
                order_type: "buy".to_string(),
            }]
        );
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir);

        for i in 0..5 {
            repo.insert(NewOrder::new("AAPL", 100.0 + i as f64, i, "sell"))
                .unwrap();
        }

        assert_eq!(ids(&repo), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_delete_all_keeps_table_and_counter() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir);

        repo.insert(NewOrder::new("KMD", 1.0, 1, "buy")).unwrap();
        repo.insert(NewOrder::new("KMD", 2.0, 2, "buy")).unwrap();

        assert_eq!(repo.delete_all().unwrap(), 2);
        assert!(repo.get_all().unwrap().is_empty());

        // AUTOINCREMENT never hands out an id twice
        repo.insert(NewOrder::new("KMD", 3.0, 3, "sell")).unwrap();
        assert_eq!(ids(&repo), vec![3]);
    }

    #[test]
    fn test_delete_all_on_empty_table() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir);

        assert_eq!(repo.delete_all().unwrap(), 0);
    }

    #[test]
    fn test_reset_table_recreates_empty_table() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir);

        repo.insert(NewOrder::new("KMD", 1.0, 1, "buy")).unwrap();
        repo.insert(NewOrder::new("KMD", 2.0, 2, "buy")).unwrap();

        repo.reset_table().unwrap();
        assert!(repo.get_all().unwrap().is_empty());

        repo.insert(NewOrder::new("BTC", 3.0, 3, "sell")).unwrap();
        let orders = repo.get_all().unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].symbol, "BTC");
    }

    #[test]
    fn test_get_all_without_table_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("orders.db");
        let pool = establish_connection_pool(path.to_str().unwrap(), 1, 1000).unwrap();
        let repo = OrderRepositoryImpl::new(move || pool.get_conn());

        assert!(matches!(
            repo.get_all(),
            Err(DatabaseError::DieselError(_))
        ));
    }
}
