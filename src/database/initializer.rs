//! Schema creation and teardown for the `orders` table
//!
//! The table is created with raw DDL rather than `diesel::table!` metadata so
//! that `AUTOINCREMENT` is kept: ids are never reused, even after every row
//! has been deleted.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

const CREATE_ORDERS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS orders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        symbol TEXT NOT NULL,
        price FLOAT NOT NULL,
        quantity INTEGER NOT NULL,
        order_type TEXT NOT NULL
    )";

const DROP_ORDERS_TABLE: &str = "DROP TABLE IF EXISTS orders";

/// Create the `orders` table if it does not exist yet. Idempotent.
pub fn create_orders_table(conn: &mut SqliteConnection) -> QueryResult<()> {
    diesel::sql_query(CREATE_ORDERS_TABLE).execute(conn)?;
    Ok(())
}

/// Drop the `orders` table and every row in it.
pub fn drop_orders_table(conn: &mut SqliteConnection) -> QueryResult<()> {
    diesel::sql_query(DROP_ORDERS_TABLE).execute(conn)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::sql_types::{BigInt, Text};

    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct Count {
        #[diesel(sql_type = BigInt)]
        count: i64,
    }

    fn table_names(conn: &mut SqliteConnection) -> Vec<String> {
        diesel::sql_query("SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'orders'")
            .load::<TableName>(conn)
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect()
    }

    #[test]
    fn test_create_is_idempotent() {
        let mut conn = SqliteConnection::establish(":memory:").unwrap();

        create_orders_table(&mut conn).unwrap();
        diesel::sql_query(
            "INSERT INTO orders (symbol, price, quantity, order_type) VALUES ('KMD', 1.0, 1, 'buy')",
        )
        .execute(&mut conn)
        .unwrap();
        create_orders_table(&mut conn).unwrap();

        let count = diesel::sql_query("SELECT COUNT(*) AS count FROM orders")
            .get_result::<Count>(&mut conn)
            .unwrap();
        assert_eq!(count.count, 1);
    }

    #[test]
    fn test_drop_removes_table() {
        let mut conn = SqliteConnection::establish(":memory:").unwrap();

        create_orders_table(&mut conn).unwrap();
        assert_eq!(table_names(&mut conn), vec!["orders".to_string()]);

        drop_orders_table(&mut conn).unwrap();
        assert!(table_names(&mut conn).is_empty());

        // Dropping an absent table is not an error
        assert!(drop_orders_table(&mut conn).is_ok());
    }
}
