use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Order entity - a stored trade record
///
/// Rows are written once and never updated; they only disappear through a
/// bulk delete or a table reset.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::database::schema::orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Order {
    /// Storage-assigned ID, strictly increasing
    #[schema(example = 1)]
    pub id: i64,

    /// Ticker symbol (e.g., "KMD")
    #[schema(example = "KMD")]
    pub symbol: String,

    /// Price per unit
    #[schema(example = 12.5)]
    pub price: f64,

    /// Number of units
    #[schema(example = 10)]
    pub quantity: i64,

    /// Side of the order, usually "buy" or "sell"
    #[schema(example = "buy")]
    pub order_type: String,
}

/// New order for insertion
#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = crate::database::schema::orders)]
pub struct NewOrder {
    pub symbol: String,
    pub price: f64,
    pub quantity: i64,
    pub order_type: String,
}

impl NewOrder {
    pub fn new(
        symbol: impl Into<String>,
        price: f64,
        quantity: i64,
        order_type: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            quantity,
            order_type: order_type.into(),
        }
    }
}
