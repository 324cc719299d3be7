use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::database::models::NewOrder;
use crate::database::{DatabaseError, OrderRepository};

use super::errors::ApiError;
use super::requests::{CreateOrderRequest, PayloadRejection};
use super::responses::*;

/// Shared state for the order handlers
#[derive(Clone)]
pub struct OrdersState {
    pub repository: Arc<dyn OrderRepository>,
}

impl OrdersState {
    pub fn new(repository: Arc<dyn OrderRepository>) -> Self {
        Self { repository }
    }
}

/// Run a synchronous storage call off the async runtime
async fn run_blocking<T, F>(f: F) -> Result<T, DatabaseError>
where
    F: FnOnce() -> Result<T, DatabaseError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| DatabaseError::TaskFailed(e.to_string()))?
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339()
    }))
}

/// Create a new trade order
///
/// Stores the order verbatim; the id is assigned by storage and not returned.
#[utoipa::path(
    post,
    path = "/orders",
    tag = "Orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order created successfully", body = MessageResponse),
        (status = 400, description = "Body is not valid JSON", body = ErrorResponse),
        (status = 415, description = "Missing JSON content type", body = ErrorResponse),
        (status = 422, description = "Missing field or wrong type", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_order(
    State(state): State<OrdersState>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let request = payload
        .map_err(PayloadRejection::from)
        .and_then(|Json(request)| request.validate())
        .map_err(|e| ApiError::from(e).logged("Rejected order payload"))?;
    let new_order = NewOrder::from(request);

    let repository = state.repository.clone();
    run_blocking(move || repository.insert(new_order))
        .await
        .map_err(|e| ApiError::from(e).logged("Failed to create order"))?;

    Ok(Json(MessageResponse::new("Order created")))
}

/// Retrieve all trade orders
///
/// The order of the returned list is unspecified.
#[utoipa::path(
    get,
    path = "/orders",
    tag = "Orders",
    responses(
        (status = 200, description = "List of all trade orders", body = OrderListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_orders(
    State(state): State<OrdersState>,
) -> Result<Json<OrderListResponse>, ApiError> {
    let repository = state.repository.clone();
    let orders = run_blocking(move || repository.get_all())
        .await
        .map_err(|e| ApiError::from(e).logged("Failed to get orders"))?;

    Ok(Json(OrderListResponse { orders }))
}

/// Delete all trade orders
#[utoipa::path(
    delete,
    path = "/orders",
    tag = "Orders",
    responses(
        (status = 200, description = "All orders deleted successfully", body = MessageResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn clear_orders(
    State(state): State<OrdersState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let repository = state.repository.clone();
    let deleted = run_blocking(move || repository.delete_all())
        .await
        .map_err(|e| ApiError::from(e).logged("Failed to delete orders"))?;

    tracing::info!("Deleted {} orders", deleted);

    Ok(Json(MessageResponse::new("All orders deleted")))
}

/// Drop and recreate orders table
#[utoipa::path(
    delete,
    path = "/drop-table",
    tag = "Orders",
    responses(
        (status = 200, description = "Orders table reset", body = MessageResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn drop_table(
    State(state): State<OrdersState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let repository = state.repository.clone();
    run_blocking(move || repository.reset_table())
        .await
        .map_err(|e| ApiError::from(e).logged("Failed to reset orders table"))?;

    tracing::info!("Orders table dropped and recreated");

    Ok(Json(MessageResponse::new("Table deleted and recreated")))
}
