use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::*;
use super::openapi::ApiDoc;

/// Create the API router with Swagger UI
pub fn create_router(state: OrdersState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Order endpoints
        .route(
            "/orders",
            post(create_order).get(get_orders).delete(clear_orders),
        )
        .route("/drop-table", delete(drop_table))
        .with_state(state)
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}
