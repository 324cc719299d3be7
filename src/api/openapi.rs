use utoipa::OpenApi;

use crate::api::handlers;
use crate::api::requests::CreateOrderRequest;
use crate::api::responses::*;
use crate::database::models::Order;

/// OpenAPI specification
#[derive(OpenApi)]
#[openapi(
    info(
        title = "BlockHouseTask API",
        version = "1.0.0",
        description = "This API allows users to manage trade orders, including creation, retrieval, and deletion.",
        contact(
            name = "Kyle Dsouza",
            email = "kyle.dsouza.official@gmail.com"
        )
    ),
    paths(
        handlers::health_check,
        handlers::create_order,
        handlers::get_orders,
        handlers::clear_orders,
        handlers::drop_table,
    ),
    components(
        schemas(
            Order,
            CreateOrderRequest,
            MessageResponse,
            OrderListResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Orders", description = "Trade order management endpoints"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_order_routes() {
        let doc = ApiDoc::openapi();

        assert_eq!(doc.info.title, "BlockHouseTask API");
        let contact = doc.info.contact.expect("contact info");
        assert_eq!(contact.name.as_deref(), Some("Kyle Dsouza"));
        assert_eq!(contact.email.as_deref(), Some("kyle.dsouza.official@gmail.com"));
        assert!(doc.paths.paths.contains_key("/orders"));
        assert!(doc.paths.paths.contains_key("/drop-table"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
