use orders_api::{create_router, open_order_repository, OrdersState, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file (if present)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orders_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    tracing::info!("🗄️  Opening orders database at {}...", config.database_url);

    let repository = match open_order_repository(
        &config.database_url,
        config.pool_max_size,
        config.busy_timeout_ms,
    ) {
        Ok(repository) => repository,
        Err(e) => {
            tracing::error!("❌ Failed to open orders database: {}", e);
            std::process::exit(1);
        }
    };

    let app = create_router(OrdersState::new(repository));

    let addr = config.bind_address();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("❌ Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("🚀 Orders API server running on http://{}", addr);
    tracing::info!("📊 Health check: http://{}/health", addr);
    tracing::info!("📚 Swagger UI: http://{}/swagger-ui", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("❌ Server error: {}", e);
        std::process::exit(1);
    }
}
