use anyhow::Context;
use coupon_service::config::AppConfig;
use coupon_service::coupon::AppState;
use coupon_service::logger::init_logger;
use coupon_service::router::create_app_router;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    init_logger(&config.log_level);

    // Initialize application state
    let state = Arc::new(AppState::new());

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    // Configure the server address
    let addr = config.socket_addr()?;
    tracing::info!("Server running on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
