//! Gateway server setup

mod handler;
mod state;

pub use handler::gateway_handler;
pub use state::GatewayState;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use comment_cache::{Subscriber, SubscriberConfig};
use comment_common::{AppConfig, AppError};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Create the gateway router
pub fn create_router() -> Router<GatewayState> {
    Router::new()
        .route("/gateway", get(gateway_handler))
        .route("/health", get(health_check))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Build the complete application
pub fn create_app(state: GatewayState) -> Router {
    create_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize dependencies and create `GatewayState`
pub fn create_gateway_state(config: &AppConfig) -> GatewayState {
    let subscriber = Subscriber::spawn(SubscriberConfig {
        redis_url: config.redis.url.clone(),
        ..SubscriberConfig::default()
    });

    GatewayState::new(Arc::new(subscriber))
}

/// Run the gateway server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.gateway.port));

    let state = create_gateway_state(&config);
    let app = create_app(state);

    info!("Starting gateway on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Gateway listening on ws://{}/gateway", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}
