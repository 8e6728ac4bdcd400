//! Route definitions
//!
//! All API routes, mounted under /api/v1.

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers::{comments, health};
use crate::state::AppState;

/// Create the main API router (excluding health, which bypasses rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route("/comments", get(comments::list_comments))
        .route("/comments", post(comments::create_comment))
        .route("/comments/:comment_id", patch(comments::update_comment))
}
