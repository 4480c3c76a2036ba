//! Router configuration for the web server.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;

/// Largest request body accepted, matching the serverless platform's payload cap.
pub const MAX_BODY_BYTES: usize = 6 * 1024 * 1024;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            post(handlers::generate_report).options(handlers::preflight),
        )
        // Path the front-end has always called
        .route(
            "/generate-report",
            post(handlers::generate_report).options(handlers::preflight),
        )
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
