//! Research-data collection service for user-study sessions.
//!
//! Accepts task-trial metrics and SUS survey submissions over HTTP, appends
//! each one as a row in a flat CSV file, and serves the accumulated rows
//! back as JSON.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

pub mod codec;
pub mod config;
pub mod records;
pub mod routes;
pub mod store;

/// Builds the application router. Middleware that depends on environment
/// configuration (timeouts, body limits, tracing) is layered on in `main`.
pub fn app(state: config::AppState) -> Router {
    let api = Router::new()
        .route("/metrics", get(routes::get_metrics))
        .route("/sus", get(routes::get_sus))
        // The study dashboard is served from another origin.
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/status/ping", get(routes::get_status_ping))
        .route("/metrics", post(routes::post_metrics))
        // Legacy endpoint kept for older app builds; identical behavior.
        .route("/log", post(routes::post_metrics))
        .route("/sessions/start", post(routes::post_session_start))
        .route("/sus", post(routes::post_sus))
        .nest("/api", api)
        .with_state(state)
}
