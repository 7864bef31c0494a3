//! API route configuration.

use crate::api::handlers::{health_handler, redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes. None require authentication.
///
/// # Endpoints
///
/// - `POST /`        - Get or create the short code for a URL
/// - `GET  /health`  - Storage health check
/// - `GET  /{code}`  - Redirect to the full URL
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(shorten_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
}
