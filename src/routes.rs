//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /`        - Get or create a short code
//! - `GET  /{code}`  - Short link redirect
//! - `GET  /health`  - Storage health check
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Timeout** - Requests running longer than the configured limit get `408`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::http::StatusCode;
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::timeout::TimeoutLayer;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `timeout` - upper bound on the time spent serving a single request
pub fn app_router(state: AppState, timeout: Duration) -> NormalizePath<Router> {
    let router = api::routes::routes()
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
