//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use tracing::{debug, error};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its full URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Answers `302 Found` with the full URL in `Location`.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist, and 500 if the
/// stored URL cannot be carried in a `Location` header.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let full_url = state.shortener.get_full_url(&code).await?;

    let location = HeaderValue::try_from(full_url.as_str()).map_err(|e| {
        error!(code = %code, error = %e, "Stored URL is not a valid Location header");
        AppError::internal("Stored URL cannot be redirected to", json!({}))
    })?;

    debug!(code = %code, full_url = %full_url, "Redirecting");
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}
