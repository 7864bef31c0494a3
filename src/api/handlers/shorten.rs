//! Handler for the shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the short code for a URL, creating it on first use.
///
/// # Endpoint
///
/// `POST /`
///
/// # Request Body
///
/// ```json
/// { "URL": "https://example.com" }
/// ```
///
/// # Response
///
/// ```json
/// { "shortenURL": "qqqqqqqqqw" }
/// ```
///
/// Repeating the request with the same URL returns the same code.
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed body or an invalid URL, and
/// 500 Internal Server Error for any service failure.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let shorten_url = state.shortener.get_short_code(&payload.url).await?;

    Ok(Json(ShortenResponse { shorten_url }))
}
