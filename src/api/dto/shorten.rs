//! DTOs for the shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::utils::url_check::has_control_chars;

/// Request to shorten a URL.
///
/// ```json
/// { "URL": "https://example.com/some/long/path" }
/// ```
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[serde(rename = "URL")]
    #[validate(url(message = "Invalid URL format"))]
    #[validate(custom(function = "reject_control_chars"))]
    pub url: String,
}

fn reject_control_chars(url: &str) -> Result<(), ValidationError> {
    if has_control_chars(url) {
        return Err(ValidationError::new("control_characters")
            .with_message("URL must not contain control characters".into()));
    }
    Ok(())
}

/// Short code assigned to the requested URL.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    #[serde(rename = "shortenURL")]
    pub shorten_url: String,
}
