//! HTTP-facing error type.
//!
//! Every handler returns [`AppError`], which renders as
//!
//! ```json
//! { "error": { "code": "not_found", "message": "...", "details": {} } }
//! ```

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::application::services::{ErrorKind, ShortenerError};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    fn parts(self) -> (StatusCode, ErrorInfo) {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        (
            status,
            ErrorInfo {
                code,
                message,
                details,
            },
        )
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.parts();
        (status, Json(ErrorBody { error })).into_response()
    }
}

/// Maps service failures onto HTTP semantics.
///
/// Only a missing mapping is the caller's problem; a lost creation race,
/// an exhausted code space and backend failures are all server errors. The
/// full error chain is logged here and kept out of the response body.
impl From<ShortenerError> for AppError {
    fn from(err: ShortenerError) -> Self {
        match err.kind() {
            ErrorKind::NotFound => AppError::not_found("Short link not found", json!({})),
            ErrorKind::AlreadyExists => {
                tracing::error!(error = %err, "Concurrent creation for the same URL");
                AppError::internal("Failed to create short link", json!({}))
            }
            ErrorKind::Overflow => {
                tracing::error!(error = %err, "Short code space exhausted");
                AppError::internal("Failed to create short link", json!({}))
            }
            ErrorKind::Backend => {
                tracing::error!(error = %err, operation = err.operation(), "Storage failure");
                AppError::internal("Storage error", json!({}))
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
        AppError::bad_request("Invalid request", json!({ "fields": fields }))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Malformed request body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::CodegenError;
    use crate::domain::repositories::StorageError;

    fn storage_failure(source: StorageError) -> ShortenerError {
        ShortenerError::Storage {
            op: "service.get_short_code",
            source,
        }
    }

    fn status_and_code(err: ShortenerError) -> (StatusCode, &'static str) {
        let (status, info) = AppError::from(err).parts();
        (status, info.code)
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("x", json!({})).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("x", json!({})).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::internal("x", json!({})).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display_is_message() {
        let err = AppError::not_found("Short link not found", json!({ "code": "abc" }));
        assert_eq!(err.to_string(), "Short link not found");
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::internal("boom", json!({})).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_missing_mapping_is_not_found() {
        let err = ShortenerError::Storage {
            op: "service.get_full_url",
            source: StorageError::NotFound,
        };

        assert_eq!(status_and_code(err), (StatusCode::NOT_FOUND, "not_found"));
    }

    #[test]
    fn test_lost_creation_race_is_internal() {
        assert_eq!(
            status_and_code(storage_failure(StorageError::AlreadyExists)),
            (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
        );
    }

    #[test]
    fn test_exhausted_code_space_is_internal() {
        let err = ShortenerError::Codegen {
            op: "service.get_short_code",
            source: CodegenError::Overflow { id: u64::MAX },
        };

        assert_eq!(
            status_and_code(err),
            (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
        );
    }

    #[test]
    fn test_backend_failures_are_internal() {
        let database = storage_failure(StorageError::Database(sqlx::Error::PoolTimedOut));
        let malformed = storage_failure(StorageError::Malformed(CodegenError::InvalidCode {
            code: "short".to_string(),
            reason: "wrong length",
        }));

        for err in [database, malformed] {
            assert_eq!(
                status_and_code(err),
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            );
        }
    }

    #[test]
    fn test_service_errors_keep_details_out_of_body() {
        let err = storage_failure(StorageError::Database(sqlx::Error::PoolTimedOut));
        let (_, info) = AppError::from(err).parts();

        assert_eq!(info.message, "Storage error");
        assert_eq!(info.details, json!({}));
    }
}
