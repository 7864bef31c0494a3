//! Repository trait for URL mappings.

use async_trait::async_trait;
use thiserror::Error;

use crate::codegen::CodegenError;

/// Storage failures shared by every backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No mapping exists for the requested key.
    #[error("URL not found")]
    NotFound,

    /// The full URL already has a short code, or the short code is taken.
    #[error("URL already exists")]
    AlreadyExists,

    /// Connectivity or data problems in the backing store.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored short code could not be decoded back to its identifier.
    #[error("malformed stored short code: {0}")]
    Malformed(#[from] CodegenError),
}

/// Uniqueness-enforcing mapping between full URLs and short codes.
///
/// Mappings are immutable: there is no update or delete.
///
/// # Implementations
///
/// - [`crate::infrastructure::memory::InMemoryUrlRepository`]
/// - [`crate::infrastructure::persistence::PgUrlRepository`]
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Stores a new mapping.
    ///
    /// The existence check and the insert are a single atomic step.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::AlreadyExists`] if `full_url` or `short_code`
    /// is already part of a mapping.
    /// Returns [`StorageError::Database`] on backend failures.
    async fn save_mapping(&self, full_url: &str, short_code: &str) -> Result<(), StorageError>;

    /// Looks up the full URL behind a short code.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if no mapping has `short_code`.
    async fn find_full_url(&self, short_code: &str) -> Result<String, StorageError>;

    /// Looks up the short code assigned to a full URL.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if no mapping has `full_url`.
    async fn find_short_code(&self, full_url: &str) -> Result<String, StorageError>;

    /// Returns `true` when the backend can serve requests.
    async fn health_check(&self) -> bool;
}
