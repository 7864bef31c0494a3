//! Get-or-create shortening and reverse lookup.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::codegen::{CodeGenerator, CodegenError};
use crate::domain::repositories::{StorageError, UrlRepository};

const GET_SHORT_CODE: &str = "service.get_short_code";
const GET_FULL_URL: &str = "service.get_full_url";

/// Coarse classification transports use to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    Overflow,
    /// Connectivity, malformed data, anything else from a backend.
    Backend,
}

/// A failure from [`ShortenerService`], tagged with the operation that hit it.
#[derive(Debug, Error)]
pub enum ShortenerError {
    #[error("{op}: {source}")]
    Storage {
        op: &'static str,
        #[source]
        source: StorageError,
    },

    #[error("{op}: {source}")]
    Codegen {
        op: &'static str,
        #[source]
        source: CodegenError,
    },
}

impl ShortenerError {
    fn storage(op: &'static str, source: StorageError) -> Self {
        Self::Storage { op, source }
    }

    fn codegen(op: &'static str, source: CodegenError) -> Self {
        Self::Codegen { op, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Storage {
                source: StorageError::NotFound,
                ..
            } => ErrorKind::NotFound,
            Self::Storage {
                source: StorageError::AlreadyExists,
                ..
            } => ErrorKind::AlreadyExists,
            Self::Storage { .. } => ErrorKind::Backend,
            Self::Codegen {
                source: CodegenError::Overflow { .. },
                ..
            } => ErrorKind::Overflow,
            Self::Codegen { .. } => ErrorKind::Backend,
        }
    }

    /// Name of the service operation that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Storage { op, .. } | Self::Codegen { op, .. } => *op,
        }
    }
}

/// Combines a storage backend with a code generator.
///
/// The service holds two explicit handles: `storage` answers lookups and
/// persists mappings, `codes` mints fresh short codes. Neither handle knows
/// about the other.
pub struct ShortenerService<R: ?Sized, G: ?Sized> {
    storage: Arc<R>,
    codes: Arc<G>,
    recover_conflicts: bool,
}

/// Service over runtime-selected backend and generator.
pub type DynShortenerService = ShortenerService<dyn UrlRepository, dyn CodeGenerator>;

impl<R, G> ShortenerService<R, G>
where
    R: UrlRepository + ?Sized,
    G: CodeGenerator + ?Sized,
{
    /// Creates a new shortener service.
    pub fn new(storage: Arc<R>, codes: Arc<G>) -> Self {
        Self {
            storage,
            codes,
            recover_conflicts: false,
        }
    }

    /// Controls what happens when two first-time requests for the same URL race.
    ///
    /// Disabled (the default), the loser's insert fails with
    /// [`ErrorKind::AlreadyExists`] and that error is returned. Enabled, the
    /// loser looks the URL up again and returns the winner's code.
    pub fn with_conflict_recovery(mut self, enabled: bool) -> Self {
        self.recover_conflicts = enabled;
        self
    }

    /// Returns the short code for `full_url`, creating the mapping on first use.
    ///
    /// An existing mapping is returned as-is and consumes no identifier.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::Overflow`] when the code space is exhausted
    /// - [`ErrorKind::AlreadyExists`] when a concurrent request created the
    ///   mapping first (unless conflict recovery is enabled)
    /// - [`ErrorKind::Backend`] on storage failures
    pub async fn get_short_code(&self, full_url: &str) -> Result<String, ShortenerError> {
        match self.storage.find_short_code(full_url).await {
            Ok(code) => return Ok(code),
            Err(StorageError::NotFound) => {}
            Err(e) => return Err(ShortenerError::storage(GET_SHORT_CODE, e)),
        }

        let code = self
            .codes
            .next_code()
            .map_err(|e| ShortenerError::codegen(GET_SHORT_CODE, e))?;

        match self.storage.save_mapping(full_url, &code).await {
            Ok(()) => {
                debug!(full_url, code = %code, "Created short code");
                Ok(code)
            }
            Err(StorageError::AlreadyExists) if self.recover_conflicts => {
                warn!(full_url, discarded = %code, "Lost creation race, returning existing code");
                self.storage
                    .find_short_code(full_url)
                    .await
                    .map_err(|e| ShortenerError::storage(GET_SHORT_CODE, e))
            }
            Err(e) => Err(ShortenerError::storage(GET_SHORT_CODE, e)),
        }
    }

    /// Resolves a short code to its full URL.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::NotFound`] if the code is unknown, [`ErrorKind::Backend`]
    /// on storage failures.
    pub async fn get_full_url(&self, short_code: &str) -> Result<String, ShortenerError> {
        self.storage
            .find_full_url(short_code)
            .await
            .map_err(|e| ShortenerError::storage(GET_FULL_URL, e))
    }

    /// Reports whether the storage backend is reachable.
    pub async fn health_check(&self) -> bool {
        self.storage.health_check().await
    }
}
