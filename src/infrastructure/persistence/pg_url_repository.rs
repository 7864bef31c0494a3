//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::debug;

use crate::codegen;
use crate::domain::repositories::{StorageError, UrlRepository};
use crate::utils::db_error::is_unique_violation;

/// Rows read per round trip while scanning issued codes at startup.
const SCAN_BATCH: i64 = 1_000;

/// Durable URL repository over the `url` table.
///
/// Every operation is a single statement; uniqueness is enforced by the
/// table's constraints rather than by locks or transactions here.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Highest identifier encoded in any stored short code, or zero when
    /// the table is empty.
    ///
    /// Codes are decoded rather than taken from the row `id`: rows and
    /// identifiers drift apart as soon as an identifier is drawn but its
    /// insert loses a race. Scans the whole table in keyset-ordered batches
    /// of [`SCAN_BATCH`] rows, so call it once at startup.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Malformed`] if a stored code does not decode.
    pub async fn max_issued_id(&self) -> Result<u64, StorageError> {
        let mut max = 0;
        let mut after_row = 0_i32;
        let mut rows = 0_usize;

        loop {
            let batch: Vec<(i32, String)> = sqlx::query_as(
                "SELECT id, shortenurl FROM url WHERE id > $1 ORDER BY id LIMIT $2",
            )
            .bind(after_row)
            .bind(SCAN_BATCH)
            .fetch_all(self.pool.as_ref())
            .await?;

            let Some((last_row, _)) = batch.last() else {
                break;
            };
            after_row = *last_row;
            rows += batch.len();
            max = max.max(codegen::max_decoded(batch.iter().map(|(_, code)| code))?);
        }

        debug!(rows, max_id = max, "Scanned issued identifiers");
        Ok(max)
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn save_mapping(&self, full_url: &str, short_code: &str) -> Result<(), StorageError> {
        sqlx::query("INSERT INTO url (fullurl, shortenurl) VALUES ($1, $2)")
            .bind(full_url)
            .bind(short_code)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StorageError::AlreadyExists
                } else {
                    StorageError::Database(e)
                }
            })?;

        debug!(full_url, short_code, "Stored mapping");
        Ok(())
    }

    async fn find_full_url(&self, short_code: &str) -> Result<String, StorageError> {
        sqlx::query_scalar("SELECT fullurl FROM url WHERE shortenurl = $1")
            .bind(short_code)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or(StorageError::NotFound)
    }

    async fn find_short_code(&self, full_url: &str) -> Result<String, StorageError> {
        sqlx::query_scalar("SELECT shortenurl FROM url WHERE fullurl = $1")
            .bind(full_url)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or(StorageError::NotFound)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
