//! In-memory implementation of the URL repository.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::repositories::{StorageError, UrlRepository};

#[derive(Debug, Default)]
struct Maps {
    by_full_url: HashMap<String, String>,
    by_short_code: HashMap<String, String>,
}

/// Volatile URL repository backed by two hash maps.
///
/// One reader/writer lock guards both maps so an insert updates them as a
/// single step. Lookups take the shared lock; [`UrlRepository::save_mapping`]
/// takes the exclusive lock for its check-then-insert.
#[derive(Debug, Default)]
pub struct InMemoryUrlRepository {
    maps: RwLock<Maps>,
}

impl InMemoryUrlRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        debug!("Using in-memory URL storage");
        Self::default()
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.read().by_full_url.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic cannot leave the maps half-written (see `save_mapping`), so a
    // poisoned lock still guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, Maps> {
        self.maps.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Maps> {
        self.maps.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn save_mapping(&self, full_url: &str, short_code: &str) -> Result<(), StorageError> {
        let mut maps = self.write();

        if maps.by_full_url.contains_key(full_url) || maps.by_short_code.contains_key(short_code) {
            return Err(StorageError::AlreadyExists);
        }

        maps.by_full_url
            .insert(full_url.to_string(), short_code.to_string());
        maps.by_short_code
            .insert(short_code.to_string(), full_url.to_string());

        debug!(full_url, short_code, "Stored mapping");
        Ok(())
    }

    async fn find_full_url(&self, short_code: &str) -> Result<String, StorageError> {
        self.read()
            .by_short_code
            .get(short_code)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn find_short_code(&self, full_url: &str) -> Result<String, StorageError> {
        self.read()
            .by_full_url
            .get(full_url)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
