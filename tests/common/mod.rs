#![allow(dead_code)]

use async_trait::async_trait;
use seq_shortener::application::services::{DynShortenerService, ShortenerService};
use seq_shortener::codegen::{CodeGenerator, IdSource, SequentialCodeGenerator};
use seq_shortener::domain::repositories::{StorageError, UrlRepository};
use seq_shortener::infrastructure::memory::InMemoryUrlRepository;
use seq_shortener::infrastructure::persistence::PgUrlRepository;
use seq_shortener::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;

/// Backend whose every call fails as if the database were gone.
pub struct UnreachableRepository;

#[async_trait]
impl UrlRepository for UnreachableRepository {
    async fn save_mapping(&self, _full_url: &str, _short_code: &str) -> Result<(), StorageError> {
        Err(StorageError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find_full_url(&self, _short_code: &str) -> Result<String, StorageError> {
        Err(StorageError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find_short_code(&self, _full_url: &str) -> Result<String, StorageError> {
        Err(StorageError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

pub fn create_service(storage: Arc<dyn UrlRepository>, first_id: u64) -> DynShortenerService {
    let codes: Arc<dyn CodeGenerator> =
        Arc::new(SequentialCodeGenerator::new(Arc::new(IdSource::new(first_id))));
    ShortenerService::new(storage, codes)
}

pub fn create_test_state() -> AppState {
    create_state_with(Arc::new(InMemoryUrlRepository::new()))
}

pub fn create_state_with(storage: Arc<dyn UrlRepository>) -> AppState {
    AppState::new(Arc::new(create_service(storage, 0)))
}

pub fn create_pg_repository(pool: PgPool) -> PgUrlRepository {
    PgUrlRepository::new(Arc::new(pool))
}

pub async fn insert_mapping(pool: &PgPool, full_url: &str, short_code: &str) {
    sqlx::query("INSERT INTO url (fullurl, shortenurl) VALUES ($1, $2)")
        .bind(full_url)
        .bind(short_code)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn count_rows(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM url")
        .fetch_one(pool)
        .await
        .unwrap()
}
