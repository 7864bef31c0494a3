//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//! The schema lives in `migrations/` and is applied at startup.
//!
//! # Repositories
//!
//! - [`PgUrlRepository`] - URL mapping storage and retrieval

pub mod pg_url_repository;

pub use pg_url_repository::PgUrlRepository;
