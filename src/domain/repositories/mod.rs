//! Repository trait definitions for the domain layer.
//!
//! # Available Repositories
//!
//! - [`UrlRepository`] - bidirectional full URL <-> short code mapping
//!
//! # Implementations
//!
//! - [`crate::infrastructure::memory::InMemoryUrlRepository`] - volatile, process-local
//! - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL
//!
//! Both must behave identically for the same sequence of calls; see
//! `tests/repository_parity.rs`.

pub mod url_repository;

pub use url_repository::{StorageError, UrlRepository};

#[cfg(test)]
pub use url_repository::MockUrlRepository;
