//! Process-local storage backend.
//!
//! State lives only as long as the process; restarts start empty.

mod in_memory_url_repository;

pub use in_memory_url_repository::InMemoryUrlRepository;
