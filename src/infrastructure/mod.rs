//! Infrastructure layer for storage backends.
//!
//! This layer implements the storage contract defined by the domain layer.
//!
//! # Modules
//!
//! - [`memory`] - Volatile, process-local backend
//! - [`persistence`] - PostgreSQL backend

pub mod memory;
pub mod persistence;
