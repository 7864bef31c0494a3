//! Application layer services implementing business logic.
//!
//! Services consume repository and generator traits and expose the two
//! operations the transports need.
//!
//! # Available Services
//!
//! - [`services::shortener_service::ShortenerService`] - get-or-create shortening and lookup

pub mod services;
