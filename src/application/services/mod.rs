//! Business logic services for the application layer.

pub mod shortener_service;

pub use shortener_service::{DynShortenerService, ErrorKind, ShortenerError, ShortenerService};
