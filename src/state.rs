//! Shared application state for request handlers.

use std::sync::Arc;

use crate::application::services::DynShortenerService;

/// State injected into every handler.
///
/// The service is type-erased so the storage backend can be picked at
/// startup without making the router generic.
#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<DynShortenerService>,
}

impl AppState {
    pub fn new(shortener: Arc<DynShortenerService>) -> Self {
        Self { shortener }
    }
}
