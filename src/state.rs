//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::UrlService;
use crate::domain::repositories::UrlRepository;

/// Handler state. Cheap to clone; the service is shared behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService<dyn UrlRepository>>,
}

impl AppState {
    /// Wraps `repository` in a [`UrlService`] that builds short URLs from `base_url`.
    pub fn new(repository: Arc<dyn UrlRepository>, base_url: impl Into<String>) -> Self {
        Self {
            url_service: Arc::new(UrlService::new(repository, base_url)),
        }
    }
}
