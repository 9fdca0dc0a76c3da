//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{MappingService, RedirectResolver};
use crate::config::Config;
use crate::domain::repositories::UrlRepository;

#[derive(Clone)]
pub struct AppState {
    pub mapping_service: Arc<MappingService>,
    pub redirect_resolver: Arc<RedirectResolver>,
    pub repository: Arc<dyn UrlRepository>,
}

impl AppState {
    /// Wires the services around a single store client.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        validate_short_codes: bool,
        list_max_limit: u64,
        error_page_path: impl Into<String>,
    ) -> Self {
        let mapping_service = Arc::new(MappingService::new(
            repository.clone(),
            validate_short_codes,
            list_max_limit,
        ));
        let redirect_resolver = Arc::new(RedirectResolver::new(
            mapping_service.clone(),
            error_page_path,
        ));

        Self {
            mapping_service,
            redirect_resolver,
            repository,
        }
    }

    pub fn from_config(repository: Arc<dyn UrlRepository>, config: &Config) -> Self {
        Self::new(
            repository,
            config.validate_short_codes,
            config.list_max_limit,
            config.error_page_path.clone(),
        )
    }
}
