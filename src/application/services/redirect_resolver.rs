//! Short code to redirect target resolution.

use std::sync::Arc;

use crate::application::services::MappingService;
use crate::domain::filter::MatchType;
use crate::error::AppError;

/// `controller` value reported to the error page for unknown codes.
pub const INVALID_SHORT_URL_CONTROLLER: &str = "jump.invalid_short_url";

/// Where a visitor presenting a short code should be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectTarget {
    /// The code is mapped; redirect to its long URL.
    Destination(String),
    /// The code is unknown; redirect to the error page, which carries the code.
    ErrorPage(String),
}

impl RedirectTarget {
    pub fn location(&self) -> &str {
        match self {
            RedirectTarget::Destination(url) | RedirectTarget::ErrorPage(url) => url,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, RedirectTarget::Destination(_))
    }
}

pub struct RedirectResolver {
    mapping_service: Arc<MappingService>,
    error_page: String,
}

impl RedirectResolver {
    /// Creates a resolver that sends misses to `error_page` (a site-relative path).
    pub fn new(mapping_service: Arc<MappingService>, error_page: impl Into<String>) -> Self {
        Self {
            mapping_service,
            error_page: error_page.into(),
        }
    }

    /// Resolves `short_code` to its redirect target.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageFailure`] on database errors.
    pub async fn resolve(&self, short_code: &str) -> Result<RedirectTarget, AppError> {
        match self
            .mapping_service
            .lookup(MatchType::Short, short_code)
            .await?
        {
            Some(record) => Ok(RedirectTarget::Destination(record.long_url)),
            None => {
                tracing::debug!(short_code, "Unknown short code");
                Ok(RedirectTarget::ErrorPage(self.error_location(short_code)))
            }
        }
    }

    /// Builds `<error_page>?controller=jump.invalid_short_url&short_url=<code>`.
    pub fn error_location(&self, short_code: &str) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("controller", INVALID_SHORT_URL_CONTROLLER)
            .append_pair("short_url", short_code)
            .finish();

        format!("{}?{}", self.error_page, query)
    }
}
