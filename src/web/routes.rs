//! Browser page route configuration.

use crate::state::AppState;
use crate::web::handlers::{error_page_handler, home_handler};
use axum::{Router, routing::get};

/// HTML pages.
///
/// # Endpoints
///
/// - `GET /`      - Home page with the shorten form
/// - `GET /error` - Error page shown after a redirect miss
///
/// The 404 page is installed as the top-level router fallback.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .route("/error", get(error_page_handler))
}
