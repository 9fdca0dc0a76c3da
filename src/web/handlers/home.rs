//! Home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

/// Template for the home page.
///
/// Renders `templates/index.html`: a form posting to `POST /api` and showing
/// the resulting short link.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
struct HomeTemplate {
    version: &'static str,
}

/// Renders the home page.
///
/// # Endpoint
///
/// `GET /`
pub async fn home_handler() -> impl IntoResponse {
    HomeTemplate {
        version: env!("CARGO_PKG_VERSION"),
    }
}
