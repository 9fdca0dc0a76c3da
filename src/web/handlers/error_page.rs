//! Error page handler, the redirect target for unknown short codes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::Query, response::IntoResponse};
use serde::Deserialize;

use crate::application::services::redirect_resolver::INVALID_SHORT_URL_CONTROLLER;

#[derive(Debug, Default, Deserialize)]
pub struct ErrorPageParams {
    #[serde(default)]
    pub controller: Option<String>,
    #[serde(default)]
    pub short_url: Option<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
struct ErrorTemplate {
    title: &'static str,
    description: String,
    short_url: Option<String>,
}

/// Renders the error page.
///
/// # Endpoint
///
/// `GET /error?controller={controller}&short_url={code}`
///
/// Unknown parameters are ignored; the page always renders.
pub async fn error_page_handler(Query(params): Query<ErrorPageParams>) -> impl IntoResponse {
    let (title, description) = describe(params.controller.as_deref(), params.short_url.as_deref());

    ErrorTemplate {
        title,
        description,
        short_url: params.short_url.filter(|code| !code.is_empty()),
    }
}

fn describe(controller: Option<&str>, short_url: Option<&str>) -> (&'static str, String) {
    match (controller, short_url) {
        (Some(INVALID_SHORT_URL_CONTROLLER), Some(code)) if !code.is_empty() => (
            "Short link not found",
            format!("The short link \"{code}\" does not exist or has been removed."),
        ),
        (Some(INVALID_SHORT_URL_CONTROLLER), _) => (
            "Short link not found",
            "No short link was given.".to_string(),
        ),
        _ => (
            "Something went wrong",
            "The request could not be completed.".to_string(),
        ),
    }
}
