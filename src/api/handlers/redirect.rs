//! Handlers for short code redirects.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Query of `GET /api/jump`.
#[derive(Debug, Deserialize)]
pub struct JumpParams {
    #[serde(default)]
    pub short_url: String,
}

/// Redirects a short code to its long URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Response
///
/// - **302 Found** to the long URL when the code is known
/// - **302 Found** to the error page, carrying the code, when it is not
///
/// # Errors
///
/// Returns 500 if the store cannot be queried.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    resolve_and_redirect(&state, &code).await
}

/// Same as [`redirect_handler`], with the code in the query string.
///
/// # Endpoint
///
/// `GET /api/jump?short_url={code}`
pub async fn jump_handler(
    State(state): State<AppState>,
    Query(params): Query<JumpParams>,
) -> Result<Response, AppError> {
    resolve_and_redirect(&state, &params.short_url).await
}

async fn resolve_and_redirect(state: &AppState, code: &str) -> Result<Response, AppError> {
    let target = state.redirect_resolver.resolve(code).await?;
    found(target.location())
}

/// Builds a `302 Found` response.
///
/// Stored URLs may contain non-ASCII characters; those are re-serialized
/// through [`Url`] into an ASCII `Location` header.
fn found(location: &str) -> Result<Response, AppError> {
    let value = match HeaderValue::from_str(location) {
        Ok(value) => value,
        Err(_) => Url::parse(location)
            .ok()
            .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
            .ok_or_else(|| {
                tracing::error!(location, "Stored URL cannot be used as a Location header");
                AppError::storage_failure(
                    "Stored URL cannot be used as a redirect target",
                    json!({}),
                )
            })?,
    };

    Ok((StatusCode::FOUND, [(header::LOCATION, value)]).into_response())
}
