//! Top-level router configuration combining API and page routes.
//!
//! # Route Structure
//!
//! - `GET  /{code}`  - Short code redirect
//! - `GET  /health`  - Health check
//! - `/api`          - JSON API (see [`crate::api::routes`])
//! - `GET  /`        - Home page
//! - `GET  /error`   - Error page for unknown codes
//! - anything else   - HTML 404 page
//!
//! Static segments win over `/{code}`, so `/health` and `/error` are never
//! treated as short codes. The same names are rejected as custom codes.

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use crate::web;
use crate::web::handlers::not_found_handler;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and the tracing layer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .merge(web::routes::page_routes())
        .fallback(not_found_handler)
        .with_state(state)
        .layer(tracing::layer())
}

/// [`router`] wrapped so that `/api/` and `/abc/` match `/api` and `/abc`.
///
/// Path normalization must run before routing, so it wraps the router
/// instead of being added with `Router::layer`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
