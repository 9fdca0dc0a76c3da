//! API route configuration.

use crate::api::handlers::{
    add_handler, jump_handler, lookup_handler, method_fallback, patch_handler, remove_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `GET    /`      - Look up by code, by long URL, or list (`mode` query)
/// - `POST   /`      - Add a mapping
/// - `DELETE /`      - Remove a mapping by code
/// - `PATCH  /`      - Placeholder, 404
/// - `GET    /jump`  - Redirect by `short_url` query parameter
///
/// Any other verb on `/` answers 400 "Invalid method".
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(lookup_handler)
                .post(add_handler)
                .delete(remove_handler)
                .patch(patch_handler)
                .fallback(method_fallback),
        )
        .route("/jump", get(jump_handler))
}
