//! Handlers for the `/api` collection endpoint.
//!
//! One path, dispatched by HTTP verb:
//!
//! - `GET    /api?mode=by_short&short_url=..` - Look up by short code
//! - `GET    /api?mode=by_long&long_url=..`   - Look up by long URL
//! - `GET    /api?mode=list_all&offset=..&limit=..` - List a page of records
//! - `POST   /api`   - Add a mapping
//! - `DELETE /api`   - Remove a mapping by short code
//! - `PATCH  /api`   - Not implemented yet (404)

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::Method,
    response::{IntoResponse, Response},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::envelope::ApiResponse;
use crate::api::dto::urls::{AddUrlRequest, LookupParams, LookupQuery, RemoveUrlRequest};
use crate::application::services::{Mapping, Removal};
use crate::domain::filter::MatchType;
use crate::error::AppError;
use crate::state::AppState;

/// Looks up one record or lists a page of records.
///
/// # Endpoint
///
/// `GET /api?mode=by_short|by_long|list_all`
///
/// # Response
///
/// Lookups return the record, or `null` in `body` when nothing matches:
///
/// ```json
/// { "code": 200, "message": "OK", "body": { "id": 1, "long_url": "https://example.com", "short_url": "V1StGXR8Z5jd" } }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for an unknown mode, a missing selector field,
/// non-numeric paging values or unknown query parameters.
pub async fn lookup_handler(
    State(state): State<AppState>,
    query: Result<Query<LookupParams>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(params) = query?;
    let service = &state.mapping_service;

    let response = match LookupQuery::try_from(params)? {
        LookupQuery::ByShort(code) => {
            ApiResponse::ok(service.lookup(MatchType::Short, &code).await?).into_response()
        }
        LookupQuery::ByLong(url) => {
            ApiResponse::ok(service.lookup(MatchType::Long, &url).await?).into_response()
        }
        LookupQuery::ListAll { offset, limit } => {
            ApiResponse::ok(service.list(offset, limit).await?).into_response()
        }
    };

    Ok(response)
}

/// Adds a mapping.
///
/// # Endpoint
///
/// `POST /api`
///
/// # Request Body
///
/// ```json
/// { "long_url": "https://example.com", "short_url": "my-link", "force": false }
/// ```
///
/// `short_url` and `force` are optional.
///
/// # Response
///
/// ```json
/// {
///   "code": 200,
///   "message": "New URL has been added",
///   "body": { "id": 1, "long_url": "https://example.com", "short_url": "my-link", "outcome": "created" }
/// }
/// ```
///
/// `outcome` is `created`, `reused` (long URL already recorded) or `updated`
/// (forced repoint of an existing code).
///
/// # Errors
///
/// Returns 400 Bad Request for invalid input, 409 Conflict if the short code
/// is taken and `force` is not set, 500 on storage failure.
pub async fn add_handler(
    State(state): State<AppState>,
    payload: Result<Json<AddUrlRequest>, JsonRejection>,
) -> Result<ApiResponse<Mapping>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let mapping = state
        .mapping_service
        .add(&payload.long_url, payload.short_url, payload.force)
        .await?;

    Ok(ApiResponse::with_message(mapping.outcome.message(), mapping))
}

/// Removes the mapping owning a short code.
///
/// # Endpoint
///
/// `DELETE /api` with body `{ "short_url": "my-link" }`
///
/// Succeeds even when no record matches; `deleted_count` is then 0.
///
/// # Errors
///
/// Returns 400 Bad Request if `short_url` is missing, 500 on storage failure.
pub async fn remove_handler(
    State(state): State<AppState>,
    payload: Result<Json<RemoveUrlRequest>, JsonRejection>,
) -> Result<ApiResponse<Removal>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let removal = state
        .mapping_service
        .remove(MatchType::Short, &payload.short_url)
        .await?;

    Ok(ApiResponse::with_message("URL has been removed", removal))
}

/// `PATCH /api` placeholder.
pub async fn patch_handler() -> AppError {
    AppError::not_found("In progress...", json!({}))
}

/// Any verb without a handler on `/api`.
pub async fn method_fallback(method: Method) -> AppError {
    AppError::invalid_input("Invalid method", json!({ "method": method.as_str() }))
}
