//! DTOs for the `/api` collection endpoint.

use serde::Deserialize;
use serde_json::json;
use serde_with::{NoneAsEmptyString, serde_as};
use validator::Validate;

use crate::error::AppError;

pub const DEFAULT_LIST_LIMIT: u64 = 20;

/// Raw query string of `GET /api`.
///
/// Converted into a [`LookupQuery`] before any service call.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LookupParams {
    pub mode: Option<String>,
    pub short_url: Option<String>,
    pub long_url: Option<String>,
    pub offset: Option<String>,
    pub limit: Option<String>,
}

/// A validated `GET /api` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupQuery {
    ByShort(String),
    ByLong(String),
    ListAll { offset: u64, limit: u64 },
}

impl TryFrom<LookupParams> for LookupQuery {
    type Error = AppError;

    fn try_from(params: LookupParams) -> Result<Self, Self::Error> {
        match params.mode.as_deref() {
            Some("by_short") => required(params.short_url, "short_url").map(Self::ByShort),
            Some("by_long") => required(params.long_url, "long_url").map(Self::ByLong),
            Some("list_all") => Ok(Self::ListAll {
                offset: numeric(params.offset, "offset", 0)?,
                limit: numeric(params.limit, "limit", DEFAULT_LIST_LIMIT)?,
            }),
            other => Err(AppError::invalid_input(
                "Invalid mode",
                json!({ "mode": other, "allowed": ["by_short", "by_long", "list_all"] }),
            )),
        }
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, AppError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::invalid_input(format!("Missing {field}"), json!({ "field": field })))
}

fn numeric(value: Option<String>, field: &'static str, default: u64) -> Result<u64, AppError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => raw.parse().map_err(|_| {
            AppError::invalid_input(
                format!("{field} must be a non-negative integer"),
                json!({ "field": field, "value": raw }),
            )
        }),
    }
}

/// Body of `POST /api`.
///
/// An empty `short_url` is treated as absent and a code is generated.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AddUrlRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing long_url"))]
    pub long_url: String,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub short_url: Option<String>,

    /// Repoint an existing short code instead of rejecting the request.
    #[serde(default)]
    pub force: bool,
}

/// Body of `DELETE /api`.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RemoveUrlRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing short_url"))]
    pub short_url: String,
}
