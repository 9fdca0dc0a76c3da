//! Success response envelope.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// `{"code": 200, "message": "...", "body": ...}`.
///
/// Errors use the [`crate::error::AppError`] envelope instead.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub body: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(body: T) -> Self {
        Self::with_message("OK", body)
    }

    pub fn with_message(message: impl Into<String>, body: T) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            message: message.into(),
            body,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
