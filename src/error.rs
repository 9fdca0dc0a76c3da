//! Application error type and its HTTP rendering.
//!
//! Every failure in the service layer is one of four kinds. Handlers return
//! `Result<_, AppError>` and Axum renders the error through [`IntoResponse`].

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serialized form of an [`AppError`].
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    InvalidInput { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    StorageFailure { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidInput {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn storage_failure(message: impl Into<String>, details: Value) -> Self {
        Self::StorageFailure {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error renders with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::StorageFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    /// Machine-readable kind used in the error envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidInput { .. } => "invalid_input",
            AppError::Conflict { .. } => "conflict",
            AppError::StorageFailure { .. } => "storage_failure",
            AppError::NotFound { .. } => "not_found",
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::InvalidInput { message, details }
            | AppError::Conflict { message, details }
            | AppError::StorageFailure { message, details }
            | AppError::NotFound { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.kind(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let message = e
            .field_errors()
            .values()
            .flat_map(|errors| errors.iter())
            .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());

        AppError::invalid_input(message, json!({ "fields": e }))
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::invalid_input("Invalid request body", json!({ "reason": e.body_text() }))
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::invalid_input("Invalid query string", json!({ "reason": e.body_text() }))
    }
}

/// Translates a driver error into an [`AppError`].
///
/// Unique violations become [`AppError::Conflict`]. Everything else is logged
/// and reported as an opaque [`AppError::StorageFailure`].
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return AppError::conflict(
            unique_violation_message(db.constraint()),
            json!({ "constraint": db.constraint() }),
        );
    }

    tracing::error!(error = %e, "Database operation failed");
    AppError::storage_failure("Database error", json!({}))
}

/// Conflict message for a unique index, picked by the column its name mentions.
fn unique_violation_message(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(name) if name.contains("short_url") => "The short code has already been used",
        Some(name) if name.contains("long_url") => "The URL has already been recorded",
        _ => "The record already exists",
    }
}
