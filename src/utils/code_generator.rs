//! Short code generation and validation utilities.
//!
//! Generated codes and accepted caller-supplied codes share one format, so
//! every code the service hands out passes [`validate_short_code`].

use std::sync::LazyLock;

use crate::error::AppError;
use base64::Engine as _;
use regex::Regex;
use serde_json::json;

/// Length of random bytes before base64 encoding.
const CODE_LENGTH_BYTES: usize = 9;

pub const MIN_CODE_LENGTH: usize = 4;
pub const MAX_CODE_LENGTH: usize = 32;

/// Codes that would shadow a fixed route.
pub const RESERVED_CODES: &[&str] = &["api", "error", "health", "jump", "static"];

static SHORT_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("short code pattern is valid"));

/// Generates a random short code.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing a 12-character code.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_code() -> String {
    let mut buffer = [0u8; CODE_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}

/// Validates a caller-supplied short code.
///
/// # Rules
///
/// - Length: 4-32 characters
/// - Allowed characters: ASCII letters, digits, `_` and `-`
/// - Cannot be a reserved route segment
///
/// # Errors
///
/// Returns [`AppError::InvalidInput`] if any rule is violated.
pub fn validate_short_code(code: &str) -> Result<(), AppError> {
    if code.len() < MIN_CODE_LENGTH || code.len() > MAX_CODE_LENGTH {
        return Err(AppError::invalid_input(
            "Short code must be 4-32 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !SHORT_CODE_REGEX.is_match(code) {
        return Err(AppError::invalid_input(
            "Short code can only contain letters, digits, underscores and hyphens",
            json!({ "short_url": code }),
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::invalid_input(
            "This short code is reserved",
            json!({ "short_url": code }),
        ));
    }

    Ok(())
}
