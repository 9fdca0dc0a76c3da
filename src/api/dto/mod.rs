//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Request DTOs reject unknown fields.

pub mod envelope;
pub mod health;
pub mod urls;
