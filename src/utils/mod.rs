//! Helpers shared by the service layer.
//!
//! - [`code_generator`] - Short code generation and format validation
//! - [`url_validator`] - Destination URL validation

pub mod code_generator;
pub mod url_validator;
