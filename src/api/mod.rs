//! JSON API layer for HTTP request/response handling.
//!
//! Translates requests on `/api` into [`crate::application::services`] calls
//! and wraps results in the `{code, message, body}` envelope.
//!
//! # Modules
//!
//! - [`dto`] - Request parameters and response envelopes
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
