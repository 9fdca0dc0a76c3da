//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::mapping_service::MappingService`] - Add, look up, list and remove mappings
//! - [`services::redirect_resolver::RedirectResolver`] - Resolve short codes to redirect targets

pub mod services;
