//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod redirect;
pub mod urls;

pub use health::health_handler;
pub use redirect::{jump_handler, redirect_handler};
pub use urls::{add_handler, lookup_handler, method_fallback, patch_handler, remove_handler};
