//! Business logic services for the application layer.

pub mod mapping_service;
pub mod redirect_resolver;

pub use mapping_service::{Mapping, MappingOutcome, MappingService, Removal};
pub use redirect_resolver::{RedirectResolver, RedirectTarget};
