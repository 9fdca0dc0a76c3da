//! Core domain entities.
//!
//! The service manages a single entity, [`UrlRecord`], with separate structs
//! for creation ([`NewUrlRecord`]) and partial updates ([`UrlPatch`]).

pub mod url_record;

pub use url_record::{NewUrlRecord, UrlPatch, UrlRecord};
