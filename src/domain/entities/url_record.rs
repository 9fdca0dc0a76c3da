//! UrlRecord entity representing a short code to long URL mapping.

use serde::Serialize;

/// A persisted mapping between a short code and its destination.
///
/// `short_url` holds the bare code (e.g. `V1StGXR8Z5jd`), not a full URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct UrlRecord {
    pub id: i64,
    pub long_url: String,
    pub short_url: String,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(id: i64, long_url: String, short_url: String) -> Self {
        Self {
            id,
            long_url,
            short_url,
        }
    }
}

/// Input data for inserting a record. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub long_url: String,
    pub short_url: String,
}

/// Partial update for an existing record.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlPatch {
    pub long_url: Option<String>,
}
