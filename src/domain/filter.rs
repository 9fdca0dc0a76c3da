//! Equality filters over the `urls` collection.
//!
//! A [`Filter`] is a conjunction of [`FieldMatch`] clauses. Each clause accepts
//! any of its candidate values. A filter with no clauses matches every record.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::json;

use crate::domain::entities::UrlRecord;
use crate::error::AppError;

/// A filterable column of the `urls` collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlField {
    LongUrl,
    ShortUrl,
}

impl UrlField {
    /// Column name in storage.
    pub fn column(self) -> &'static str {
        match self {
            UrlField::LongUrl => "long_url",
            UrlField::ShortUrl => "short_url",
        }
    }

    fn value_of(self, record: &UrlRecord) -> &str {
        match self {
            UrlField::LongUrl => &record.long_url,
            UrlField::ShortUrl => &record.short_url,
        }
    }
}

/// Which side of a mapping a lookup or removal is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Long,
    Short,
}

impl MatchType {
    pub fn field(self) -> UrlField {
        match self {
            MatchType::Long => UrlField::LongUrl,
            MatchType::Short => UrlField::ShortUrl,
        }
    }
}

impl FromStr for MatchType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "long" => Ok(MatchType::Long),
            "short" => Ok(MatchType::Short),
            other => Err(AppError::invalid_input(
                "Invalid type",
                json!({ "type": other, "allowed": ["long", "short"] }),
            )),
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchType::Long => f.write_str("long"),
            MatchType::Short => f.write_str("short"),
        }
    }
}

/// One field constrained to a set of allowed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub field: UrlField,
    pub values: Vec<String>,
}

impl FieldMatch {
    pub fn new(field: UrlField, values: Vec<String>) -> Self {
        Self { field, values }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    clauses: Vec<FieldMatch>,
}

impl Filter {
    /// The filter that matches every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Single-field, single-value equality filter.
    pub fn eq(field: UrlField, value: impl Into<String>) -> Self {
        Self {
            clauses: vec![FieldMatch::new(field, vec![value.into()])],
        }
    }

    pub fn clauses(&self) -> &[FieldMatch] {
        &self.clauses
    }

    pub fn is_unconstrained(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Candidate values for `field`, if the filter constrains it.
    pub fn values_for(&self, field: UrlField) -> Option<&[String]> {
        self.clauses
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.values.as_slice())
    }

    pub fn matches(&self, record: &UrlRecord) -> bool {
        self.clauses
            .iter()
            .all(|c| c.values.iter().any(|v| v == c.field.value_of(record)))
    }
}

/// Paging options for [`crate::domain::repositories::UrlRepository::find`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindOptions {
    pub limit: Option<u64>,
    pub skip: Option<u64>,
}

impl FindOptions {
    pub fn first() -> Self {
        Self {
            limit: Some(1),
            skip: None,
        }
    }

    pub fn page(skip: u64, limit: u64) -> Self {
        Self {
            limit: Some(limit),
            skip: Some(skip),
        }
    }
}

/// Builds a filter that accepts any of the candidate values per field.
///
/// Returns `None` when any field has no candidate values. Callers must treat
/// `None` as "no constraint could be built", not as "match nothing": passing
/// [`Filter::all`] in its place would match every record.
pub fn build_equality_filter(fields: Vec<FieldMatch>) -> Option<Filter> {
    if fields.iter().any(|f| f.values.is_empty()) {
        return None;
    }

    Some(Filter { clauses: fields })
}
