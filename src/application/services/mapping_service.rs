//! Mapping creation, lookup, listing and removal.

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use crate::domain::entities::{NewUrlRecord, UrlPatch, UrlRecord};
use crate::domain::filter::{
    FieldMatch, Filter, FindOptions, MatchType, UrlField, build_equality_filter,
};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_short_code};
use crate::utils::url_validator::validate_long_url;

/// How [`MappingService::add`] satisfied a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingOutcome {
    /// A new record was inserted.
    Created,
    /// The long URL was already recorded; the existing record is returned.
    Reused,
    /// Force mode repointed an existing short code.
    Updated,
}

impl MappingOutcome {
    pub fn message(self) -> &'static str {
        match self {
            MappingOutcome::Created => "New URL has been added",
            MappingOutcome::Reused => "The URL has already been recorded",
            MappingOutcome::Updated => "The short code has been updated",
        }
    }
}

/// Result of [`MappingService::add`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mapping {
    #[serde(flatten)]
    pub record: UrlRecord,
    pub outcome: MappingOutcome,
}

/// Echo of a removal request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Removal {
    #[serde(rename = "type")]
    pub match_type: MatchType,
    pub content: String,
    pub deleted_count: u64,
}

/// Service for managing short code mappings.
///
/// # Uniqueness
///
/// Short codes and long URLs are kept unique by looking up before inserting.
/// The check and the insert are separate store calls, so two concurrent adds of
/// the same code can both succeed. A unique index on `urls.short_url` closes
/// that window; its violation surfaces as [`AppError::Conflict`].
pub struct MappingService {
    repository: Arc<dyn UrlRepository>,
    validate_codes: bool,
    max_list_limit: u64,
}

impl MappingService {
    /// Creates a new mapping service.
    ///
    /// - `validate_codes` - enforce the short code format on caller-supplied codes
    /// - `max_list_limit` - largest page size accepted by [`Self::list`]
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        validate_codes: bool,
        max_list_limit: u64,
    ) -> Self {
        Self {
            repository,
            validate_codes,
            max_list_limit,
        }
    }

    /// Adds a mapping from `short_url` (generated when absent) to `long_url`.
    ///
    /// # Policy
    ///
    /// | short code taken | long URL taken | force | result |
    /// |---|---|---|---|
    /// | no  | no  | any   | insert, [`MappingOutcome::Created`] |
    /// | yes | any | true  | repoint in place, [`MappingOutcome::Updated`] |
    /// | yes | any | false | [`AppError::Conflict`] |
    /// | no  | yes | false | existing record, [`MappingOutcome::Reused`] |
    /// | no  | yes | true  | insert, [`MappingOutcome::Created`] |
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if the URL is not absolute http/https
    /// or the supplied code fails format validation.
    /// Returns [`AppError::Conflict`] if the code is in use and `force` is false.
    /// Returns [`AppError::StorageFailure`] on database errors.
    pub async fn add(
        &self,
        long_url: &str,
        short_url: Option<String>,
        force: bool,
    ) -> Result<Mapping, AppError> {
        validate_long_url(long_url).map_err(|e| {
            AppError::invalid_input("Invalid URL or protocol", json!({ "reason": e.to_string() }))
        })?;

        let short_url = match short_url {
            Some(code) => {
                if self.validate_codes {
                    validate_short_code(&code)?;
                }
                code
            }
            None => generate_code(),
        };

        let (by_long, by_short) = tokio::try_join!(
            self.lookup(MatchType::Long, long_url),
            self.lookup(MatchType::Short, &short_url),
        )?;

        match (by_short, by_long) {
            (Some(existing), _) if force => self.repoint(existing, long_url).await,
            (Some(existing), _) => Err(AppError::conflict(
                "The short code has already been used",
                json!({ "record": existing }),
            )),
            (None, Some(existing)) if !force => {
                tracing::debug!(short_url = %existing.short_url, "Long URL already recorded");
                Ok(Mapping {
                    record: existing,
                    outcome: MappingOutcome::Reused,
                })
            }
            (None, _) => self.insert(long_url, short_url).await,
        }
    }

    /// Finds the first record whose `match_type` side equals `value`.
    ///
    /// Absence is `Ok(None)`, never an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageFailure`] on database errors.
    pub async fn lookup(
        &self,
        match_type: MatchType,
        value: &str,
    ) -> Result<Option<UrlRecord>, AppError> {
        let filter = Filter::eq(match_type.field(), value);
        let records = self.repository.find(&filter, FindOptions::first()).await?;

        Ok(records.into_iter().next())
    }

    /// Returns up to `limit` records after skipping `offset`, in store order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if `limit` is 0 or above the configured
    /// maximum.
    /// Returns [`AppError::StorageFailure`] on database errors.
    pub async fn list(&self, offset: u64, limit: u64) -> Result<Vec<UrlRecord>, AppError> {
        if limit == 0 || limit > self.max_list_limit {
            return Err(AppError::invalid_input(
                format!("limit must be between 1 and {}", self.max_list_limit),
                json!({ "limit": limit }),
            ));
        }

        self.repository
            .find(&Filter::all(), FindOptions::page(offset, limit))
            .await
    }

    /// Removes the first record whose `match_type` side equals `value`.
    ///
    /// Removing a record that does not exist is not an error; the echo reports
    /// `deleted_count: 0`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if no filter can be built for `value`.
    /// Returns [`AppError::StorageFailure`] on database errors.
    pub async fn remove(&self, match_type: MatchType, value: &str) -> Result<Removal, AppError> {
        let filter = build_equality_filter(vec![FieldMatch::new(
            match_type.field(),
            vec![value.to_string()],
        )])
        .filter(|f| !f.is_unconstrained())
        .ok_or_else(|| {
            AppError::invalid_input(
                "Refusing to remove without a match criterion",
                json!({ "type": match_type }),
            )
        })?;

        let deleted_count = self.repository.delete_one(&filter).await?;
        tracing::info!(%match_type, value, deleted_count, "URL removed");

        Ok(Removal {
            match_type,
            content: value.to_string(),
            deleted_count,
        })
    }

    async fn insert(&self, long_url: &str, short_url: String) -> Result<Mapping, AppError> {
        let record = self
            .repository
            .insert_one(NewUrlRecord {
                long_url: long_url.to_string(),
                short_url,
            })
            .await?;

        tracing::info!(short_url = %record.short_url, "New URL added");

        Ok(Mapping {
            record,
            outcome: MappingOutcome::Created,
        })
    }

    /// Overwrites `long_url` of the record owning `existing.short_url`.
    ///
    /// Falls back to an insert if the record vanished after the lookup.
    async fn repoint(&self, existing: UrlRecord, long_url: &str) -> Result<Mapping, AppError> {
        let filter = Filter::eq(UrlField::ShortUrl, existing.short_url.clone());
        let patch = UrlPatch {
            long_url: Some(long_url.to_string()),
        };

        match self.repository.update_one(&filter, patch).await? {
            Some(record) => {
                tracing::info!(short_url = %record.short_url, "Short code repointed");
                Ok(Mapping {
                    record,
                    outcome: MappingOutcome::Updated,
                })
            }
            None => self.insert(long_url, existing.short_url).await,
        }
    }
}
