//! Repository trait for URL record data access.

use crate::domain::entities::{NewUrlRecord, UrlPatch, UrlRecord};
use crate::domain::filter::{Filter, FindOptions};
use crate::error::AppError;
use async_trait::async_trait;

/// Record store adapter over the single `urls` collection.
///
/// Operations are filter-driven and carry no business rules: uniqueness of
/// short codes and long URLs is decided by
/// [`crate::application::services::MappingService`], not here.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Returns records matching `filter` in the store's natural order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageFailure`] on database errors.
    async fn find(&self, filter: &Filter, options: FindOptions)
    -> Result<Vec<UrlRecord>, AppError>;

    /// Inserts a record and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a store-level unique index rejects the row.
    /// Returns [`AppError::StorageFailure`] on database errors.
    async fn insert_one(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Applies `patch` to the first record matching `filter`.
    ///
    /// Returns `Ok(None)` when nothing matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageFailure`] on database errors.
    async fn update_one(
        &self,
        filter: &Filter,
        patch: UrlPatch,
    ) -> Result<Option<UrlRecord>, AppError>;

    /// Deletes the first record matching `filter`.
    ///
    /// Returns the number of records removed (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageFailure`] on database errors.
    async fn delete_one(&self, filter: &Filter) -> Result<u64, AppError>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
