//! Repository trait for URL record storage.

use crate::domain::entities::{NewUrlRecord, UrlRecord, UrlStats};
use crate::domain::errors::StorageError;
use async_trait::async_trait;

/// Storage capability for URL records.
///
/// Every method is one independent unit of work; no transaction spans two
/// calls. Failures are surfaced, never retried.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::FileUrlRepository`] - single JSON document
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_url.rs`, `tests/repository_file.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Finds the record whose `original_url` matches exactly.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend fails.
    async fn find_by_original_url(&self, url: &str) -> Result<Option<UrlRecord>, StorageError>;

    /// Finds a record by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlRecord))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend fails.
    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, StorageError>;

    /// Inserts a new record.
    ///
    /// Behaves as insert-or-fetch-existing: if another writer already owns
    /// `new_record.short_code`, the stored record for that code is returned
    /// instead of an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend fails.
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, StorageError>;

    /// Atomically adds one to the click counter of `code`.
    ///
    /// Unknown codes are a no-op.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend fails.
    async fn increment_clicks(&self, code: &str) -> Result<(), StorageError>;

    /// Returns every record, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend fails.
    async fn list_all(&self) -> Result<Vec<UrlRecord>, StorageError>;

    /// Counts records and sums their clicks (zero on an empty table).
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend fails.
    async fn aggregate_stats(&self) -> Result<UrlStats, StorageError>;

    /// Administrative removal. Returns `true` if a record was deleted.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend fails.
    async fn delete_by_code(&self, code: &str) -> Result<bool, StorageError>;

    /// Cheap liveness probe.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend is not usable.
    async fn ping(&self) -> Result<(), StorageError>;

    /// Short backend identifier for logs and health output.
    fn backend_name(&self) -> &'static str;
}
