//! Shortening and resolution service.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::entities::{NewUrlRecord, UrlRecord, UrlStats};
use crate::domain::errors::{ShortenError, StorageError};
use crate::domain::repositories::UrlRepository;
use crate::utils::code_generator::{generate_code, is_reserved, is_well_formed};
use crate::utils::url_normalizer::normalize_url;

/// Upper bound on candidate codes drawn for a single `shorten` call.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 10;

/// A record together with its age at the time of the query.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordStats {
    pub record: UrlRecord,
    pub age_days: f64,
}

/// Creates short codes for URLs and resolves them back.
///
/// Written once against [`UrlRepository`], so the same logic serves the
/// PostgreSQL and the JSON file backend.
pub struct UrlService<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
    base_url: String,
}

impl<R: UrlRepository + ?Sized> UrlService<R> {
    /// Creates a new service. `base_url` is the public origin short URLs are
    /// built from; trailing slashes are ignored.
    pub fn new(repository: Arc<R>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            repository,
            base_url,
        }
    }

    /// Name of the storage backend behind this service.
    pub fn backend_name(&self) -> &'static str {
        self.repository.backend_name()
    }

    /// Probes the storage backend.
    pub async fn ping(&self) -> Result<(), StorageError> {
        self.repository.ping().await
    }

    /// Returns the record for `raw_url`, creating one if none exists yet.
    ///
    /// # Flow
    ///
    /// 1. Normalize the input (no storage access on failure)
    /// 2. Return the existing record for the same normalized URL, if any
    /// 3. Allocate a free code (at most [`MAX_ALLOCATION_ATTEMPTS`] draws)
    /// 4. Insert, and return whatever record the storage ended up holding
    ///
    /// Two concurrent calls for the same new URL may both pass step 2 and
    /// create two records with different codes.
    ///
    /// # Errors
    ///
    /// - [`ShortenError::Validation`] if the input is rejected by the normalizer
    /// - [`ShortenError::AllocationExhausted`] if every drawn code was taken
    /// - [`ShortenError::Storage`] if the backend fails
    pub async fn shorten(&self, raw_url: &str) -> Result<UrlRecord, ShortenError> {
        let original_url = normalize_url(raw_url)?;

        if let Some(existing) = self.repository.find_by_original_url(&original_url).await? {
            debug!(
                code = %existing.short_code,
                "URL already shortened, returning existing record"
            );
            return Ok(existing);
        }

        let code = self.allocate_code().await?;

        let record = self
            .repository
            .insert(NewUrlRecord::new(code, original_url))
            .await?;

        info!(
            code = %record.short_code,
            url = %record.original_url,
            "Short URL created"
        );

        Ok(record)
    }

    /// Resolves a short code to its destination URL and counts the click.
    ///
    /// Codes that could never have been stored resolve to `None` without a
    /// storage round trip. A failing click increment is logged and dropped.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] only if the lookup itself fails.
    pub async fn resolve(&self, code: &str) -> Result<Option<String>, StorageError> {
        if !is_well_formed(code) {
            debug!(code, "Malformed short code, skipping lookup");
            return Ok(None);
        }

        let Some(record) = self.repository.find_by_code(code).await? else {
            debug!(code, "Short code not found");
            return Ok(None);
        };

        if let Err(e) = self.repository.increment_clicks(code).await {
            warn!(code, error = %e, "Failed to record click");
        }

        Ok(Some(record.original_url))
    }

    /// All records, newest first.
    pub async fn list_all(&self) -> Result<Vec<UrlRecord>, StorageError> {
        self.repository.list_all().await
    }

    /// Aggregate counters over all records.
    pub async fn stats(&self) -> Result<UrlStats, StorageError> {
        self.repository.aggregate_stats().await
    }

    /// Per-record statistics, or `None` for unknown codes. Does not count a click.
    pub async fn url_stats(&self, code: &str) -> Result<Option<RecordStats>, StorageError> {
        if !is_well_formed(code) {
            return Ok(None);
        }

        let record = self.repository.find_by_code(code).await?;

        Ok(record.map(|record| {
            let age_days = record.age_days(Utc::now());
            RecordStats { record, age_days }
        }))
    }

    /// Removes a record. Returns `false` if the code was unknown.
    pub async fn delete(&self, code: &str) -> Result<bool, StorageError> {
        let deleted = self.repository.delete_by_code(code).await?;

        if deleted {
            info!(code, "Short URL deleted");
        }

        Ok(deleted)
    }

    /// Builds the public short URL for `code`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    /// Draws random codes until one is neither reserved nor stored.
    ///
    /// The existence check is advisory; the storage insert has the final say.
    async fn allocate_code(&self) -> Result<String, ShortenError> {
        for attempt in 1..=MAX_ALLOCATION_ATTEMPTS {
            let code = generate_code();

            if is_reserved(&code) {
                continue;
            }

            if self.repository.find_by_code(&code).await?.is_none() {
                return Ok(code);
            }

            warn!(code = %code, attempt, "Short code collision");
        }

        Err(ShortenError::AllocationExhausted {
            attempts: MAX_ALLOCATION_ATTEMPTS,
        })
    }
}
