//! Typed failures of the storage layer and of the shortening flow.

use crate::utils::url_normalizer::UrlValidationError;

/// Failure reported by a [`crate::domain::repositories::UrlRepository`].
///
/// Storage operations are never retried internally; every variant reaches
/// the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backend could not be reached (connection refused, pool exhausted,
    /// file not accessible).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The backend was reachable but rejected or failed the operation.
    #[error("storage query failed: {0}")]
    Query(String),

    /// Persisted data could not be decoded.
    #[error("stored data is corrupted: {0}")]
    Corrupted(String),
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::Unavailable(e.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        Self::Corrupted(e.to_string())
    }
}

/// Failure of [`crate::application::services::UrlService::shorten`].
#[derive(Debug, thiserror::Error)]
pub enum ShortenError {
    #[error(transparent)]
    Validation(#[from] UrlValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Every candidate drawn by the allocator was already taken.
    #[error("no free short code found after {attempts} attempts")]
    AllocationExhausted { attempts: usize },
}
