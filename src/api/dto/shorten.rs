//! DTOs for the shortening endpoints.

use crate::error::ErrorInfo;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL (`POST /shorten`).
#[derive(Debug, Deserialize)]
pub struct ShortenUrlRequest {
    pub url: String,
}

/// Response for a single shortened URL.
#[derive(Debug, Serialize)]
pub struct ShortenUrlResponse {
    pub short_url: String,
    pub short_code: String,
    pub original_url: String,
}

/// Request to shorten one or more URLs (`POST /api/shorten`).
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Batch must contain between 1 and 100 URLs"
    ))]
    pub urls: Vec<UrlItem>,
}

/// Individual URL to be shortened.
///
/// Not validated here: the raw value goes through the normalizer, which
/// reports per-item errors. `Serialize` lets a rejected batch be echoed
/// back in the validation details.
#[derive(Debug, Serialize, Deserialize)]
pub struct UrlItem {
    pub url: String,
}

/// Response containing batch processing results.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub summary: BatchSummary,
    pub items: Vec<ShortenResultItem>,
}

/// Individual result for a URL in the batch.
///
/// Uses untagged enum for cleaner JSON structure (no discriminator field).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ShortenResultItem {
    Success {
        url: String,
        short_code: String,
        short_url: String,
        original_url: String,
    },
    Error {
        url: String,
        error: ErrorInfo,
    },
}

/// Summary statistics for batch processing.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}
