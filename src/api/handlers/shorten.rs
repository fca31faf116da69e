//! Handlers for the shortening endpoints.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{
    BatchSummary, ShortenRequest, ShortenResponse, ShortenResultItem, ShortenUrlRequest,
    ShortenUrlResponse,
};
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a single URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "example.com/some/page" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "short_url": "http://localhost:3000/aB3xY9",
///   "short_code": "aB3xY9",
///   "original_url": "https://example.com/some/page"
/// }
/// ```
///
/// Submitting a URL that was already shortened returns the existing code.
///
/// # Errors
///
/// - 400 with `empty_input`, `too_long` or `invalid_format`
/// - 500 with `allocation_exhausted` or `storage_error`
/// - 503 with `storage_unavailable`
pub async fn shorten_url_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenUrlRequest>,
) -> Result<Json<ShortenUrlResponse>, AppError> {
    let record = state.url_service.shorten(&payload.url).await?;

    Ok(Json(ShortenUrlResponse {
        short_url: state.url_service.short_url(&record.short_code),
        short_code: record.short_code,
        original_url: record.original_url,
    }))
}

/// Creates short URLs for a batch of long URLs.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Batch Processing
///
/// Processes URLs sequentially and independently. If one fails, others
/// continue processing. Each result includes either success data or error
/// information.
///
/// # Request Body
///
/// ```json
/// {
///   "urls": [
///     { "url": "https://example.com" },
///     { "url": "" }
///   ]
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "summary": { "total": 2, "successful": 1, "failed": 1 },
///   "items": [
///     {
///       "url": "https://example.com",
///       "short_code": "aB3xY9",
///       "short_url": "http://localhost:3000/aB3xY9",
///       "original_url": "https://example.com"
///     },
///     {
///       "url": "",
///       "error": { "code": "empty_input", "message": "URL is required", "details": {} }
///     }
///   ]
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the batch is empty or has more than 100 items.
/// Individual URL errors are returned in the response items array.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let total = payload.urls.len();
    let mut results = Vec::with_capacity(total);
    let mut successful = 0;
    let mut failed = 0;

    for item in payload.urls {
        match state.url_service.shorten(&item.url).await {
            Ok(record) => {
                successful += 1;
                results.push(ShortenResultItem::Success {
                    url: item.url,
                    short_url: state.url_service.short_url(&record.short_code),
                    short_code: record.short_code,
                    original_url: record.original_url,
                });
            }
            Err(err) => {
                failed += 1;
                results.push(ShortenResultItem::Error {
                    url: item.url,
                    error: AppError::from(err).to_error_info(),
                });
            }
        }
    }

    Ok(Json(ShortenResponse {
        summary: BatchSummary {
            total,
            successful,
            failed,
        },
        items: results,
    }))
}
