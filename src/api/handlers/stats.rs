//! Handlers for statistics endpoints.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::api::dto::stats::{StatsResponse, UrlStatsResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns total URL and click counts.
///
/// # Endpoint
///
/// `GET /api/stats`
///
/// # Response
///
/// ```json
/// { "total_urls": 3, "total_clicks": 42 }
/// ```
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.url_service.stats().await?;
    Ok(Json(stats.into()))
}

/// Returns statistics for a single short code. Does not count as a click.
///
/// # Endpoint
///
/// `GET /api/stats/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist.
pub async fn url_stats_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UrlStatsResponse>, AppError> {
    let stats = state
        .url_service
        .url_stats(&code)
        .await?
        .ok_or_else(|| AppError::not_found("Short URL not found", json!({ "code": code })))?;

    let short_url = state.url_service.short_url(&stats.record.short_code);
    Ok(Json(UrlStatsResponse::new(stats, short_url)))
}
