//! DTOs for the statistics endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::RecordStats;
use crate::domain::entities::UrlStats;

/// Aggregate counters (`GET /api/stats`).
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_urls: i64,
    pub total_clicks: i64,
}

impl From<UrlStats> for StatsResponse {
    fn from(stats: UrlStats) -> Self {
        Self {
            total_urls: stats.total_urls,
            total_clicks: stats.total_clicks,
        }
    }
}

/// Statistics for one short code (`GET /api/stats/{code}`).
#[derive(Debug, Serialize)]
pub struct UrlStatsResponse {
    pub short_code: String,
    pub original_url: String,
    pub short_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    /// Fractional days since creation, rounded to two decimals.
    pub age_days: f64,
}

impl UrlStatsResponse {
    pub fn new(stats: RecordStats, short_url: String) -> Self {
        Self {
            short_code: stats.record.short_code,
            original_url: stats.record.original_url,
            short_url,
            clicks: stats.record.clicks,
            created_at: stats.record.created_at,
            age_days: (stats.age_days * 100.0).round() / 100.0,
        }
    }
}
