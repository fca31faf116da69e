//! DTOs for the URL listing endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::UrlRecord;

/// Every stored record, newest first (`GET /api/urls`).
#[derive(Debug, Serialize)]
pub struct UrlListResponse {
    pub total: usize,
    pub items: Vec<UrlInfo>,
}

#[derive(Debug, Serialize)]
pub struct UrlInfo {
    pub short_code: String,
    pub original_url: String,
    pub short_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl UrlInfo {
    pub fn new(record: UrlRecord, short_url: String) -> Self {
        Self {
            short_code: record.short_code,
            original_url: record.original_url,
            short_url,
            clicks: record.clicks,
            created_at: record.created_at,
        }
    }
}
