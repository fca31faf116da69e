//! URL record entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored short code together with its destination and click counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    pub short_code: String,
    pub original_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(
        short_code: String,
        original_url: String,
        clicks: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            short_code,
            original_url,
            clicks,
            created_at,
        }
    }

    /// Fractional days elapsed between `created_at` and `now`.
    ///
    /// Clamped at zero so clock skew between writer and reader never
    /// produces a negative age.
    pub fn age_days(&self, now: DateTime<Utc>) -> f64 {
        let seconds = (now - self.created_at).num_milliseconds() as f64 / 1000.0;
        (seconds / 86_400.0).max(0.0)
    }
}

/// Input data for inserting a new record.
///
/// `clicks` is zero for freshly shortened URLs; the migration tool seeds it
/// with the count carried over from the legacy JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub short_code: String,
    pub original_url: String,
    pub clicks: i64,
}

impl NewUrlRecord {
    pub fn new(short_code: String, original_url: String) -> Self {
        Self {
            short_code,
            original_url,
            clicks: 0,
        }
    }

    pub fn with_clicks(mut self, clicks: i64) -> Self {
        self.clicks = clicks.max(0);
        self
    }
}

/// Aggregate counters over the whole table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UrlStats {
    pub total_urls: i64,
    pub total_clicks: i64,
}
