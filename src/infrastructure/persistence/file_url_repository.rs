//! JSON file implementation of the URL repository.
//!
//! The whole table lives in one JSON array that is read and rewritten on
//! every mutation. Writers inside one process are serialized by a mutex;
//! nothing protects the file against a second process.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::entities::{NewUrlRecord, UrlRecord, UrlStats};
use crate::domain::errors::StorageError;
use crate::domain::repositories::UrlRepository;

/// On-disk shape of a record.
///
/// `created_at` stays a string so documents written with naive timestamps
/// (no UTC offset) still load; `clicks` may be absent.
#[derive(Debug, Serialize, Deserialize)]
struct StoredRecord {
    short_code: String,
    original_url: String,
    #[serde(default)]
    clicks: i64,
    created_at: String,
}

impl StoredRecord {
    fn into_record(self) -> Result<UrlRecord, StorageError> {
        let created_at = parse_timestamp(&self.created_at).ok_or_else(|| {
            StorageError::Corrupted(format!(
                "invalid created_at {:?} for short code {}",
                self.created_at, self.short_code
            ))
        })?;

        Ok(UrlRecord::new(
            self.short_code,
            self.original_url,
            self.clicks.max(0),
            created_at,
        ))
    }
}

impl From<&UrlRecord> for StoredRecord {
    fn from(record: &UrlRecord) -> Self {
        Self {
            short_code: record.short_code.clone(),
            original_url: record.original_url.clone(),
            clicks: record.clicks,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

/// Parses RFC 3339, falling back to naive ISO 8601 forms read as UTC.
pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Repository backed by a single JSON document.
pub struct FileUrlRepository {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileUrlRepository {
    /// Opens the document at `path`, creating it as an empty array if missing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if the file cannot be created
    /// and [`StorageError::Corrupted`] if it exists but does not parse.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        if !tokio::fs::try_exists(&path).await? {
            tokio::fs::write(&path, "[]").await?;
            info!(path = %path.display(), "Created empty data file");
        }

        let repository = Self {
            path,
            lock: Mutex::new(()),
        };

        let count = repository.load().await?.len();
        info!(path = %repository.path.display(), count, "Data file loaded");

        Ok(repository)
    }

    /// Location of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<UrlRecord>, StorageError> {
        let content = tokio::fs::read_to_string(&self.path).await?;

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str::<Vec<StoredRecord>>(&content)?
            .into_iter()
            .map(StoredRecord::into_record)
            .collect()
    }

    /// Writes through a sibling temp file and a rename so readers never see
    /// a half-written document.
    async fn save(&self, records: &[UrlRecord]) -> Result<(), StorageError> {
        let stored: Vec<StoredRecord> = records.iter().map(StoredRecord::from).collect();
        let json = serde_json::to_string_pretty(&stored)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");

        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(count = records.len(), "Data file written");
        Ok(())
    }
}

#[async_trait]
impl UrlRepository for FileUrlRepository {
    async fn find_by_original_url(&self, url: &str) -> Result<Option<UrlRecord>, StorageError> {
        let _guard = self.lock.lock().await;
        let records = self.load().await?;

        Ok(records.into_iter().find(|r| r.original_url == url))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, StorageError> {
        let _guard = self.lock.lock().await;
        let records = self.load().await?;

        Ok(records.into_iter().find(|r| r.short_code == code))
    }

    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, StorageError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;

        if let Some(existing) = records
            .iter()
            .find(|r| r.short_code == new_record.short_code)
        {
            debug!(
                code = %new_record.short_code,
                "Short code already stored, returning existing record"
            );
            return Ok(existing.clone());
        }

        let record = UrlRecord::new(
            new_record.short_code,
            new_record.original_url,
            new_record.clicks,
            Utc::now(),
        );

        records.push(record.clone());
        self.save(&records).await?;

        Ok(record)
    }

    async fn increment_clicks(&self, code: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;

        let Some(record) = records.iter_mut().find(|r| r.short_code == code) else {
            return Ok(());
        };

        record.clicks += 1;
        self.save(&records).await
    }

    async fn list_all(&self) -> Result<Vec<UrlRecord>, StorageError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;

        // Stable sort keeps later-appended records first among equal timestamps.
        records.reverse();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(records)
    }

    async fn aggregate_stats(&self) -> Result<UrlStats, StorageError> {
        let _guard = self.lock.lock().await;
        let records = self.load().await?;

        Ok(UrlStats {
            total_urls: i64::try_from(records.len()).unwrap_or(i64::MAX),
            total_clicks: records
                .iter()
                .map(|r| r.clicks)
                .fold(0i64, i64::saturating_add),
        })
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, StorageError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;

        let before = records.len();
        records.retain(|r| r.short_code != code);

        if records.len() == before {
            return Ok(false);
        }

        self.save(&records).await?;
        Ok(true)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        self.load().await.map(|_| ())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
