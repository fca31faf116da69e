//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::warn;

use crate::domain::entities::{NewUrlRecord, UrlRecord, UrlStats};
use crate::domain::errors::StorageError;
use crate::domain::repositories::UrlRepository;
use crate::utils::db_error::is_unique_violation_on_code;

/// PostgreSQL repository for URL records.
///
/// Owns a connection pool; each call checks a connection out for the
/// duration of one statement.
pub struct PgUrlRepository {
    pool: PgPool,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool, for migrations and admin tooling.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(sqlx::FromRow)]
struct UrlRow {
    short_code: String,
    original_url: String,
    clicks: i64,
    created_at: DateTime<Utc>,
}

impl From<UrlRow> for UrlRecord {
    fn from(row: UrlRow) -> Self {
        UrlRecord::new(row.short_code, row.original_url, row.clicks, row.created_at)
    }
}

#[derive(sqlx::FromRow)]
struct StatsRow {
    total_urls: i64,
    total_clicks: i64,
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn find_by_original_url(&self, url: &str) -> Result<Option<UrlRecord>, StorageError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT short_code, original_url, clicks, created_at
            FROM urls
            WHERE original_url = $1
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, StorageError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT short_code, original_url, clicks, created_at
            FROM urls
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, StorageError> {
        let result = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (short_code, original_url, clicks)
            VALUES ($1, $2, $3)
            RETURNING short_code, original_url, clicks, created_at
            "#,
        )
        .bind(&new_record.short_code)
        .bind(&new_record.original_url)
        .bind(new_record.clicks)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e) if is_unique_violation_on_code(&e) => {
                warn!(
                    code = %new_record.short_code,
                    "Short code taken by a concurrent insert, returning stored record"
                );

                self.find_by_code(&new_record.short_code)
                    .await?
                    .ok_or_else(|| {
                        StorageError::Query(format!(
                            "short code {} conflicted but could not be re-read",
                            new_record.short_code
                        ))
                    })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn increment_clicks(&self, code: &str) -> Result<(), StorageError> {
        sqlx::query("UPDATE urls SET clicks = clicks + 1 WHERE short_code = $1")
            .bind(code)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<UrlRecord>, StorageError> {
        let rows = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT short_code, original_url, clicks, created_at
            FROM urls
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(UrlRecord::from).collect())
    }

    async fn aggregate_stats(&self) -> Result<UrlStats, StorageError> {
        let row = sqlx::query_as::<_, StatsRow>(
            r#"
            SELECT
                COUNT(*) AS total_urls,
                COALESCE(SUM(clicks), 0)::BIGINT AS total_clicks
            FROM urls
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(UrlStats {
            total_urls: row.total_urls,
            total_clicks: row.total_clicks,
        })
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM urls WHERE short_code = $1")
            .bind(code)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
