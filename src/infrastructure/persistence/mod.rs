//! Storage backend implementations.
//!
//! # Repositories
//!
//! - [`PgUrlRepository`] - PostgreSQL, the primary backend
//! - [`FileUrlRepository`] - single JSON document, for offline or degraded use
//!
//! [`open_repository`] picks one from [`Config::storage_backend`].

pub mod file_url_repository;
pub mod pg_url_repository;

pub use file_url_repository::FileUrlRepository;
pub use pg_url_repository::PgUrlRepository;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::{Config, StorageBackend};
use crate::domain::repositories::UrlRepository;

/// Opens a PostgreSQL pool sized and timed from `config`.
///
/// # Errors
///
/// Returns an error if no database URL is configured or the first
/// connection cannot be established.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let database_url = config.require_database_url()?;

    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}

/// Applies pending schema migrations from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")
}

/// Builds the configured storage backend.
///
/// The PostgreSQL variant connects and migrates before returning; the file
/// variant creates its document if missing.
pub async fn open_repository(config: &Config) -> Result<Arc<dyn UrlRepository>> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = connect_pool(config).await?;
            tracing::info!("Connected to database");

            run_migrations(&pool).await?;
            tracing::info!("Database migrations applied");

            Ok(Arc::new(PgUrlRepository::new(pool)))
        }
        StorageBackend::File => {
            let repository = FileUrlRepository::open(&config.data_file)
                .await
                .with_context(|| {
                    format!("Failed to open data file {}", config.data_file.display())
                })?;

            Ok(Arc::new(repository))
        }
    }
}
