//! CLI administration tool for tinylink.
//!
//! Provides commands for creating and inspecting short URLs, database
//! maintenance, and the one-shot migration of a legacy JSON data file into
//! PostgreSQL, without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- shorten "https://example.com"
//!
//! # List all short URLs
//! cargo run --bin admin -- list
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Delete a short URL
//! cargo run --bin admin -- delete aB3xY9
//!
//! # Check database connection / apply migrations
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db init
//!
//! # Import urls.json into PostgreSQL
//! cargo run --bin admin -- migrate --file urls.json
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see `tinylink::config`). `shorten`, `list`, `stats`
//! and `delete` use the configured `STORAGE_BACKEND`; `db` and `migrate`
//! always talk to PostgreSQL.

use tinylink::application::services::UrlService;
use tinylink::config::{self, Config, mask_connection_string};
use tinylink::domain::entities::NewUrlRecord;
use tinylink::domain::repositories::UrlRepository;
use tinylink::infrastructure::persistence::{
    PgUrlRepository, connect_pool, open_repository, run_migrations,
};
use tinylink::utils::code_generator::is_well_formed;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI tool for managing tinylink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Shorten a URL
    Shorten {
        /// URL to shorten (`https://` is added when no scheme is given)
        url: String,
    },

    /// List all short URLs
    List,

    /// Show statistics
    Stats,

    /// Delete a short URL
    Delete {
        /// Short code to delete
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Import a legacy JSON data file into PostgreSQL
    Migrate {
        /// Path to the JSON document
        #[arg(short, long, default_value = "urls.json")]
        file: PathBuf,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply schema migrations
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Shorten { url } => handle_shorten(&config, &url).await?,
        Commands::List => handle_list(&config).await?,
        Commands::Stats => handle_stats(&config).await?,
        Commands::Delete { code, yes } => handle_delete(&config, &code, yes).await?,
        Commands::Db { action } => handle_db_action(&config, action).await?,
        Commands::Migrate { file, yes } => handle_migrate(&config, &file, yes).await?,
    }

    Ok(())
}

async fn open_service(config: &Config) -> Result<UrlService<dyn UrlRepository>> {
    let repository = open_repository(config).await?;
    Ok(UrlService::new(repository, config.base_url.clone()))
}

/// Shortens a URL and prints the short link.
async fn handle_shorten(config: &Config, url: &str) -> Result<()> {
    let service = open_service(config).await?;

    let record = service
        .shorten(url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    println!(
        "{} {}",
        "✅ Your short URL:".green().bold(),
        service.short_url(&record.short_code).bright_yellow().bold()
    );
    println!("   {} {}", "→".bright_black(), record.original_url.cyan());

    Ok(())
}

/// Lists all short URLs, newest first.
///
/// # Output Format
///
/// ```text
/// 📋 Short URLs
///
///   Code     Original URL                              Clicks  Created
///   ────────────────────────────────────────────────────────────────────────────
///   aB3xY9   https://example.com/some/long/path        12      2024-01-15 10:30
/// ```
async fn handle_list(config: &Config) -> Result<()> {
    println!("{}", "📋 Short URLs".bright_blue().bold());
    println!();

    let service = open_service(config).await?;
    let records = service
        .list_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list URLs: {}", e))?;

    if records.is_empty() {
        println!("{}", "  No URLs found".yellow());
        println!();
        println!(
            "  Create one with: {} admin shorten <url>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<10} {:<40} {:<7} {:<16}",
        "Code".bright_white().bold(),
        "Original URL".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(76).bright_black());

    for record in &records {
        println!(
            "  {:<10} {:<40} {:<7} {}",
            record.short_code.cyan(),
            truncate(&record.original_url, 40),
            record.clicks.to_string().bright_green(),
            record
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!(
        "  Total: {}",
        records.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Displays total URL and click counts.
async fn handle_stats(config: &Config) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let service = open_service(config).await?;
    let stats = service
        .stats()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!("  Backend: {}", service.backend_name().bright_white());
    println!(
        "  URLs:    {}",
        stats.total_urls.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:  {}",
        stats.total_clicks.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Deletes a short URL after confirmation (default: No).
async fn handle_delete(config: &Config, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Short URL".bright_blue().bold());
    println!();

    let service = open_service(config).await?;

    let Some(stats) = service
        .url_stats(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
    else {
        println!("{}", format!("⚠️  Short code '{code}' not found").yellow());
        return Ok(());
    };

    println!("  Code:   {}", stats.record.short_code.cyan());
    println!("  URL:    {}", stats.record.original_url.bright_white());
    println!("  Clicks: {}", stats.record.clicks.to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this short URL?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete: {}", e))?;

    println!("{}", "✅ Short URL deleted".green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(config: &Config, action: DbAction) -> Result<()> {
    let pool = connect_pool(config).await?;

    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(&pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
        DbAction::Init => {
            println!("{}", "🛠️  Applying migrations...".bright_blue());

            run_migrations(&pool).await?;

            println!("{}", "✅ Schema is up to date".green().bold());
        }
    }

    Ok(())
}

/// One entry of the legacy JSON document. Every field is optional so a
/// single malformed entry is reported instead of aborting the whole run.
#[derive(Debug, Deserialize)]
struct LegacyEntry {
    short_code: Option<String>,
    original_url: Option<String>,
    clicks: Option<i64>,
}

/// Outcome of importing one legacy entry.
#[derive(Debug, PartialEq, Eq)]
enum MigrateOutcome {
    Migrated,
    AlreadyPresent,
    Invalid(&'static str),
}

/// Imports every valid entry of `file` into PostgreSQL.
///
/// # Flow
///
/// 1. Connect and apply migrations
/// 2. Read the JSON document (a missing file means nothing to migrate)
/// 3. Confirm (unless `--yes` flag)
/// 4. Insert each entry with its click count; codes already in the table are skipped
/// 5. Print the summary and verify the resulting row count
async fn handle_migrate(config: &Config, file: &Path, skip_confirm: bool) -> Result<()> {
    println!("{}", "🚚 JSON → PostgreSQL Migration".bright_blue().bold());
    println!();

    let database_url = config.require_database_url()?;
    println!("  Database: {}", mask_connection_string(database_url).bright_white());
    println!("  Source:   {}", file.display().to_string().bright_white());
    println!();

    let pool = connect_pool(config).await?;
    run_migrations(&pool).await?;
    let repository = PgUrlRepository::new(pool);

    if !tokio::fs::try_exists(file).await? {
        println!(
            "{}",
            format!("⚠️  No {} file found. Nothing to migrate.", file.display()).yellow()
        );
        return Ok(());
    }

    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let entries: Vec<LegacyEntry> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    if entries.is_empty() {
        println!("{}", "⚠️  JSON file is empty. Nothing to migrate.".yellow());
        return Ok(());
    }

    println!("  Found {} URLs to migrate", entries.len().to_string().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Migrate these URLs into PostgreSQL?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let before = repository
        .aggregate_stats()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .total_urls;

    let total = entries.len();
    let mut migrated = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;

    for (i, entry) in entries.into_iter().enumerate() {
        let position = format!("[{}/{}]", i + 1, total).bright_black();
        let code = entry.short_code.clone().unwrap_or_else(|| "unknown".into());

        match migrate_entry(&repository, entry).await {
            Ok(MigrateOutcome::Migrated) => {
                migrated += 1;
                println!("  {} {} {}", position, "✓".green(), code.cyan());
            }
            Ok(MigrateOutcome::AlreadyPresent) => {
                skipped += 1;
                println!("  {} {} {} already present", position, "•".yellow(), code.cyan());
            }
            Ok(MigrateOutcome::Invalid(reason)) => {
                failed += 1;
                println!("  {} {} {}: {}", position, "✗".red(), code.cyan(), reason);
            }
            Err(e) => {
                failed += 1;
                println!("  {} {} {}: {}", position, "✗".red(), code.cyan(), e);
            }
        }
    }

    println!();
    println!("{}", "Summary".bright_white().bold());
    println!("  Migrated:        {}", migrated.to_string().green().bold());
    println!("  Already present: {}", skipped.to_string().yellow());
    println!("  Failed:          {}", failed.to_string().red());
    println!("  Total processed: {}", total);
    println!();

    let after = repository
        .aggregate_stats()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to verify migration: {}", e))?
        .total_urls;

    let expected = before + migrated as i64;
    if after == expected {
        println!(
            "{}",
            format!("✅ Verification passed: database holds {after} URLs")
                .green()
                .bold()
        );
    } else {
        println!(
            "{}",
            format!("⚠️  Expected {expected} URLs but found {after}").yellow()
        );
    }

    println!();
    println!(
        "  Your original data is still in {}. Consider backing it up before removing it.",
        file.display()
    );

    Ok(())
}

async fn migrate_entry(
    repository: &PgUrlRepository,
    entry: LegacyEntry,
) -> Result<MigrateOutcome> {
    let (Some(code), Some(url)) = (entry.short_code, entry.original_url) else {
        return Ok(MigrateOutcome::Invalid("missing short_code or original_url"));
    };

    if !is_well_formed(&code) {
        return Ok(MigrateOutcome::Invalid("short_code is not 1-10 alphanumerics"));
    }

    if url.trim().is_empty() {
        return Ok(MigrateOutcome::Invalid("original_url is empty"));
    }

    if url.chars().any(char::is_control) {
        return Ok(MigrateOutcome::Invalid("original_url contains control characters"));
    }

    if repository.find_by_code(&code).await?.is_some() {
        return Ok(MigrateOutcome::AlreadyPresent);
    }

    let clicks = entry.clicks.unwrap_or(0);
    repository
        .insert(NewUrlRecord::new(code, url).with_clicks(clicks))
        .await?;

    Ok(MigrateOutcome::Migrated)
}

/// Shortens `s` to `max` characters, marking the cut with `…`.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }

    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
