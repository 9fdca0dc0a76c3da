//! CLI administration tool for short-now.
//!
//! Manages URL records and checks the database without going through the
//! HTTP API. Uses the same rules as the service, so codes are validated and
//! the add policy (reuse, conflict, force) applies here too.
//!
//! # Usage
//!
//! ```bash
//! # Add a mapping with a generated code
//! cargo run --bin admin -- url add https://example.com
//!
//! # Add with a custom code, overwriting an existing one
//! cargo run --bin admin -- url add https://example.org --short my-link --force
//!
//! # Look up by code or by long URL
//! cargo run --bin admin -- url get --type short my-link
//! cargo run --bin admin -- url get --type long https://example.org
//!
//! # List a page of records
//! cargo run --bin admin -- url list --offset 0 --limit 20
//!
//! # Remove by code or by long URL
//! cargo run --bin admin -- url remove --type short my-link
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; `DATABASE_URL` (or the `DB_*` parts) is required.

use short_now::application::services::{MappingOutcome, MappingService};
use short_now::config::{self, mask_connection_string};
use short_now::domain::entities::UrlRecord;
use short_now::domain::filter::MatchType;
use short_now::infrastructure::persistence::PgUrlRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing short-now.
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
    /// Manage URL records
    Url {
        #[command(subcommand)]
        action: UrlAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UrlAction {
    /// Add a mapping
    Add {
        /// Destination URL (http or https)
        long_url: String,

        /// Custom short code (generated if omitted)
        #[arg(short, long)]
        short: Option<String>,

        /// Repoint the code if it is already taken
        #[arg(short, long)]
        force: bool,
    },

    /// Look up one record
    Get {
        /// Which side to match: `short` or `long`
        #[arg(short = 't', long = "type", value_parser = parse_match_type)]
        match_type: MatchType,

        value: String,
    },

    /// List records in store order
    List {
        #[arg(long, default_value_t = 0)]
        offset: u64,

        #[arg(long, default_value_t = 20)]
        limit: u64,
    },

    /// Remove one record
    Remove {
        /// Which side to match: `short` or `long`
        #[arg(short = 't', long = "type", value_parser = parse_match_type)]
        match_type: MatchType,

        value: String,

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

    /// Show database info
    Info,
}

fn parse_match_type(value: &str) -> Result<MatchType, String> {
    value
        .parse()
        .map_err(|_| "expected `short` or `long`".to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Url { action } => {
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;

            let repository = Arc::new(PgUrlRepository::new(Arc::new(pool.clone())));
            let service = MappingService::new(
                repository,
                config.validate_short_codes,
                config.list_max_limit,
            );
            handle_url_action(action, &service).await?
        }
        Commands::Db { action } => handle_db_action(action, &pool, &config.database_url).await?,
    }

    pool.close().await;

    Ok(())
}

/// Dispatches record management commands.
async fn handle_url_action(action: UrlAction, service: &MappingService) -> Result<()> {
    match action {
        UrlAction::Add {
            long_url,
            short,
            force,
        } => add_url(service, &long_url, short, force).await,
        UrlAction::Get { match_type, value } => get_url(service, match_type, &value).await,
        UrlAction::List { offset, limit } => list_urls(service, offset, limit).await,
        UrlAction::Remove {
            match_type,
            value,
            yes,
        } => remove_url(service, match_type, &value, yes).await,
    }
}

async fn add_url(
    service: &MappingService,
    long_url: &str,
    short: Option<String>,
    force: bool,
) -> Result<()> {
    println!("{}", "🔗 Add URL".bright_blue().bold());
    println!();

    let mapping = service
        .add(long_url, short, force)
        .await
        .context("Failed to add URL")?;

    let headline = match mapping.outcome {
        MappingOutcome::Created => mapping.outcome.message().green().bold(),
        MappingOutcome::Reused => mapping.outcome.message().yellow().bold(),
        MappingOutcome::Updated => mapping.outcome.message().cyan().bold(),
    };
    println!("{} {}", "✅".green(), headline);
    println!();
    print_record(&mapping.record);
    println!();

    Ok(())
}

async fn get_url(service: &MappingService, match_type: MatchType, value: &str) -> Result<()> {
    let record = service
        .lookup(match_type, value)
        .await
        .context("Failed to look up URL")?;

    match record {
        Some(record) => print_record(&record),
        None => println!("{}", format!("  No record with {match_type} = {value}").yellow()),
    }

    Ok(())
}

/// Lists a page of records.
///
/// # Output Format
///
/// ```text
/// 📋 URLs
///
///   ID    Short              Long
///   ──────────────────────────────────────────────────────────────
///   1     V1StGXR8Z5jd       https://example.com
/// ```
async fn list_urls(service: &MappingService, offset: u64, limit: u64) -> Result<()> {
    println!("{}", "📋 URLs".bright_blue().bold());
    println!();

    let records = service
        .list(offset, limit)
        .await
        .context("Failed to list URLs")?;

    if records.is_empty() {
        println!("{}", "  No records found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<18} {}",
        "ID".bright_white().bold(),
        "Short".bright_white().bold(),
        "Long".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for record in &records {
        println!(
            "  {:<5} {:<18} {}",
            record.id.to_string().bright_black(),
            record.short_url.cyan(),
            record.long_url
        );
    }

    println!();
    println!(
        "  Shown: {} (offset {})",
        records.len().to_string().bright_white().bold(),
        offset
    );
    println!();

    Ok(())
}

/// Removes one record after confirmation (default: No).
async fn remove_url(
    service: &MappingService,
    match_type: MatchType,
    value: &str,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🗑️  Remove URL".bright_blue().bold());
    println!();

    let Some(record) = service
        .lookup(match_type, value)
        .await
        .context("Failed to look up URL")?
    else {
        println!("{}", format!("  No record with {match_type} = {value}").yellow());
        return Ok(());
    };

    print_record(&record);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Remove this record?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let removal = service
        .remove(match_type, value)
        .await
        .context("Failed to remove URL")?;

    println!(
        "{}",
        format!("✅ Removed {} record(s)", removal.deleted_count)
            .green()
            .bold()
    );
    println!();

    Ok(())
}

fn print_record(record: &UrlRecord) {
    println!("  ID:    {}", record.id.to_string().bright_black());
    println!("  Short: {}", record.short_url.cyan());
    println!("  Long:  {}", record.long_url.bright_white());
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool, database_url: &str) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            // Fails before the first migration has created the table.
            let records: Option<i64> = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
                .fetch_one(pool)
                .await
                .ok();

            println!("  Connection: {}", mask_connection_string(database_url));
            println!("  PostgreSQL: {}", version.bright_white());
            match records {
                Some(count) => println!(
                    "  Records:    {}",
                    count.to_string().bright_green().bold()
                ),
                None => println!("  Records:    {}", "table not created yet".yellow()),
            }
            println!();
        }
    }

    Ok(())
}
