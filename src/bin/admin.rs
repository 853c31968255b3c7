//! CLI administration tool for ttl-shortener.
//!
//! Creates, inspects and deletes links directly against the configured store,
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a link that lives for 7 days
//! cargo run --bin admin -- link create https://example.com/page --days 7
//!
//! # Create a link with a custom code
//! cargo run --bin admin -- link create https://example.com --custom spring-sale
//!
//! # Resolve a code (deletes it if expired)
//! cargo run --bin admin -- link resolve spring-sale
//!
//! # Show the stored record without touching it
//! cargo run --bin admin -- link show spring-sale
//!
//! # Delete a link
//! cargo run --bin admin -- link delete spring-sale
//!
//! # Check store connection
//! cargo run --bin admin -- store check
//! ```
//!
//! # Environment Variables
//!
//! Uses the same configuration as the server (`STORE_BACKEND`, `DATABASE_URL`,
//! `REDIS_URL`, `STORE_TIMEOUT_MS`, ...). See [`ttl_shortener::config`].

use ttl_shortener::application::services::{LinkRegistry, MIN_TTL_DAYS};
use ttl_shortener::config::{self, StoreBackend};
use ttl_shortener::domain::entities::{LinkRecord, NewLink};
use ttl_shortener::error::AppError;
use ttl_shortener::infrastructure::persistence::connect_store;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use tracing_subscriber::EnvFilter;

/// CLI tool for managing ttl-shortener links.
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
    /// Manage links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Store operations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Create a new short link
    Create {
        /// Destination URL
        url: String,

        /// Lifetime in days (1-30)
        #[arg(short, long, default_value_t = MIN_TTL_DAYS)]
        days: i64,

        /// Custom short code instead of a generated one
        #[arg(short, long)]
        custom: Option<String>,
    },

    /// Resolve a short code to its destination
    Resolve {
        code: String,
    },

    /// Show the stored record for a short code, live or expired
    Show {
        code: String,
    },

    /// Delete a short link
    Delete {
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Store diagnostic subcommands.
#[derive(Subcommand)]
enum StoreAction {
    /// Check store connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Quiet by default so command output stays readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("ADMIN_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Failed to load configuration")?;

    if config.store_backend == StoreBackend::Memory {
        println!(
            "{}",
            "⚠️  No persistent store configured; changes will not outlive this command".yellow()
        );
        println!();
    }

    let store = connect_store(&config)
        .await
        .context("Failed to connect to link store")?;
    let registry = LinkRegistry::new(store, config.store_timeout());

    let result = match cli.command {
        Commands::Link { action } => handle_link_action(action, &registry).await,
        Commands::Store { action } => handle_store_action(action, &registry).await,
    };

    registry.close().await;

    result
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, registry: &LinkRegistry) -> Result<()> {
    match action {
        LinkAction::Create { url, days, custom } => create_link(registry, url, days, custom).await,
        LinkAction::Resolve { code } => resolve_link(registry, &code).await,
        LinkAction::Show { code } => show_link(registry, &code).await,
        LinkAction::Delete { code, yes } => delete_link(registry, &code, yes).await,
    }
}

/// Creates a link through the same path as `POST /shorten`.
async fn create_link(
    registry: &LinkRegistry,
    url: String,
    days: i64,
    custom: Option<String>,
) -> Result<()> {
    println!("{}", "🔗 Create Link".bright_blue().bold());
    println!();

    let record = registry
        .create(NewLink {
            original_url: url,
            ttl_days: days,
            custom_code: custom,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "✅ Link created successfully!".green().bold());
    println!();
    print_record(&record);
    println!();

    Ok(())
}

/// Resolves a code, deleting it if it has expired.
async fn resolve_link(registry: &LinkRegistry, code: &str) -> Result<()> {
    match registry.resolve(code).await {
        Ok(url) => {
            println!("  {} → {}", code.cyan(), url.bright_white());
            Ok(())
        }
        Err(AppError::NotFound { .. }) => {
            println!("{}", "❌ Link not found or expired".red());
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Failed to resolve link: {}", e)),
    }
}

/// Prints the raw stored record with its live/expired status.
///
/// # Output Format
///
/// ```text
///   Code:     spring-sale
///   URL:      https://example.com
///   Created:  2025-01-01 12:00:00 UTC
///   Expires:  2025-01-08 12:00:00 UTC
///   Status:   LIVE
/// ```
async fn show_link(registry: &LinkRegistry, code: &str) -> Result<()> {
    let record = registry
        .inspect(code)
        .await
        .map_err(|e| anyhow::anyhow!("Store error: {}", e))?;

    match record {
        Some(record) => {
            print_record(&record);
            println!();
        }
        None => println!("{}", "  No record stored under this code".yellow()),
    }

    Ok(())
}

/// Deletes a link with confirmation prompt.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `--yes` is passed
async fn delete_link(registry: &LinkRegistry, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Link".bright_blue().bold());
    println!();

    let record = registry
        .inspect(code)
        .await
        .map_err(|e| anyhow::anyhow!("Store error: {}", e))?
        .context("Link not found")?;

    print_record(&record);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    registry
        .remove(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!();
    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

/// Handles store diagnostic commands.
async fn handle_store_action(action: StoreAction, registry: &LinkRegistry) -> Result<()> {
    match action {
        StoreAction::Check => {
            println!(
                "{}",
                format!("🔍 Checking {} store connection...", registry.backend()).bright_blue()
            );

            registry
                .health_check()
                .await
                .context("Store health check failed")?;

            println!("{}", "✅ Store connection OK".green().bold());
        }
    }

    Ok(())
}

fn print_record(record: &LinkRecord) {
    let status = if record.is_live_at(Utc::now()) {
        "LIVE".green()
    } else {
        "EXPIRED".red()
    };

    println!("  Code:     {}", record.short_code.cyan());
    println!("  URL:      {}", record.original_url.bright_white());
    println!(
        "  Created:  {}",
        record
            .created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!(
        "  Expires:  {}",
        record
            .expires_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!("  Status:   {}", status);
}
