//! CLI administration tool for shortlink.
//!
//! Inspects the link store directly, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Link count and total redirects
//! cargo run --bin admin -- stats
//!
//! # Show one link
//! cargo run --bin admin -- lookup abc123
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! `DATABASE_URL` or the `DB_*` components, as for the server.

use shortlink::config::{self, StorageBackend};
use shortlink::domain::repositories::LinkRepository;
use shortlink::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show link count and total redirects
    Stats,

    /// Show the stored link for a short code
    Lookup {
        /// Short code, e.g. "abc123"
        code: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::Config::from_env()?;
    if config.storage_backend != StorageBackend::Postgres {
        anyhow::bail!("admin only works with the postgres storage backend");
    }
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(database_url)
        .await
        .context("Failed to connect to database")?;
    let repo = PgLinkRepository::new(Arc::new(pool));

    match cli.command {
        Commands::Stats => handle_stats(&repo).await?,
        Commands::Lookup { code } => handle_lookup(&repo, &code).await?,
        Commands::Db { action } => handle_db_action(action, &repo).await?,
    }

    Ok(())
}

async fn handle_stats(repo: &dyn LinkRepository) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let links = repo.count().await?;
    let redirects = repo.total_visits().await?;

    println!("  Links:     {}", links.to_string().bright_green().bold());
    println!(
        "  Redirects: {}",
        redirects.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

async fn handle_lookup(repo: &dyn LinkRepository, code: &str) -> Result<()> {
    match repo.find_by_code(code).await? {
        Some(link) => {
            println!("{}", link.code.bright_blue().bold());
            println!("  URL:     {}", link.original_url.bright_white());
            println!("  Visits:  {}", link.visits.to_string().bright_green());
            println!("  Created: {}", link.created_at.to_rfc3339());
        }
        None => {
            println!("{}", format!("No link with code '{code}'").yellow());
        }
    }

    Ok(())
}

async fn handle_db_action(action: DbAction, repo: &dyn LinkRepository) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            if repo.health_check().await {
                println!("{}", "Database connection OK".green().bold());
            } else {
                anyhow::bail!("Database health check failed");
            }
        }
    }

    Ok(())
}
