//! CLI administration tool for shorturl.
//!
//! Runs the same services as the HTTP server directly against the database.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin shorturl-admin -- shorten github.com
//!
//! # Show the destination of a token (does not count as a visit)
//! cargo run --bin shorturl-admin -- lookup aB3x
//!
//! # View statistics
//! cargo run --bin shorturl-admin -- stats
//!
//! # Check database connection and apply migrations
//! cargo run --bin shorturl-admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `shorturl::config`.

use shorturl::config::{self, Config, mask_connection_string};
use shorturl::infrastructure::persistence::Database;
use shorturl::prelude::{AppError, StatsReport};
use shorturl::state::AppState;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for managing shorturl.
#[derive(Parser)]
#[command(name = "shorturl-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Shorten a URL and print its token
    Shorten {
        /// URL to shorten (scheme optional)
        url: String,
    },

    /// Print the destination of a token
    Lookup {
        token: String,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and apply migrations
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let database = Database::connect(&config)
        .await
        .context("Failed to connect to database")?;

    let result = run(cli.command, &database, &config).await;

    database.close().await;
    result
}

/// Dispatches a command against an open database.
async fn run(command: Commands, database: &Database, config: &Config) -> Result<()> {
    if let Commands::Db {
        action: DbAction::Check,
    } = command
    {
        return db_check(database, config).await;
    }

    database.migrate().await?;
    let state = AppState::new(database.clone(), config);

    match command {
        Commands::Shorten { url } => shorten(&state, &url).await,
        Commands::Lookup { token } => lookup(&state, &token).await,
        Commands::Stats => stats(&state).await,
        Commands::Db { .. } => Ok(()),
    }
}

/// Shortens a URL, reusing the existing token if it was shortened before.
async fn shorten(state: &AppState, url: &str) -> Result<()> {
    let link = state.link_service.shorten(url).await.map_err(describe)?;

    println!("{}", "🔗 Short link".bright_blue().bold());
    println!();
    println!("  URL:       {}", link.url.cyan());
    println!("  Token:     {}", link.token.bright_white().bold());
    println!(
        "  Short URL: {}",
        state.link_service.short_url(&link.token).bright_green()
    );
    println!(
        "  Created:   {}",
        link.created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!();

    Ok(())
}

/// Prints the destination of a token without recording a visit.
async fn lookup(state: &AppState, token: &str) -> Result<()> {
    match state.link_service.get_link_by_token(token).await {
        Ok(link) => {
            println!("  {} → {}", link.token.bright_white().bold(), link.url.cyan());
            Ok(())
        }
        Err(AppError::NotFound { .. }) => {
            println!("{}", format!("⚠️  Unknown token '{token}'").yellow());
            Ok(())
        }
        Err(e) => Err(describe(e)),
    }
}

/// Displays link and visit statistics.
async fn stats(state: &AppState) -> Result<()> {
    let report = state.stats_service.summarize().await.map_err(describe)?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &StatsReport) {
    let no_data = || "no data".bright_black().to_string();
    let timestamp = |ts: Option<chrono::DateTime<chrono::Utc>>| {
        ts.map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(no_data)
    };

    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();
    println!(
        "  Links:        {}",
        report.total_links.to_string().bright_green().bold()
    );
    println!("  First added:  {}", timestamp(report.first_created_at));
    println!("  Last added:   {}", timestamp(report.last_created_at));
    println!(
        "  Total opens:  {}",
        report.total_visits.to_string().bright_green().bold()
    );

    match &report.top_token {
        Some(top) => println!(
            "  Most opened:  {} ({} visits)",
            top.token.cyan(),
            top.visits
        ),
        None => println!("  Most opened:  {}", no_data()),
    }

    println!();
    println!("{}", "  Visits per day".bright_white());

    if report.visits_per_day.is_empty() {
        println!("    {}", no_data());
    }
    for daily in &report.visits_per_day {
        println!(
            "    {}  {}",
            daily.day.format("%Y-%m-%d").to_string().bright_black(),
            daily.visits
        );
    }
    println!();
}

/// Verifies connectivity and brings the schema up to date.
async fn db_check(database: &Database, config: &Config) -> Result<()> {
    println!("{}", "🔍 Checking database connection...".bright_blue());
    println!(
        "  {} ({})",
        mask_connection_string(&config.database_url).bright_black(),
        database.backend().as_str()
    );

    database.ping().await.context("Database ping failed")?;
    println!("{}", "✅ Database connection OK".green().bold());

    database.migrate().await?;
    println!("{}", "✅ Migrations up to date".green().bold());

    Ok(())
}

fn describe(e: AppError) -> anyhow::Error {
    anyhow::anyhow!("{} ({}): {}", e, e.code(), e.to_error_info().details)
}
