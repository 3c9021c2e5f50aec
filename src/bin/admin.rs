//! CLI administration tool for redirect-chain.
//!
//! Inspects and seeds the redirect store and checks config files offline,
//! without starting the HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # Show every redirect in the store bucket
//! cargo run --bin admin -- store dump --file redirects.db
//!
//! # Create and seed the store ahead of the first server start
//! cargo run --bin admin -- store seed --file redirects.db --seeds redirects.json
//!
//! # Validate a config file
//! cargo run --bin admin -- config check redirects.yaml
//! ```
//!
//! The store must not be held by a running server: redb allows a single
//! handle per file, and the admin tool waits at most `--timeout-ms` for it.

use redirect_chain::domain::entities::PathTable;
use redirect_chain::infrastructure::persistence::redb_store::{
    DEFAULT_BUCKET, open_store, snapshot,
};
use redirect_chain::utils::record_parser::{ConfigFormat, parse_records};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI tool for managing redirect-chain.
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
    /// Inspect or seed the redirect store
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },

    /// Declarative config operations
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Store subcommands.
#[derive(Subcommand)]
enum StoreAction {
    /// Print every redirect in the bucket
    Dump {
        /// Store file
        #[arg(short, long, default_value = "redirects.db")]
        file: PathBuf,

        /// Bucket name
        #[arg(short, long, default_value = DEFAULT_BUCKET)]
        bucket: String,

        /// Maximum wait for the store lock
        #[arg(long, default_value_t = 1000)]
        timeout_ms: u64,
    },

    /// Create and seed the bucket if it does not exist yet
    Seed {
        /// Store file
        #[arg(short, long, default_value = "redirects.db")]
        file: PathBuf,

        /// Bucket name
        #[arg(short, long, default_value = DEFAULT_BUCKET)]
        bucket: String,

        /// JSON dataset used when the bucket is created
        #[arg(short, long, default_value = "redirects.json")]
        seeds: PathBuf,

        /// Maximum wait for the store lock
        #[arg(long, default_value_t = 1000)]
        timeout_ms: u64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
enum ConfigAction {
    /// Decode a config file and report its redirects
    Check {
        /// Config file
        file: PathBuf,

        /// Format (`json` or `yaml`); inferred from the extension if omitted
        #[arg(short, long)]
        format: Option<ConfigFormat>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Store { action } => handle_store_action(action),
        Commands::Config { action } => handle_config_action(action),
    }
}

/// Dispatches store commands.
fn handle_store_action(action: StoreAction) -> Result<()> {
    match action {
        StoreAction::Dump {
            file,
            bucket,
            timeout_ms,
        } => dump_store(&file, &bucket, Duration::from_millis(timeout_ms)),
        StoreAction::Seed {
            file,
            bucket,
            seeds,
            timeout_ms,
            yes,
        } => seed_store(&file, &bucket, &seeds, Duration::from_millis(timeout_ms), yes),
    }
}

/// Dispatches config commands.
fn handle_config_action(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Check { file, format } => check_config(&file, format),
    }
}

/// Prints the bucket contents sorted by path.
///
/// Read-only: a missing bucket is reported, never created.
fn dump_store(file: &Path, bucket: &str, timeout: Duration) -> Result<()> {
    println!("{}", "📦 Redirect Store".bright_blue().bold());
    println!();
    println!("  File:   {}", file.display().to_string().cyan());
    println!("  Bucket: {}", bucket.cyan());
    println!();

    match snapshot(file, bucket, timeout)? {
        Some(table) => print_table(&table),
        None => println!(
            "{}",
            "⚠️  Bucket does not exist yet (run `admin store seed`)".yellow()
        ),
    }

    Ok(())
}

/// Opens the store the same way the server does, seeding on first use.
///
/// # Flow
///
/// 1. Confirm creation when the store file does not exist (unless `--yes`)
/// 2. Read the dataset file
/// 3. Open the store; the bucket is seeded only if absent
/// 4. Print the resulting contents
fn seed_store(
    file: &Path,
    bucket: &str,
    seeds: &Path,
    timeout: Duration,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🌱 Seed Redirect Store".bright_blue().bold());
    println!();

    if !file.exists() && !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Create new store at {}?", file.display()))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let dataset = std::fs::read(seeds)
        .with_context(|| format!("Failed to read dataset {}", seeds.display()))?;

    let existed = snapshot_exists(file, bucket, timeout)?;
    let table = open_store(file, bucket, &dataset, timeout)?;

    if existed {
        println!(
            "{}",
            "⚠️  Bucket already existed, dataset was not applied".yellow()
        );
    } else {
        println!("{}", "✅ Bucket created and seeded".green().bold());
    }
    println!();

    print_table(&table);

    Ok(())
}

/// Reports whether `bucket` is already present. A missing file means no bucket;
/// a locked or unreadable store is an error.
fn snapshot_exists(file: &Path, bucket: &str, timeout: Duration) -> Result<bool> {
    if !file.exists() {
        return Ok(false);
    }
    Ok(snapshot(file, bucket, timeout)?.is_some())
}

/// Decodes a config file and reports its redirects.
///
/// Paths that occur more than once are listed: only their last URL is served.
fn check_config(file: &Path, format: Option<ConfigFormat>) -> Result<()> {
    let format = match format {
        Some(f) => f,
        None => file
            .extension()
            .and_then(|e| e.to_str())
            .context("Cannot infer format from file name, pass --format")?
            .parse::<ConfigFormat>()
            .map_err(|e| anyhow::anyhow!(e))?,
    };

    println!("{}", "🔎 Config Check".bright_blue().bold());
    println!();
    println!("  File:   {}", file.display().to_string().cyan());
    println!("  Format: {}", format.to_string().cyan());
    println!();

    let content =
        std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let records = parse_records(&content, format)?;

    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for record in &records {
        if !seen.insert(record.path.as_str()) {
            duplicates.push(record.path.clone());
        }
    }

    let record_count = records.len();
    let table = PathTable::from_records(records);

    println!(
        "  Records: {}",
        record_count.to_string().bright_white().bold()
    );
    for path in &duplicates {
        println!(
            "  {} {} (last occurrence wins)",
            "duplicate".yellow(),
            path.cyan()
        );
    }
    println!();

    print_table(&table);
    println!("{}", "✅ Config is valid".green().bold());

    Ok(())
}

fn print_table(table: &PathTable) {
    if table.is_empty() {
        println!("  {}", "(no redirects)".bright_black());
    }

    for (path, url) in table.sorted() {
        println!("  {:<30} {} {}", path.cyan(), "→".bright_black(), url);
    }

    println!();
    println!(
        "  Total: {}",
        table.len().to_string().bright_white().bold()
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TIMEOUT: Duration = Duration::from_millis(100);

    #[test]
    fn test_snapshot_exists_for_missing_and_empty_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("redirects.db");

        assert!(!snapshot_exists(&path, DEFAULT_BUCKET, TIMEOUT).unwrap());

        drop(redb::Database::create(&path).unwrap());
        assert!(!snapshot_exists(&path, DEFAULT_BUCKET, TIMEOUT).unwrap());

        open_store(&path, DEFAULT_BUCKET, b"[]", TIMEOUT).unwrap();
        assert!(snapshot_exists(&path, DEFAULT_BUCKET, TIMEOUT).unwrap());
    }

    #[test]
    fn test_snapshot_exists_reports_locked_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("redirects.db");
        let _holder = redb::Database::create(&path).unwrap();

        assert!(snapshot_exists(&path, DEFAULT_BUCKET, TIMEOUT).is_err());
    }
}
