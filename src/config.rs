//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before any redirect
//! source is read.
//!
//! ## Selecting the redirect source
//!
//! ```bash
//! # Seeded embedded store (default): ./redirects.db, seeded from redirects.json
//! export REDIRECTS_SOURCE="db"
//! export SEEDS_FILE="redirects.json"
//!
//! # Declarative file: ./redirects.yaml
//! export REDIRECTS_SOURCE="yaml"
//! export REDIRECTS_FILE="redirects"
//! ```
//!
//! When the file name in `REDIRECTS_FILE` has no extension, the source name is
//! appended (`redirects` + `db` → `redirects.db`).
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `REDIRECTS_SOURCE` - `json`, `yaml` or `db` (default: `db`)
//! - `REDIRECTS_FILE` - Config or store file (default: `redirects`)
//! - `SEEDS_FILE` - Default dataset for the store (default: `redirects.json`)
//! - `STORE_BUCKET` - Bucket name (default: `redirectRoutes`)
//! - `STORE_OPEN_TIMEOUT_MS` - Store lock wait (default: 1000)
//! - `DEFAULT_PATH` - Lookup path for `/` requests (default: `/`)
//! - `BUILTIN_REDIRECTS` - Serve built-in redirects after the source (default: `true`)

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::infrastructure::persistence::redb_store::{DEFAULT_BUCKET, DEFAULT_OPEN_TIMEOUT};
use crate::utils::record_parser::ConfigFormat;

/// Which redirect source sits at the head of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// A declarative config file in the given format.
    File(ConfigFormat),
    /// The embedded store, seeded from `SEEDS_FILE` on first use.
    Store,
}

impl SourceKind {
    /// Extension appended to extension-less file names.
    pub fn extension(&self) -> &'static str {
        match self {
            SourceKind::File(format) => format.as_str(),
            SourceKind::Store => "db",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for SourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("db") {
            return Ok(SourceKind::Store);
        }
        s.parse::<ConfigFormat>()
            .map(SourceKind::File)
            .map_err(|_| anyhow::anyhow!("REDIRECTS_SOURCE must be 'json', 'yaml' or 'db', got '{s}'"))
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub source: SourceKind,
    /// Config or store file, extension already resolved.
    pub redirects_file: PathBuf,
    /// Default dataset read when the store source is selected.
    pub seeds_file: PathBuf,
    pub store_bucket: String,
    pub store_open_timeout: Duration,
    /// Lookup key used for empty and `/` request paths.
    pub default_path: String,
    /// When true, the built-in static table follows the configured source.
    pub builtin_redirects: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `REDIRECTS_SOURCE` or `STORE_OPEN_TIMEOUT_MS` cannot
    /// be parsed.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let source: SourceKind = env::var("REDIRECTS_SOURCE")
            .unwrap_or_else(|_| "db".to_string())
            .parse()?;

        let redirects_file = env::var("REDIRECTS_FILE").unwrap_or_else(|_| "redirects".to_string());
        let redirects_file = resolve_file_path(Path::new(&redirects_file), source.extension());

        let seeds_file = env::var("SEEDS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("redirects.json"));

        let store_bucket = env::var("STORE_BUCKET").unwrap_or_else(|_| DEFAULT_BUCKET.to_string());

        let store_open_timeout = match env::var("STORE_OPEN_TIMEOUT_MS") {
            Ok(v) => Duration::from_millis(
                v.parse()
                    .with_context(|| format!("STORE_OPEN_TIMEOUT_MS must be a number, got '{v}'"))?,
            ),
            Err(_) => DEFAULT_OPEN_TIMEOUT,
        };

        let default_path = env::var("DEFAULT_PATH").unwrap_or_else(|_| "/".to_string());

        let builtin_redirects = env::var("BUILTIN_REDIRECTS")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(true);

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            source,
            redirects_file,
            seeds_file,
            store_bucket,
            store_open_timeout,
            default_path,
            builtin_redirects,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `store_bucket` is empty
    /// - `store_open_timeout` is zero
    /// - `default_path` does not start with `/`
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.store_bucket.is_empty() {
            anyhow::bail!("STORE_BUCKET must not be empty");
        }

        if self.store_open_timeout.is_zero() {
            anyhow::bail!("STORE_OPEN_TIMEOUT_MS must be greater than 0");
        }

        if !self.default_path.starts_with('/') {
            anyhow::bail!(
                "DEFAULT_PATH must start with '/', got '{}'",
                self.default_path
            );
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Redirect source: {}", self.source);
        tracing::info!("  Redirects file: {}", self.redirects_file.display());

        if self.source == SourceKind::Store {
            tracing::info!("  Seeds file: {}", self.seeds_file.display());
            tracing::info!("  Bucket: {}", self.store_bucket);
            tracing::info!(
                "  Store open timeout: {}ms",
                self.store_open_timeout.as_millis()
            );
        }

        tracing::info!("  Default path: {}", self.default_path);
        tracing::info!("  Built-in redirects: {}", self.builtin_redirects);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Appends `extension` when the file name has none.
///
/// `redirects` → `redirects.yaml`; `conf/redirects.txt` is kept as is.
pub fn resolve_file_path(file: &Path, extension: &str) -> PathBuf {
    if file.extension().is_some() {
        file.to_path_buf()
    } else {
        file.with_extension(extension)
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
