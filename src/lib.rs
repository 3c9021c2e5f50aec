//! # Redirect Chain
//!
//! A path redirect service built with Axum and an embedded redb store.
//!
//! Every request path is looked up in an ordered chain of redirect tables.
//! The first table containing the exact path answers with a `302` redirect;
//! when none does, a terminal responder produces a fixed response.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Records, path tables, the resolution chain
//!   and the redirect source trait
//! - **Application Layer** ([`application`]) - Chain construction and lookup
//! - **Infrastructure Layer** ([`infrastructure`]) - Static, file and redb
//!   sources
//! - **API Layer** ([`api`]) - The catch-all handler and tracing middleware
//!
//! ## Sources
//!
//! - JSON or YAML config files
//! - A redb store, created and seeded from a JSON dataset on first use
//! - A built-in static table
//!
//! ## Quick Start
//!
//! ```bash
//! echo '[{"path": "/go", "url": "https://go.dev"}]' > redirects.json
//! cargo run
//! curl -i localhost:8080/go
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::ChainService;
    pub use crate::domain::chain::{Resolution, ResolverNode, TerminalResponder};
    pub use crate::domain::entities::{PathTable, RedirectRecord};
    pub use crate::domain::repositories::RedirectSource;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
    pub use crate::utils::record_parser::{ConfigFormat, parse_records};
}
