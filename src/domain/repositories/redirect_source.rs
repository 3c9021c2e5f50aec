//! Repository trait for pluggable redirect sources.

use crate::domain::entities::PathTable;
use crate::error::AppError;
use async_trait::async_trait;

/// A source of redirects that can be materialized into a [`PathTable`].
///
/// Sources are loaded once at startup, in chain order. A failing source aborts
/// startup; there is no partial chain.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::StaticRedirectSource`] - In-memory table
/// - [`crate::infrastructure::persistence::FileRedirectSource`] - JSON/YAML config file
/// - [`crate::infrastructure::persistence::StoreRedirectSource`] - Seeded redb store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedirectSource: Send + Sync {
    /// Short human-readable description used in logs.
    fn describe(&self) -> String;

    /// Loads the full contents of the source.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MalformedConfig`] for undecodable config bytes,
    /// [`AppError::Io`] when the backing file cannot be read, and
    /// [`AppError::StoreUnavailable`] / [`AppError::SeedFailure`] for the
    /// persistent store.
    async fn load(&self) -> Result<PathTable, AppError>;
}
