//! Chain construction and request resolution.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::chain::{Resolution, ResolverNode, TerminalResponder};
use crate::domain::repositories::RedirectSource;
use crate::error::AppError;
use crate::utils::path_normalizer::normalize_request_path;

/// Owns the installed resolution chain.
///
/// The chain is fully built before the service exists, so every request sees
/// complete, immutable tables.
pub struct ChainService {
    chain: ResolverNode,
    default_path: String,
}

impl ChainService {
    pub fn new(chain: ResolverNode, default_path: impl Into<String>) -> Self {
        Self {
            chain,
            default_path: default_path.into(),
        }
    }

    /// Loads every source in priority order and composes the chain.
    ///
    /// Sources are loaded one after another; the first failure aborts the
    /// whole build.
    ///
    /// # Errors
    ///
    /// Propagates the first [`AppError`] returned by a source.
    pub async fn from_sources(
        sources: &[Arc<dyn RedirectSource>],
        terminal: TerminalResponder,
        default_path: impl Into<String>,
    ) -> Result<Self, AppError> {
        let mut tables = Vec::with_capacity(sources.len());

        for source in sources {
            let table = source.load().await?;
            info!(
                source = %source.describe(),
                entries = table.len(),
                "Redirect source loaded"
            );
            tables.push(table);
        }

        Ok(Self::new(
            ResolverNode::build(tables, terminal),
            default_path,
        ))
    }

    /// Normalizes `raw_path` and walks the chain.
    pub fn resolve(&self, raw_path: &str) -> Resolution<'_> {
        let path = normalize_request_path(raw_path, &self.default_path);
        let resolution = self.chain.resolve(&path);

        if let Resolution::Terminal(_) = resolution {
            debug!(path = %path, "No redirect matched, using terminal responder");
        }

        resolution
    }

    pub fn chain(&self) -> &ResolverNode {
        &self.chain
    }

    pub fn default_path(&self) -> &str {
        &self.default_path
    }
}
