//! HTTP server initialization and runtime setup.
//!
//! Loads every redirect source, installs the chain, and runs the Axum server
//! until a shutdown signal arrives.

use crate::application::services::ChainService;
use crate::config::{Config, SourceKind};
use crate::domain::chain::TerminalResponder;
use crate::domain::repositories::RedirectSource;
use crate::infrastructure::persistence::{
    FileRedirectSource, StaticRedirectSource, StoreRedirectSource,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;

/// Builds the ordered source list described by `config`.
///
/// The configured source comes first, followed by the built-in table when
/// enabled.
///
/// # Errors
///
/// Returns an error if the store's default dataset cannot be read.
pub async fn build_sources(config: &Config) -> Result<Vec<Arc<dyn RedirectSource>>> {
    let mut sources: Vec<Arc<dyn RedirectSource>> = Vec::new();

    match config.source {
        SourceKind::File(format) => {
            sources.push(Arc::new(FileRedirectSource::new(
                &config.redirects_file,
                format,
            )));
        }
        SourceKind::Store => {
            let store = StoreRedirectSource::with_seeds_file(
                &config.redirects_file,
                &config.store_bucket,
                &config.seeds_file,
                config.store_open_timeout,
            )
            .await
            .context("Failed to read default dataset")?;
            sources.push(Arc::new(store));
        }
    }

    if config.builtin_redirects {
        sources.push(Arc::new(StaticRedirectSource::builtin()));
    }

    Ok(sources)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Redirect sources (file or seeded store, then built-ins)
/// - The resolution chain
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Any redirect source fails to load
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let sources = build_sources(&config).await?;

    let chain_service = ChainService::from_sources(
        &sources,
        TerminalResponder::default(),
        config.default_path.clone(),
    )
    .await
    .context("Failed to build redirect chain")?;
    tracing::info!(
        "Redirect chain installed ({} tables)",
        chain_service.chain().depth()
    );

    let state = AppState::new(Arc::new(chain_service));
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
