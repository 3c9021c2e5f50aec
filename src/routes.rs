//! Top-level router configuration.
//!
//! # Route Structure
//!
//! There are no named routes: every request, whatever its method or path,
//! goes to [`redirect_handler`], which answers with a `302` redirect or the
//! terminal response.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//!
//! Paths are not normalized by middleware; trailing slashes stay significant
//! for lookups.

use crate::api::handlers::redirect_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;

/// Constructs the application router around the installed chain.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .fallback(redirect_handler)
        .with_state(state)
        .layer(tracing::layer())
}
