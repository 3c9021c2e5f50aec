//! Shared state injected into HTTP handlers.

use std::sync::Arc;

use crate::application::services::ChainService;

/// Handler state: the installed, read-only resolution chain.
#[derive(Clone)]
pub struct AppState {
    pub chain_service: Arc<ChainService>,
}

impl AppState {
    pub fn new(chain_service: Arc<ChainService>) -> Self {
        Self { chain_service }
    }
}
