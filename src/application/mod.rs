//! Application layer services.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers.
//!
//! # Available Services
//!
//! - [`services::chain_service::ChainService`] - Builds the resolution chain
//!   from redirect sources and resolves request paths against it

pub mod services;
