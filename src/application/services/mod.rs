//! Business logic services for the application layer.

pub mod chain_service;

pub use chain_service::ChainService;
