//! Infrastructure layer for external integrations.
//!
//! This layer implements the interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Static, file and redb-backed redirect sources

pub mod persistence;
