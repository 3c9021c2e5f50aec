//! Repository trait definitions for the domain layer.
//!
//! Implementations live in `crate::infrastructure::persistence`; mock
//! implementations are generated via `mockall` for testing.
//!
//! # Available Repositories
//!
//! - [`RedirectSource`] - Anything that can produce a path table at startup

pub mod redirect_source;

pub use redirect_source::RedirectSource;

#[cfg(test)]
pub use redirect_source::MockRedirectSource;
