//! Redirect source implementations.
//!
//! Concrete implementations of [`crate::domain::repositories::RedirectSource`].
//!
//! # Sources
//!
//! - [`StaticRedirectSource`] - Table built in code
//! - [`FileRedirectSource`] - JSON/YAML config file
//! - [`StoreRedirectSource`] - redb store seeded from a default dataset
//!
//! [`redb_store`] holds the transactional open/seed/load logic used by the
//! store source and the admin tool.

pub mod file_source;
pub mod redb_store;
pub mod static_source;
pub mod store_source;

pub use file_source::FileRedirectSource;
pub use static_source::StaticRedirectSource;
pub use store_source::StoreRedirectSource;
