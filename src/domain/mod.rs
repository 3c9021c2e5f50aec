//! Domain layer: redirect data and the resolution chain.
//!
//! # Architecture
//!
//! - [`entities`] - Redirect records and path tables
//! - [`chain`] - Prioritized fallback lookup ending in a terminal responder
//! - [`repositories`] - The [`repositories::RedirectSource`] contract
//!
//! # Resolution Flow
//!
//! 1. Each configured [`repositories::RedirectSource`] is loaded into a
//!    [`entities::PathTable`] at startup
//! 2. Tables are composed into a [`chain::ResolverNode`] list in priority order
//! 3. The HTTP layer resolves every request path against the chain

pub mod chain;
pub mod entities;
pub mod repositories;
