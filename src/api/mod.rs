//! HTTP layer: turns requests into chain lookups and framed responses.
//!
//! # Modules
//!
//! - [`handlers`] - The catch-all redirect handler
//! - [`middleware`] - Request tracing

pub mod handlers;
pub mod middleware;
