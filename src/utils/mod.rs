//! Helpers shared by the sources and the HTTP layer.
//!
//! - [`record_parser`] - JSON/YAML decoding of redirect configs
//! - [`path_normalizer`] - Request path normalization for lookups

pub mod path_normalizer;
pub mod record_parser;
