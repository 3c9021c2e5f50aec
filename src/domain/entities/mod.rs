//! Core data structures of the redirect service.
//!
//! # Entity Types
//!
//! - [`RedirectRecord`] - A `(path, url)` pair decoded from a config document
//! - [`PathTable`] - An exact-match lookup table built from records
//!
//! Both are plain data without I/O; sources in the infrastructure layer
//! produce them and the resolution chain consumes them.

pub mod path_table;
pub mod redirect_record;

pub use path_table::PathTable;
pub use redirect_record::RedirectRecord;
