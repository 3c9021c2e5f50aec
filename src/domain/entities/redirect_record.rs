//! Redirect record decoded from a config document.

use serde::{Deserialize, Serialize};

/// A single `(path, url)` pair as it appears in a config document.
///
/// Neither field is validated: `path` is the exact lookup key and `url` is
/// handed back verbatim as the redirect target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectRecord {
    pub path: String,
    pub url: String,
}

impl RedirectRecord {
    pub fn new(path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
        }
    }
}
