//! Exact-match table from request path to redirect target.

use std::collections::HashMap;

use super::RedirectRecord;

/// In-memory mapping from path to target URL.
///
/// Built once at startup and only read afterwards, so it can be shared across
/// request tasks without locking. Keys are compared byte for byte: `/a`, `/A`
/// and `/a/` are three different entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTable {
    entries: HashMap<String, String>,
}

impl PathTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from records in source order.
    ///
    /// When a path occurs more than once, the last record wins.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RedirectRecord>,
    {
        records.into_iter().collect()
    }

    /// Returns the target URL for an exact path match.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns entries sorted by path, for stable display.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by_key(|(path, _)| *path);
        entries
    }
}

impl FromIterator<(String, String)> for PathTable {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut entries = HashMap::new();
        for (path, url) in iter {
            entries.insert(path, url);
        }
        Self { entries }
    }
}

impl FromIterator<RedirectRecord> for PathTable {
    fn from_iter<T: IntoIterator<Item = RedirectRecord>>(iter: T) -> Self {
        iter.into_iter().map(|r| (r.path, r.url)).collect()
    }
}
