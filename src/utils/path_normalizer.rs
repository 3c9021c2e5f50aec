//! Request path normalization for chain lookups.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

/// Reduces a raw request target to the bare path used as a lookup key.
///
/// # Normalization Rules
///
/// 1. Everything from the first `?` or `#` is dropped
/// 2. An empty path or `/` is replaced by `default_path`
/// 3. Percent-escapes are decoded as UTF-8 (`/my%20page` → `/my page`); a
///    path that does not decode to valid UTF-8 is used as received
/// 4. Nothing else changes: case and trailing slashes are kept, so lookups
///    stay exact
///
/// # Examples
///
/// ```
/// use redirect_chain::utils::path_normalizer::normalize_request_path;
///
/// assert_eq!(normalize_request_path("/go?ref=x", "/"), "/go");
/// assert_eq!(normalize_request_path("/my%20page", "/"), "/my page");
/// assert_eq!(normalize_request_path("", "/home"), "/home");
/// ```
pub fn normalize_request_path<'a>(raw: &'a str, default_path: &'a str) -> Cow<'a, str> {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let path = &raw[..end];

    if path.is_empty() || path == "/" {
        return Cow::Borrowed(default_path);
    }

    percent_decode_str(path)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(path))
}
