//! Decoding of declarative redirect configs.
//!
//! Both supported formats describe the same document: a sequence of objects
//! with a `path` and a `url` field. Any other field is ignored.
//!
//! ```yaml
//! - path: /some-path
//!   url: https://www.some-url.com/demo
//! ```
//!
//! ```json
//! [{ "path": "/some-path", "url": "https://www.some-url.com/demo" }]
//! ```

use std::fmt;
use std::str::FromStr;

use crate::domain::entities::RedirectRecord;
use crate::error::AppError;

/// Serialization format of a redirect config payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            ConfigFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ConfigFormat::Json),
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            other => Err(format!("unsupported config format '{other}'")),
        }
    }
}

/// Decodes `bytes` into redirect records, preserving source order.
///
/// Empty (or whitespace-only) input and a `null` document both yield an empty
/// list. Paths and URLs are passed through untouched.
///
/// # Errors
///
/// Returns [`AppError::MalformedConfig`] with the decoder's message and, when
/// the format reports it, the line and column of the failure.
pub fn parse_records(bytes: &[u8], format: ConfigFormat) -> Result<Vec<RedirectRecord>, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let records: Option<Vec<RedirectRecord>> = match format {
        ConfigFormat::Json => serde_json::from_slice(bytes).map_err(|e| {
            AppError::MalformedConfig {
                format,
                message: e.to_string(),
                line: Some(e.line()),
                column: Some(e.column()),
            }
        })?,
        ConfigFormat::Yaml => serde_yaml::from_slice(bytes).map_err(|e| {
            let location = e.location();
            AppError::MalformedConfig {
                format,
                message: e.to_string(),
                line: location.as_ref().map(|l| l.line()),
                column: location.as_ref().map(|l| l.column()),
            }
        })?,
    };

    Ok(records.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: &str = r#"[
        {"path": "/go", "url": "https://go.dev"},
        {"path": "/rust", "url": "https://rust-lang.org"}
    ]"#;

    const YAML: &str = "
- path: /go
  url: https://go.dev
- path: /rust
  url: https://rust-lang.org
";

    fn pairs(records: &[RedirectRecord]) -> Vec<(&str, &str)> {
        records
            .iter()
            .map(|r| (r.path.as_str(), r.url.as_str()))
            .collect()
    }

    #[test]
    fn test_parse_json() {
        let records = parse_records(JSON.as_bytes(), ConfigFormat::Json).unwrap();
        assert_eq!(
            pairs(&records),
            vec![("/go", "https://go.dev"), ("/rust", "https://rust-lang.org")]
        );
    }

    #[test]
    fn test_parse_yaml() {
        let records = parse_records(YAML.as_bytes(), ConfigFormat::Yaml).unwrap();
        assert_eq!(
            pairs(&records),
            vec![("/go", "https://go.dev"), ("/rust", "https://rust-lang.org")]
        );
    }

    #[test]
    fn test_empty_input_is_not_an_error() {
        assert!(parse_records(b"", ConfigFormat::Json).unwrap().is_empty());
        assert!(parse_records(b"  \n", ConfigFormat::Yaml).unwrap().is_empty());
        assert!(parse_records(b"[]", ConfigFormat::Json).unwrap().is_empty());
        assert!(parse_records(b"null", ConfigFormat::Json).unwrap().is_empty());
        assert!(parse_records(b"~", ConfigFormat::Yaml).unwrap().is_empty());
    }

    #[test]
    fn test_extra_fields_ignored() {
        let input = r#"[{"path": "/a", "url": "http://x", "note": "ignored"}]"#;
        let records = parse_records(input.as_bytes(), ConfigFormat::Json).unwrap();
        assert_eq!(pairs(&records), vec![("/a", "http://x")]);
    }

    #[test]
    fn test_no_semantic_validation() {
        let input = "- path: no-slash\n  url: not a url\n";
        let records = parse_records(input.as_bytes(), ConfigFormat::Yaml).unwrap();
        assert_eq!(pairs(&records), vec![("no-slash", "not a url")]);
    }

    #[test]
    fn test_malformed_json_reports_location() {
        let input = "[\n  {\"path\": \"/a\", \"url\": }\n]";
        let err = parse_records(input.as_bytes(), ConfigFormat::Json).unwrap_err();
        match err {
            AppError::MalformedConfig { format, line, .. } => {
                assert_eq!(format, ConfigFormat::Json);
                assert_eq!(line, Some(2));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_url_is_malformed() {
        let input = "- path: /a\n";
        let err = parse_records(input.as_bytes(), ConfigFormat::Yaml).unwrap_err();
        assert!(matches!(
            err,
            AppError::MalformedConfig {
                format: ConfigFormat::Yaml,
                ..
            }
        ));
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("json".parse::<ConfigFormat>(), Ok(ConfigFormat::Json));
        assert_eq!("YAML".parse::<ConfigFormat>(), Ok(ConfigFormat::Yaml));
        assert_eq!("yml".parse::<ConfigFormat>(), Ok(ConfigFormat::Yaml));
        assert!("toml".parse::<ConfigFormat>().is_err());
    }
}
