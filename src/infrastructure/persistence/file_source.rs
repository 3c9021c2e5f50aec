//! Redirect source backed by a JSON or YAML config file.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use crate::domain::entities::PathTable;
use crate::domain::repositories::RedirectSource;
use crate::error::AppError;
use crate::utils::record_parser::{ConfigFormat, parse_records};

/// Reads a declarative config file once and decodes it into a table.
pub struct FileRedirectSource {
    path: PathBuf,
    format: ConfigFormat,
}

impl FileRedirectSource {
    pub fn new(path: impl Into<PathBuf>, format: ConfigFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }
}

#[async_trait]
impl RedirectSource for FileRedirectSource {
    fn describe(&self) -> String {
        format!("{} file {}", self.format, self.path.display())
    }

    async fn load(&self) -> Result<PathTable, AppError> {
        info!("Reading config from {}", self.path.display());

        let content = tokio::fs::read(&self.path)
            .await
            .map_err(|e| AppError::io(&self.path, e))?;

        let records = parse_records(&content, self.format)?;
        Ok(PathTable::from_records(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_load_yaml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "- path: /a\n  url: http://a\n- path: /a\n  url: http://b").unwrap();

        let source = FileRedirectSource::new(file.path(), ConfigFormat::Yaml);
        let table = source.load().await.unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("/a"), Some("http://b"));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileRedirectSource::new(dir.path().join("nope.json"), ConfigFormat::Json);

        let err = source.load().await.unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }

    #[tokio::test]
    async fn test_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[{{\"path\": \"/a\"}}]").unwrap();

        let source = FileRedirectSource::new(file.path(), ConfigFormat::Json);
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, AppError::MalformedConfig { .. }));
    }
}
