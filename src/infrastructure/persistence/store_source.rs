//! Redirect source backed by the seeded redb store.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::redb_store::open_store;
use crate::domain::entities::PathTable;
use crate::domain::repositories::RedirectSource;
use crate::error::AppError;

/// Loads the redirect bucket from a redb file, seeding it on first use.
///
/// The store is opened on the blocking pool, so the runtime never stalls on
/// the file lock or on disk writes.
pub struct StoreRedirectSource {
    path: PathBuf,
    bucket: String,
    default_dataset: Arc<[u8]>,
    open_timeout: Duration,
}

impl StoreRedirectSource {
    pub fn new(
        path: impl Into<PathBuf>,
        bucket: impl Into<String>,
        default_dataset: impl Into<Arc<[u8]>>,
        open_timeout: Duration,
    ) -> Self {
        Self {
            path: path.into(),
            bucket: bucket.into(),
            default_dataset: default_dataset.into(),
            open_timeout,
        }
    }

    /// Builds a source whose default dataset is read from `seeds_path`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Io`] if the dataset file cannot be read.
    pub async fn with_seeds_file(
        path: impl Into<PathBuf>,
        bucket: impl Into<String>,
        seeds_path: impl Into<PathBuf>,
        open_timeout: Duration,
    ) -> Result<Self, AppError> {
        let seeds_path = seeds_path.into();
        let dataset = tokio::fs::read(&seeds_path)
            .await
            .map_err(|e| AppError::io(&seeds_path, e))?;

        Ok(Self::new(path, bucket, dataset, open_timeout))
    }
}

#[async_trait]
impl RedirectSource for StoreRedirectSource {
    fn describe(&self) -> String {
        format!("store {} (bucket `{}`)", self.path.display(), self.bucket)
    }

    async fn load(&self) -> Result<PathTable, AppError> {
        let path = self.path.clone();
        let bucket = self.bucket.clone();
        let dataset = self.default_dataset.clone();
        let open_timeout = self.open_timeout;

        tokio::task::spawn_blocking(move || open_store(&path, &bucket, &dataset, open_timeout))
            .await
            .map_err(|e| AppError::internal(format!("store task failed: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::redb_store::DEFAULT_BUCKET;

    #[tokio::test]
    async fn test_load_seeds_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("redirects.db");

        let source = StoreRedirectSource::new(
            &path,
            DEFAULT_BUCKET,
            br#"[{"path": "/go", "url": "https://go.dev"}]"#.to_vec(),
            Duration::from_millis(200),
        );
        let first = source.load().await.unwrap();
        let second = source.load().await.unwrap();

        assert_eq!(first.get("/go"), Some("https://go.dev"));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_missing_seeds_file() {
        let dir = tempfile::tempdir().unwrap();

        let result = StoreRedirectSource::with_seeds_file(
            dir.path().join("redirects.db"),
            DEFAULT_BUCKET,
            dir.path().join("seeds.json"),
            Duration::from_millis(200),
        )
        .await;

        assert!(matches!(result, Err(AppError::Io { .. })));
    }
}
