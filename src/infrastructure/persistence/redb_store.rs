//! Embedded redb store holding the redirect bucket.
//!
//! The store is a single redb file containing one table (the "bucket") of
//! `path -> url` byte strings. The first open against a file creates the
//! bucket and seeds it from a default dataset; every open then loads the whole
//! bucket into a [`PathTable`].

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use redb::{
    Database, DatabaseError, ReadableTable, TableDefinition, TableError, TableHandle,
    WriteTransaction,
};
use tracing::{debug, info, warn};

use crate::domain::entities::PathTable;
use crate::error::AppError;
use crate::utils::record_parser::{ConfigFormat, parse_records};

/// Bucket name shared by the server and the admin tool.
pub const DEFAULT_BUCKET: &str = "redirectRoutes";

/// Format of the default dataset used for seeding.
pub const SEED_FORMAT: ConfigFormat = ConfigFormat::Json;

/// Default wait for the store file lock.
pub const DEFAULT_OPEN_TIMEOUT: Duration = Duration::from_secs(1);

const LOCK_POLL_INTERVAL: Duration = Duration::from_millis(50);

type Bucket<'a> = TableDefinition<'a, &'static [u8], &'static [u8]>;

fn bucket(name: &str) -> Bucket<'_> {
    TableDefinition::new(name)
}

/// Opens (creating if absent) the store file at `path`.
///
/// While another handle holds the file, the lock is polled until
/// `open_timeout` elapses. A timeout too large to represent waits forever.
///
/// # Errors
///
/// Returns [`AppError::StoreUnavailable`] when the lock is not acquired in
/// time, or immediately for any other open failure (missing directory,
/// permissions, not a redb file).
pub fn open_database(path: &Path, open_timeout: Duration) -> Result<Database, AppError> {
    let deadline = Instant::now().checked_add(open_timeout);
    let mut waiting = false;

    loop {
        match Database::create(path) {
            Ok(db) => return Ok(db),
            Err(DatabaseError::DatabaseAlreadyOpen) => {
                let now = Instant::now();
                if deadline.is_some_and(|d| now >= d) {
                    return Err(AppError::StoreUnavailable {
                        path: path.to_path_buf(),
                        reason: format!(
                            "timed out after {}ms waiting for the file lock",
                            open_timeout.as_millis()
                        ),
                    });
                }
                if !waiting {
                    warn!(path = %path.display(), "Store is locked, waiting");
                    waiting = true;
                }
                let remaining = deadline.map_or(LOCK_POLL_INTERVAL, |d| d - now);
                thread::sleep(LOCK_POLL_INTERVAL.min(remaining));
            }
            Err(e) => {
                return Err(AppError::StoreUnavailable {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        }
    }
}

/// Opens the store, seeding the bucket on first use, and returns its contents.
///
/// # Flow
///
/// 1. Open the file (bounded by `open_timeout`)
/// 2. Begin one write transaction
/// 3. If `bucket_name` is absent: create it, decode `default_dataset` as JSON
///    and insert every pair
/// 4. Read the whole bucket into a [`PathTable`]
/// 5. Commit and release the file
///
/// When the bucket already exists the dataset is never decoded.
///
/// # Errors
///
/// - [`AppError::StoreUnavailable`] if the file cannot be opened
/// - [`AppError::SeedFailure`] if seeding fails; the transaction is aborted
///   and the bucket stays absent
/// - [`AppError::Storage`] for other transaction failures
pub fn open_store(
    path: &Path,
    bucket_name: &str,
    default_dataset: &[u8],
    open_timeout: Duration,
) -> Result<PathTable, AppError> {
    let db = open_database(path, open_timeout)?;
    let definition = bucket(bucket_name);

    let txn = db.begin_write().map_err(redb::Error::from)?;

    if !bucket_exists(&txn, bucket_name)? {
        info!(bucket = bucket_name, "Bucket not found, creating it with default values");

        match seed_bucket(&txn, definition, default_dataset) {
            Ok(count) => info!(bucket = bucket_name, count, "Bucket seeded"),
            Err(source) => {
                if let Err(e) = txn.abort() {
                    warn!(error = %e, "Failed to abort seeding transaction");
                }
                return Err(AppError::SeedFailure {
                    bucket: bucket_name.to_string(),
                    source: Box::new(source),
                });
            }
        }
    }

    let table = {
        let stored = txn.open_table(definition).map_err(redb::Error::from)?;
        read_all(&stored)?
    };

    txn.commit().map_err(redb::Error::from)?;
    debug!(bucket = bucket_name, entries = table.len(), "Store loaded");

    Ok(table)
}

/// Reads the bucket without creating or seeding anything.
///
/// Returns `Ok(None)` when the bucket does not exist.
///
/// # Errors
///
/// Returns [`AppError::StoreUnavailable`] if the store file is missing or
/// cannot be opened in time.
pub fn snapshot(
    path: &Path,
    bucket_name: &str,
    open_timeout: Duration,
) -> Result<Option<PathTable>, AppError> {
    if !path.exists() {
        return Err(AppError::StoreUnavailable {
            path: path.to_path_buf(),
            reason: "store file does not exist".to_string(),
        });
    }

    let db = open_database(path, open_timeout)?;
    let txn = db.begin_read().map_err(redb::Error::from)?;

    match txn.open_table(bucket(bucket_name)) {
        Ok(table) => Ok(Some(read_all(&table)?)),
        Err(TableError::TableDoesNotExist(_)) => Ok(None),
        Err(e) => Err(redb::Error::from(e).into()),
    }
}

fn bucket_exists(txn: &WriteTransaction, bucket_name: &str) -> Result<bool, AppError> {
    let mut tables = txn.list_tables().map_err(redb::Error::from)?;
    Ok(tables.any(|handle| handle.name() == bucket_name))
}

fn seed_bucket(
    txn: &WriteTransaction,
    definition: Bucket<'_>,
    default_dataset: &[u8],
) -> Result<usize, AppError> {
    let mut created = txn.open_table(definition).map_err(redb::Error::from)?;

    let defaults = PathTable::from_records(parse_records(default_dataset, SEED_FORMAT)?);

    for (path, url) in defaults.iter() {
        created
            .insert(path.as_bytes(), url.as_bytes())
            .map_err(redb::Error::from)?;
    }

    Ok(defaults.len())
}

fn read_all(
    table: &impl ReadableTable<&'static [u8], &'static [u8]>,
) -> Result<PathTable, redb::Error> {
    table
        .iter()?
        .map(|entry| -> Result<(String, String), redb::Error> {
            let (key, value) = entry?;
            Ok((
                String::from_utf8_lossy(key.value()).into_owned(),
                String::from_utf8_lossy(value.value()).into_owned(),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DATASET: &[u8] = br#"[
        {"path": "/go", "url": "https://go.dev"},
        {"path": "/rust", "url": "https://rust-lang.org"},
        {"path": "/go", "url": "https://go.dev/doc"}
    ]"#;

    const TIMEOUT: Duration = Duration::from_millis(200);

    fn store_path(dir: &TempDir) -> std::path::PathBuf {
        dir.path().join("redirects.db")
    }

    #[test]
    fn test_first_open_seeds_bucket() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);

        let table = open_store(&path, DEFAULT_BUCKET, DATASET, TIMEOUT).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("/go"), Some("https://go.dev/doc"));
        assert_eq!(table.get("/rust"), Some("https://rust-lang.org"));
        assert_eq!(table.get("/python"), None);
    }

    #[test]
    fn test_second_open_skips_seeding() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);

        let first = open_store(&path, DEFAULT_BUCKET, DATASET, TIMEOUT).unwrap();
        // The dataset is not decoded again, so garbage here must not matter.
        let second = open_store(&path, DEFAULT_BUCKET, b"{ not json", TIMEOUT).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_dataset_leaves_no_bucket() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);

        let err = open_store(&path, DEFAULT_BUCKET, b"[{\"path\": ", TIMEOUT).unwrap_err();
        match err {
            AppError::SeedFailure { bucket, source } => {
                assert_eq!(bucket, DEFAULT_BUCKET);
                assert!(matches!(*source, AppError::MalformedConfig { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert_eq!(snapshot(&path, DEFAULT_BUCKET, TIMEOUT).unwrap(), None);

        let table = open_store(&path, DEFAULT_BUCKET, DATASET, TIMEOUT).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_empty_dataset_creates_empty_bucket() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);

        let table = open_store(&path, DEFAULT_BUCKET, b"[]", TIMEOUT).unwrap();
        assert!(table.is_empty());

        let stored = snapshot(&path, DEFAULT_BUCKET, TIMEOUT).unwrap();
        assert_eq!(stored, Some(PathTable::new()));
    }

    #[test]
    fn test_existing_bucket_is_not_reseeded() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);

        {
            let db = Database::create(&path).unwrap();
            let txn = db.begin_write().unwrap();
            {
                let mut table = txn.open_table(bucket(DEFAULT_BUCKET)).unwrap();
                table
                    .insert("/manual".as_bytes(), "https://example.com".as_bytes())
                    .unwrap();
            }
            txn.commit().unwrap();
        }

        let table = open_store(&path, DEFAULT_BUCKET, DATASET, TIMEOUT).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("/manual"), Some("https://example.com"));
    }

    #[test]
    fn test_buckets_are_independent() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);

        open_store(&path, DEFAULT_BUCKET, DATASET, TIMEOUT).unwrap();
        let other = open_store(
            &path,
            "otherRoutes",
            br#"[{"path": "/x", "url": "http://x"}]"#,
            TIMEOUT,
        )
        .unwrap();

        assert_eq!(other.len(), 1);
        assert_eq!(
            snapshot(&path, DEFAULT_BUCKET, TIMEOUT).unwrap().map(|t| t.len()),
            Some(2)
        );
    }

    #[test]
    fn test_locked_store_times_out() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);
        let _holder = Database::create(&path).unwrap();

        let started = Instant::now();
        let err = open_store(&path, DEFAULT_BUCKET, DATASET, TIMEOUT).unwrap_err();

        assert!(matches!(err, AppError::StoreUnavailable { .. }));
        assert!(started.elapsed() >= TIMEOUT);
    }

    #[test]
    fn test_huge_timeout_does_not_overflow() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);

        let table = open_store(&path, DEFAULT_BUCKET, DATASET, Duration::MAX).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_missing_directory_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("redirects.db");

        let err = open_store(&path, DEFAULT_BUCKET, DATASET, TIMEOUT).unwrap_err();
        assert!(matches!(err, AppError::StoreUnavailable { .. }));
    }

    #[test]
    fn test_snapshot_of_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);

        let err = snapshot(&path, DEFAULT_BUCKET, TIMEOUT).unwrap_err();
        assert!(matches!(err, AppError::StoreUnavailable { .. }));
        assert!(!path.exists());
    }
}
