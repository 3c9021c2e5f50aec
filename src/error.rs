//! Error type shared by the parser, the store adapter and the HTTP layer.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::path::PathBuf;

use crate::utils::record_parser::ConfigFormat;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Errors produced while building or serving the redirect chain.
///
/// Everything except [`AppError::InvalidRedirect`] and [`AppError::Internal`]
/// is a startup failure: the server never begins accepting requests with a
/// partially built chain.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Declarative bytes did not decode into `[{path, url}, ...]`.
    #[error("malformed {format} config: {message}")]
    MalformedConfig {
        format: ConfigFormat,
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },

    /// The store file could not be opened within the lock timeout.
    #[error("store {} unavailable: {reason}", .path.display())]
    StoreUnavailable { path: PathBuf, reason: String },

    /// Seeding aborted; the bucket was left absent.
    #[error("failed to seed bucket `{bucket}`: {source}")]
    SeedFailure {
        bucket: String,
        #[source]
        source: Box<AppError>,
    },

    #[error("storage error: {0}")]
    Storage(#[from] redb::Error),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stored target cannot be sent as a `Location` header.
    #[error("redirect target for {path} is not a valid header value")]
    InvalidRedirect { path: String, url: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::MalformedConfig { .. } => "malformed_config",
            AppError::StoreUnavailable { .. } => "store_unavailable",
            AppError::SeedFailure { .. } => "seed_failure",
            AppError::Storage(_) => "storage_error",
            AppError::Io { .. } => "io_error",
            AppError::InvalidRedirect { .. } => "invalid_redirect",
            AppError::Internal(_) => "internal_error",
        }
    }

    fn details(&self) -> Value {
        match self {
            AppError::MalformedConfig {
                format,
                line,
                column,
                ..
            } => json!({ "format": format.as_str(), "line": line, "column": column }),
            AppError::StoreUnavailable { path, .. } | AppError::Io { path, .. } => {
                json!({ "path": path.display().to_string() })
            }
            AppError::SeedFailure { bucket, .. } => json!({ "bucket": bucket }),
            AppError::InvalidRedirect { path, .. } => json!({ "path": path }),
            AppError::Storage(_) | AppError::Internal(_) => json!({}),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorInfo {
                code: self.code(),
                message: self.to_string(),
                details: self.details(),
            },
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
