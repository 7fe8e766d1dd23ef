//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{op} failed for '{}': {source}", path.display())]
    FileOp {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // ---------------------------
    // Storage
    // ---------------------------
    #[error("Storage unavailable at '{}': {reason}", path.display())]
    StorageUnavailable { path: PathBuf, reason: String },

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Records
    // ---------------------------
    #[error("{op}: no {entity} with id {id}")]
    NotFound {
        op: &'static str,
        entity: &'static str,
        id: i64,
    },

    #[error("{op}: no service-hour total has been set (run `kpr hours total <HOURS>` first)")]
    NoBalanceSet { op: &'static str },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid time format: {0} (expected HH:MM)")]
    InvalidTime(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Logger setup failed: {0}")]
    Logger(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Wrap an I/O error with the filesystem operation and path it came from.
    pub fn file_op(op: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| AppError::FileOp { op, path, source }
    }
}

pub type AppResult<T> = Result<T, AppError>;
