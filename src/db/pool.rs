//! SQLite connection handling (one short-lived connection per operation).

use crate::db::initialize::init_db;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open `path`, failing with `StorageUnavailable` if the file cannot be
    /// created, opened or read as a database.
    pub fn open(path: &Path) -> AppResult<Self> {
        let unavailable = |reason: String| AppError::StorageUnavailable {
            path: path.to_path_buf(),
            reason,
        };

        let conn = Connection::open(path).map_err(|e| unavailable(e.to_string()))?;
        conn.busy_timeout(Duration::from_secs(5))
            .map_err(|e| unavailable(e.to_string()))?;
        conn.pragma_update(None, "foreign_keys", true)
            .map_err(|e| unavailable(e.to_string()))?;

        // Opening is lazy; touch the schema so unreadable or non-database files fail here.
        conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| row.get::<_, i64>(0))
            .map_err(|e| unavailable(e.to_string()))?;

        Ok(Self { conn })
    }
}

/// Location of the database file. Cheap to clone; every manager holds one.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acquire a connection for a single operation. It is closed when dropped.
    pub fn open(&self) -> AppResult<DbPool> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| AppError::StorageUnavailable {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        }
        DbPool::open(&self.path)
    }

    /// Create every table that is missing and run pending migrations. Idempotent.
    pub fn ensure_schema(&self) -> AppResult<()> {
        let pool = self.open()?;
        init_db(&pool.conn)
    }
}
