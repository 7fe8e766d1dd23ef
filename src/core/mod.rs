//! Business logic: record managers and the filesystem/backup/inspection helpers.

pub mod backup;
pub mod calendar;
pub mod fsops;
pub mod hours;
pub mod inspect;
pub mod log;
pub mod notes;
pub mod select;
pub mod todos;

pub use calendar::CalendarManager;
pub use hours::HourTracker;
pub use notes::NoteManager;
pub use todos::ToDoManager;

use crate::db;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

/// Reject blank text for a required field.
pub(crate) fn require_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Hours must be a finite, non-negative number.
pub(crate) fn require_hours(value: f64) -> AppResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::Validation(format!(
            "hours must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}

/// Best-effort audit line; the main operation has already committed.
pub(crate) fn audit(conn: &Connection, operation: &str, target: &str, message: &str) {
    if let Err(e) = db::log::record(conn, operation, target, message) {
        tracing::warn!(operation, target, error = %e, "failed to write audit log");
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use crate::db::Storage;
    use tempfile::TempDir;

    /// A fresh database file inside a temporary directory.
    pub fn storage() -> (TempDir, Storage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().join("kpr.db"));
        (dir, storage)
    }
}
