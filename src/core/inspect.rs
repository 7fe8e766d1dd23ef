//! Read-only database inspection plus the `check`/`vacuum` maintenance pragmas.

use crate::db::Storage;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// Tables created by the canonical schema. Only these can be counted.
pub const KNOWN_TABLES: [&str; 7] = [
    "appointments",
    "completed_todos",
    "hours",
    "log",
    "notes",
    "service_hours",
    "todos",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnInfo {
    pub cid: i64,
    pub name: String,
    pub decl_type: String,
    pub not_null: bool,
    pub default: Option<String>,
    pub primary_key: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DbInfo {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub tables: usize,
    pub total_rows: i64,
}

pub struct Inspector {
    storage: Storage,
}

fn count_sql(table: &str) -> Option<&'static str> {
    Some(match table {
        "appointments" => "SELECT COUNT(*) FROM appointments",
        "completed_todos" => "SELECT COUNT(*) FROM completed_todos",
        "hours" => "SELECT COUNT(*) FROM hours",
        "log" => "SELECT COUNT(*) FROM log",
        "notes" => "SELECT COUNT(*) FROM notes",
        "service_hours" => "SELECT COUNT(*) FROM service_hours",
        "todos" => "SELECT COUNT(*) FROM todos",
        _ => return None,
    })
}

fn unknown_table(table: &str) -> AppError {
    AppError::Validation(format!(
        "unknown table {table:?}; expected one of {}",
        KNOWN_TABLES.join(", ")
    ))
}

fn count_rows(conn: &Connection, table: &str) -> AppResult<i64> {
    let sql = count_sql(table).ok_or_else(|| unknown_table(table))?;
    Ok(conn.query_row(sql, [], |row| row.get(0))?)
}

impl Inspector {
    pub fn new(storage: &Storage) -> AppResult<Self> {
        storage.ensure_schema()?;
        Ok(Self {
            storage: storage.clone(),
        })
    }

    /// User tables present in the file, sorted by name.
    pub fn list_tables(&self) -> AppResult<Vec<String>> {
        let pool = self.storage.open()?;
        let mut stmt = pool.conn.prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )?;
        let names = stmt.query_map([], |row| row.get(0))?;
        Ok(names.collect::<Result<_, _>>()?)
    }

    pub fn table_info(&self, table: &str) -> AppResult<Vec<ColumnInfo>> {
        let pool = self.storage.open()?;
        let mut stmt = pool.conn.prepare(
            "SELECT cid, name, type, \"notnull\", dflt_value, pk
             FROM pragma_table_info(?1) ORDER BY cid",
        )?;
        let cols = stmt
            .query_map([table], |row| {
                Ok(ColumnInfo {
                    cid: row.get(0)?,
                    name: row.get(1)?,
                    decl_type: row.get(2)?,
                    not_null: row.get::<_, i64>(3)? != 0,
                    default: row.get(4)?,
                    primary_key: row.get::<_, i64>(5)? != 0,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        if cols.is_empty() {
            return Err(unknown_table(table));
        }
        Ok(cols)
    }

    pub fn row_count(&self, table: &str) -> AppResult<i64> {
        let pool = self.storage.open()?;
        count_rows(&pool.conn, table)
    }

    /// Row count of every known table, in name order.
    pub fn summary(&self) -> AppResult<Vec<(String, i64)>> {
        let pool = self.storage.open()?;
        KNOWN_TABLES
            .iter()
            .map(|t| Ok((t.to_string(), count_rows(&pool.conn, t)?)))
            .collect()
    }

    pub fn info(&self) -> AppResult<DbInfo> {
        let path = self.storage.path().to_path_buf();
        let size_bytes = fs::metadata(&path)
            .map_err(AppError::file_op("stat", &path))?
            .len();
        let summary = self.summary()?;

        Ok(DbInfo {
            path,
            size_bytes,
            tables: self.list_tables()?.len(),
            total_rows: summary.iter().map(|(_, n)| n).sum(),
        })
    }

    /// `Ok(None)` when SQLite reports "ok", otherwise the problems found.
    pub fn integrity_check(&self) -> AppResult<Option<String>> {
        let pool = self.storage.open()?;
        let result: String = pool
            .conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        Ok((result != "ok").then_some(result))
    }

    pub fn vacuum(&self) -> AppResult<()> {
        let pool = self.storage.open()?;
        pool.conn.execute_batch("VACUUM")?;
        tracing::info!(path = %self.storage.path().display(), "database vacuumed");
        Ok(())
    }
}
