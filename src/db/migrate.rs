use crate::errors::{AppError, AppResult};
use crate::utils::archive::zip_file;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result, params};
use std::path::Path;

/// Canonical schema. Every statement is idempotent.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS notes (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    uuid      TEXT NOT NULL UNIQUE,
    name      TEXT NOT NULL,
    content   TEXT NOT NULL,
    timestamp TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS todos (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    uuid      TEXT NOT NULL UNIQUE,
    content   TEXT NOT NULL,
    deadline  TEXT,
    timestamp TEXT NOT NULL
);

-- Append-only archive of completed to-dos.
CREATE TABLE IF NOT EXISTS completed_todos (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    uuid         TEXT NOT NULL UNIQUE,
    content      TEXT NOT NULL,
    deadline     TEXT,
    timestamp    TEXT NOT NULL,
    completed_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS hours (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    uuid         TEXT NOT NULL UNIQUE,
    job_name     TEXT NOT NULL,
    hours_worked REAL NOT NULL CHECK (hours_worked >= 0),
    date         TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS appointments (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    uuid        TEXT NOT NULL UNIQUE,
    title       TEXT NOT NULL,
    date        TEXT NOT NULL,
    time        TEXT,
    description TEXT
);

-- Singleton balance row, always id = 1.
CREATE TABLE IF NOT EXISTS service_hours (
    id              INTEGER PRIMARY KEY CHECK (id = 1),
    total_hours     REAL NOT NULL,
    remaining_hours REAL NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_hours_date ON hours(date);
CREATE INDEX IF NOT EXISTS idx_appointments_date ON appointments(date, time);
"#;

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let exists: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table],
            |row| row.get(0),
        )
        .optional()?;
    Ok(exists.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;
    let cols = stmt.query_map([table], |row| row.get::<_, String>(0))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM log WHERE operation = 'migration_applied' AND target = ?1 LIMIT 1",
            [version],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        params![Local::now().to_rfc3339(), version, message],
    )?;
    Ok(())
}

/// A table from the older layout where the UUID text was the primary key.
struct LegacyTable {
    name: &'static str,
    version: &'static str,
    rebuild: &'static str,
}

static LEGACY_TABLES: [LegacyTable; 4] = [
    LegacyTable {
        name: "notes",
        version: "20240601_0001_notes_surrogate_keys",
        rebuild: r#"
            ALTER TABLE notes RENAME TO notes_legacy;
            CREATE TABLE notes (
                id        INTEGER PRIMARY KEY AUTOINCREMENT,
                uuid      TEXT NOT NULL UNIQUE,
                name      TEXT NOT NULL,
                content   TEXT NOT NULL,
                timestamp TEXT NOT NULL
            );
            INSERT INTO notes (uuid, name, content, timestamp)
            SELECT id, name, content, COALESCE(timestamp, datetime('now', 'localtime'))
            FROM notes_legacy ORDER BY rowid;
            DROP TABLE notes_legacy;
        "#,
    },
    LegacyTable {
        name: "todos",
        version: "20240601_0002_todos_surrogate_keys",
        rebuild: r#"
            ALTER TABLE todos RENAME TO todos_legacy;
            CREATE TABLE todos (
                id        INTEGER PRIMARY KEY AUTOINCREMENT,
                uuid      TEXT NOT NULL UNIQUE,
                content   TEXT NOT NULL,
                deadline  TEXT,
                timestamp TEXT NOT NULL
            );
            INSERT INTO todos (uuid, content, deadline, timestamp)
            SELECT id, content, deadline, COALESCE(timestamp, datetime('now', 'localtime'))
            FROM todos_legacy ORDER BY rowid;
            DROP TABLE todos_legacy;
        "#,
    },
    LegacyTable {
        name: "hours",
        version: "20240601_0003_hours_surrogate_keys",
        rebuild: r#"
            ALTER TABLE hours RENAME TO hours_legacy;
            -- No sign check here: old databases may hold negative entries.
            CREATE TABLE hours (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                uuid         TEXT NOT NULL UNIQUE,
                job_name     TEXT NOT NULL,
                hours_worked REAL NOT NULL,
                date         TEXT NOT NULL
            );
            INSERT INTO hours (uuid, job_name, hours_worked, date)
            SELECT id, job_name, hours_worked, date
            FROM hours_legacy ORDER BY rowid;
            DROP TABLE hours_legacy;
        "#,
    },
    LegacyTable {
        name: "appointments",
        version: "20240601_0004_appointments_surrogate_keys",
        rebuild: r#"
            ALTER TABLE appointments RENAME TO appointments_legacy;
            CREATE TABLE appointments (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                uuid        TEXT NOT NULL UNIQUE,
                title       TEXT NOT NULL,
                date        TEXT NOT NULL,
                time        TEXT,
                description TEXT
            );
            INSERT INTO appointments (uuid, title, date, time, description)
            SELECT id, title, date, time, description
            FROM appointments_legacy ORDER BY rowid;
            DROP TABLE appointments_legacy;
        "#,
    },
];

fn pending_legacy_tables(conn: &Connection) -> Result<Vec<&'static LegacyTable>> {
    let mut out = Vec::new();
    for t in LEGACY_TABLES.iter() {
        if table_exists(conn, t.name)? && !table_has_column(conn, t.name, "uuid")? {
            out.push(t);
        }
    }
    Ok(out)
}

fn backup_before_migration(conn: &Connection) -> AppResult<()> {
    let db_path: String = conn
        .query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
        .unwrap_or_default();

    if db_path.is_empty() {
        tracing::warn!("could not determine database path; pre-migration backup skipped");
        return Ok(());
    }

    let db_path = Path::new(&db_path);
    let dir = db_path.parent().unwrap_or_else(|| Path::new("."));
    let backup_path = dir.join(format!(
        "{}-kpr-pre-migration.zip",
        Local::now().format("%Y%m%d_%H%M%S")
    ));

    zip_file(db_path, &backup_path, "kpr.db")?;
    tracing::info!(path = %backup_path.display(), "pre-migration backup created");
    Ok(())
}

/// Rebuild tables that still use the UUID as primary key.
///
/// The old text id becomes `uuid` and rows get fresh surrogate ids in their
/// original insertion order.
fn migrate_legacy_uuid_keys(conn: &Connection) -> AppResult<()> {
    let pending = pending_legacy_tables(conn)?;
    if pending.is_empty() {
        return Ok(());
    }

    tracing::warn!(
        tables = pending.len(),
        "legacy uuid-keyed schema detected; creating backup before migration"
    );
    backup_before_migration(conn)?;

    let tx = conn.unchecked_transaction()?;
    for t in &pending {
        tx.execute_batch(t.rebuild)
            .map_err(|e| AppError::Migration(format!("{}: {}", t.name, e)))?;
        mark_applied(&tx, t.version, "Rebuilt table with surrogate keys and uuid column")?;
        tracing::info!(table = t.name, version = t.version, "migration applied");
    }
    tx.commit()?;

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;
    migrate_legacy_uuid_keys(conn)?;
    conn.execute_batch(SCHEMA)?;

    let version = "20240601_0000_canonical_schema";
    if !migration_applied(conn, version)? {
        mark_applied(conn, version, "Created canonical kpr schema")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY_DDL: &str = r#"
        CREATE TABLE notes (
            id TEXT PRIMARY KEY, name TEXT NOT NULL, content TEXT NOT NULL,
            timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
        );
        CREATE TABLE todos (
            id TEXT PRIMARY KEY, content TEXT NOT NULL, deadline TEXT,
            timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
        );
        CREATE TABLE hours (
            id TEXT PRIMARY KEY, job_name TEXT NOT NULL, hours_worked REAL NOT NULL, date TEXT NOT NULL
        );
        CREATE TABLE appointments (
            id TEXT PRIMARY KEY, title TEXT NOT NULL, date TEXT NOT NULL, time TEXT, description TEXT
        );
        CREATE TABLE service_hours (
            id INTEGER PRIMARY KEY, total_hours REAL NOT NULL, remaining_hours REAL NOT NULL
        );
        INSERT INTO notes VALUES ('aaaa-1', 'first', 'one', '2024-01-01 10:00:00');
        INSERT INTO notes VALUES ('aaaa-2', 'second', 'two', '2024-01-02 10:00:00');
        INSERT INTO todos VALUES ('bbbb-1', 'buy milk', NULL, '2024-01-03 10:00:00');
        INSERT INTO hours VALUES ('cccc-1', 'Shelter', 4.5, '2024-01-04');
        INSERT INTO appointments VALUES ('dddd-1', 'Dentist', '2024-02-01', NULL, NULL);
        INSERT INTO service_hours VALUES (1, 40, 35.5);
    "#;

    #[test]
    fn fresh_database_gets_every_table() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();

        for t in [
            "notes",
            "todos",
            "completed_todos",
            "hours",
            "appointments",
            "service_hours",
            "log",
        ] {
            assert!(table_exists(&conn, t).unwrap(), "missing table {t}");
        }
        assert!(migration_applied(&conn, "20240601_0000_canonical_schema").unwrap());
    }

    #[test]
    fn running_twice_records_schema_once() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        let n: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(n, 1);
    }

    #[test]
    fn legacy_uuid_keys_are_rebuilt_with_rows_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(LEGACY_DDL).unwrap();

        run_pending_migrations(&conn).unwrap();

        assert!(table_has_column(&conn, "notes", "uuid").unwrap());
        let rows: Vec<(i64, String, String)> = conn
            .prepare("SELECT id, uuid, name FROM notes ORDER BY id")
            .unwrap()
            .query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)))
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(
            rows,
            vec![
                (1, "aaaa-1".to_string(), "first".to_string()),
                (2, "aaaa-2".to_string(), "second".to_string()),
            ]
        );

        let hours: f64 = conn
            .query_row("SELECT hours_worked FROM hours WHERE uuid = 'cccc-1'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(hours, 4.5);

        let remaining: f64 = conn
            .query_row("SELECT remaining_hours FROM service_hours WHERE id = 1", [], |r| r.get(0))
            .unwrap();
        assert_eq!(remaining, 35.5);

        assert!(table_exists(&conn, "completed_todos").unwrap());
        assert!(!table_exists(&conn, "notes_legacy").unwrap());
        assert!(migration_applied(&conn, "20240601_0002_todos_surrogate_keys").unwrap());

        let backups = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with("-kpr-pre-migration.zip"))
            .count();
        assert_eq!(backups, 1);
    }

    #[test]
    fn legacy_negative_hours_survive_the_rebuild() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(LEGACY_DDL).unwrap();
        conn.execute(
            "INSERT INTO hours VALUES ('cccc-2', 'Correction', -1.5, '2024-01-05')",
            [],
        )
        .unwrap();

        run_pending_migrations(&conn).unwrap();

        let rows: Vec<(String, f64)> = conn
            .prepare("SELECT uuid, hours_worked FROM hours ORDER BY id")
            .unwrap()
            .query_map([], |r| Ok((r.get(0)?, r.get(1)?)))
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(
            rows,
            vec![("cccc-1".to_string(), 4.5), ("cccc-2".to_string(), -1.5)]
        );
        assert!(migration_applied(&conn, "20240601_0003_hours_surrogate_keys").unwrap());

        // A second open finds nothing left to migrate.
        run_pending_migrations(&conn).unwrap();
    }
}
