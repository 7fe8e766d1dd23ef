use crate::db::queries::like_pattern;
use crate::models::{HourEntry, ServiceHourBalance};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_entry(row: &Row) -> Result<HourEntry> {
    Ok(HourEntry {
        id: row.get("id")?,
        uuid: row.get("uuid")?,
        job_name: row.get("job_name")?,
        hours_worked: row.get("hours_worked")?,
        date: row.get("date")?,
    })
}

pub fn insert_entry(
    conn: &Connection,
    uuid: &str,
    job_name: &str,
    hours: f64,
    date: &str,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO hours (uuid, job_name, hours_worked, date) VALUES (?1, ?2, ?3, ?4)",
        params![uuid, job_name, hours, date],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_entry(conn: &Connection, id: i64) -> Result<Option<HourEntry>> {
    conn.query_row(
        "SELECT id, uuid, job_name, hours_worked, date FROM hours WHERE id = ?1",
        [id],
        map_entry,
    )
    .optional()
}

/// All entries, or only those on `date` when given.
pub fn list_entries(conn: &Connection, date: Option<&str>) -> Result<Vec<HourEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, uuid, job_name, hours_worked, date FROM hours
         WHERE ?1 IS NULL OR date = ?1
         ORDER BY date ASC, id ASC",
    )?;
    let rows = stmt.query_map([date], map_entry)?;
    rows.collect()
}

pub fn search_entries(conn: &Connection, keyword: &str) -> Result<Vec<HourEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, uuid, job_name, hours_worked, date FROM hours
         WHERE job_name LIKE ?1 ESCAPE '\\'
         ORDER BY date ASC, id ASC",
    )?;
    let rows = stmt.query_map([like_pattern(keyword)], map_entry)?;
    rows.collect()
}

pub fn update_entry(
    conn: &Connection,
    id: i64,
    job_name: &str,
    hours: f64,
    date: &str,
) -> Result<usize> {
    conn.execute(
        "UPDATE hours SET job_name = ?1, hours_worked = ?2, date = ?3 WHERE id = ?4",
        params![job_name, hours, date, id],
    )
}

pub fn delete_entry(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM hours WHERE id = ?1", [id])
}

pub fn get_balance(conn: &Connection) -> Result<Option<ServiceHourBalance>> {
    conn.query_row(
        "SELECT total_hours, remaining_hours FROM service_hours WHERE id = 1",
        [],
        |row| {
            Ok(ServiceHourBalance {
                total_hours: row.get(0)?,
                remaining_hours: row.get(1)?,
            })
        },
    )
    .optional()
}

/// Set the total and recompute remaining from the logged entries.
pub fn upsert_total(conn: &Connection, total: f64) -> Result<()> {
    conn.execute(
        "INSERT INTO service_hours (id, total_hours, remaining_hours)
         VALUES (1, ?1, ?1 - (SELECT COALESCE(SUM(hours_worked), 0) FROM hours))
         ON CONFLICT(id) DO UPDATE SET
             total_hours = excluded.total_hours,
             remaining_hours = excluded.remaining_hours",
        [total],
    )?;
    Ok(())
}

/// Add `delta` (possibly negative) to the remaining balance.
pub fn adjust_remaining(conn: &Connection, delta: f64) -> Result<usize> {
    conn.execute(
        "UPDATE service_hours SET remaining_hours = remaining_hours + ?1 WHERE id = 1",
        [delta],
    )
}
