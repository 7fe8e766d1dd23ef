use crate::db::queries::like_pattern;
use crate::models::Appointment;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_appointment(row: &Row) -> Result<Appointment> {
    Ok(Appointment {
        id: row.get("id")?,
        uuid: row.get("uuid")?,
        title: row.get("title")?,
        date: row.get("date")?,
        time: row.get("time")?,
        description: row.get("description")?,
    })
}

pub fn insert_appointment(
    conn: &Connection,
    uuid: &str,
    title: &str,
    date: &str,
    time: Option<&str>,
    description: Option<&str>,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO appointments (uuid, title, date, time, description)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![uuid, title, date, time, description],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_appointment(conn: &Connection, id: i64) -> Result<Option<Appointment>> {
    conn.query_row(
        "SELECT id, uuid, title, date, time, description FROM appointments WHERE id = ?1",
        [id],
        map_appointment,
    )
    .optional()
}

/// Ordered by day, all-day entries (NULL time) first, then by time.
pub fn list_appointments(conn: &Connection, date: Option<&str>) -> Result<Vec<Appointment>> {
    let mut stmt = conn.prepare(
        "SELECT id, uuid, title, date, time, description FROM appointments
         WHERE ?1 IS NULL OR date = ?1
         ORDER BY date ASC, time ASC, id ASC",
    )?;
    let rows = stmt.query_map([date], map_appointment)?;
    rows.collect()
}

pub fn search_appointments(conn: &Connection, keyword: &str) -> Result<Vec<Appointment>> {
    let mut stmt = conn.prepare(
        "SELECT id, uuid, title, date, time, description FROM appointments
         WHERE title LIKE ?1 ESCAPE '\\' OR description LIKE ?1 ESCAPE '\\'
         ORDER BY date ASC, time ASC, id ASC",
    )?;
    let rows = stmt.query_map([like_pattern(keyword)], map_appointment)?;
    rows.collect()
}

pub fn update_appointment(conn: &Connection, a: &Appointment) -> Result<usize> {
    conn.execute(
        "UPDATE appointments SET title = ?1, date = ?2, time = ?3, description = ?4
         WHERE id = ?5",
        params![a.title, a.date, a.time, a.description, a.id],
    )
}

pub fn delete_appointment(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM appointments WHERE id = ?1", [id])
}
