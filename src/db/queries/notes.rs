use crate::db::queries::like_pattern;
use crate::models::Note;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_note(row: &Row) -> Result<Note> {
    Ok(Note {
        id: row.get("id")?,
        uuid: row.get("uuid")?,
        name: row.get("name")?,
        content: row.get("content")?,
        modified_at: row.get("timestamp")?,
    })
}

pub fn insert_note(
    conn: &Connection,
    uuid: &str,
    name: &str,
    content: &str,
    timestamp: &str,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO notes (uuid, name, content, timestamp) VALUES (?1, ?2, ?3, ?4)",
        params![uuid, name, content, timestamp],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_note(conn: &Connection, id: i64) -> Result<Option<Note>> {
    conn.query_row(
        "SELECT id, uuid, name, content, timestamp FROM notes WHERE id = ?1",
        [id],
        map_note,
    )
    .optional()
}

pub fn list_notes(conn: &Connection) -> Result<Vec<Note>> {
    let mut stmt =
        conn.prepare("SELECT id, uuid, name, content, timestamp FROM notes ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_note)?;
    rows.collect()
}

/// Case-insensitive (ASCII) substring match on name or content.
pub fn search_notes(conn: &Connection, keyword: &str) -> Result<Vec<Note>> {
    let mut stmt = conn.prepare(
        "SELECT id, uuid, name, content, timestamp FROM notes
         WHERE name LIKE ?1 ESCAPE '\\' OR content LIKE ?1 ESCAPE '\\'
         ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([like_pattern(keyword)], map_note)?;
    rows.collect()
}

pub fn update_note(
    conn: &Connection,
    id: i64,
    name: &str,
    content: &str,
    timestamp: &str,
) -> Result<usize> {
    conn.execute(
        "UPDATE notes SET name = ?1, content = ?2, timestamp = ?3 WHERE id = ?4",
        params![name, content, timestamp, id],
    )
}

pub fn delete_note(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM notes WHERE id = ?1", [id])
}
