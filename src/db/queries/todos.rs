use crate::db::queries::like_pattern;
use crate::models::{CompletedToDo, ToDo};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_todo(row: &Row) -> Result<ToDo> {
    Ok(ToDo {
        id: row.get("id")?,
        uuid: row.get("uuid")?,
        content: row.get("content")?,
        deadline: row.get("deadline")?,
        created_at: row.get("timestamp")?,
    })
}

pub fn map_completed(row: &Row) -> Result<CompletedToDo> {
    Ok(CompletedToDo {
        id: row.get("id")?,
        uuid: row.get("uuid")?,
        content: row.get("content")?,
        deadline: row.get("deadline")?,
        created_at: row.get("timestamp")?,
        completed_at: row.get("completed_at")?,
    })
}

pub fn insert_todo(
    conn: &Connection,
    uuid: &str,
    content: &str,
    deadline: Option<&str>,
    timestamp: &str,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO todos (uuid, content, deadline, timestamp) VALUES (?1, ?2, ?3, ?4)",
        params![uuid, content, deadline, timestamp],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_todo(conn: &Connection, id: i64) -> Result<Option<ToDo>> {
    conn.query_row(
        "SELECT id, uuid, content, deadline, timestamp FROM todos WHERE id = ?1",
        [id],
        map_todo,
    )
    .optional()
}

pub fn list_todos(conn: &Connection) -> Result<Vec<ToDo>> {
    let mut stmt =
        conn.prepare("SELECT id, uuid, content, deadline, timestamp FROM todos ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_todo)?;
    rows.collect()
}

pub fn search_todos(conn: &Connection, keyword: &str) -> Result<Vec<ToDo>> {
    let mut stmt = conn.prepare(
        "SELECT id, uuid, content, deadline, timestamp FROM todos
         WHERE content LIKE ?1 ESCAPE '\\'
         ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([like_pattern(keyword)], map_todo)?;
    rows.collect()
}

pub fn update_todo(
    conn: &Connection,
    id: i64,
    content: &str,
    deadline: Option<&str>,
) -> Result<usize> {
    conn.execute(
        "UPDATE todos SET content = ?1, deadline = ?2 WHERE id = ?3",
        params![content, deadline, id],
    )
}

pub fn delete_todo(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM todos WHERE id = ?1", [id])
}

/// Copy `todo` into the archive. The active row is not touched.
pub fn insert_completed(conn: &Connection, todo: &ToDo, completed_at: &str) -> Result<i64> {
    conn.execute(
        "INSERT INTO completed_todos (uuid, content, deadline, timestamp, completed_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            todo.uuid,
            todo.content,
            todo.deadline,
            todo.created_at,
            completed_at
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_completed(conn: &Connection) -> Result<Vec<CompletedToDo>> {
    let mut stmt = conn.prepare(
        "SELECT id, uuid, content, deadline, timestamp, completed_at
         FROM completed_todos ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], map_completed)?;
    rows.collect()
}
