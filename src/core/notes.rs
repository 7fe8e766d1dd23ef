use crate::core::{audit, require_text};
use crate::db::Storage;
use crate::db::queries::notes as q;
use crate::errors::{AppError, AppResult};
use crate::models::{Note, NoteUpdate};
use crate::utils::date::now_timestamp;
use uuid::Uuid;

pub struct NoteManager {
    storage: Storage,
}

fn not_found(op: &'static str, id: i64) -> AppError {
    AppError::NotFound {
        op,
        entity: "note",
        id,
    }
}

impl NoteManager {
    pub fn new(storage: &Storage) -> AppResult<Self> {
        storage.ensure_schema()?;
        Ok(Self {
            storage: storage.clone(),
        })
    }

    pub fn add(&self, name: &str, content: &str) -> AppResult<Note> {
        require_text("note name", name)?;

        let pool = self.storage.open()?;
        let note = Note {
            id: 0,
            uuid: Uuid::new_v4().to_string(),
            name: name.to_string(),
            content: content.to_string(),
            modified_at: now_timestamp(),
        };
        let id = q::insert_note(&pool.conn, &note.uuid, name, content, &note.modified_at)?;

        audit(&pool.conn, "add", &format!("note #{id}"), name);
        tracing::info!(id, "note added");
        Ok(Note { id, ..note })
    }

    /// Case-insensitive substring match on name or content. Empty matches all.
    pub fn search(&self, keyword: &str) -> AppResult<Vec<Note>> {
        let pool = self.storage.open()?;
        Ok(q::search_notes(&pool.conn, keyword)?)
    }

    pub fn list(&self) -> AppResult<Vec<Note>> {
        let pool = self.storage.open()?;
        Ok(q::list_notes(&pool.conn)?)
    }

    pub fn get(&self, id: i64) -> AppResult<Note> {
        let pool = self.storage.open()?;
        q::get_note(&pool.conn, id)?.ok_or_else(|| not_found("note show", id))
    }

    pub fn update(&self, id: i64, patch: NoteUpdate) -> AppResult<Note> {
        if let Some(name) = &patch.name {
            require_text("note name", name)?;
        }

        let mut pool = self.storage.open()?;
        let tx = pool.conn.transaction()?;

        let current = q::get_note(&tx, id)?.ok_or_else(|| not_found("note update", id))?;
        let updated = Note {
            name: patch.name.unwrap_or(current.name),
            content: patch.content.unwrap_or(current.content),
            modified_at: now_timestamp(),
            ..current
        };
        q::update_note(&tx, id, &updated.name, &updated.content, &updated.modified_at)?;
        tx.commit()?;

        audit(&pool.conn, "edit", &format!("note #{id}"), &updated.name);
        tracing::info!(id, "note updated");
        Ok(updated)
    }

    pub fn delete(&self, id: i64) -> AppResult<()> {
        let pool = self.storage.open()?;
        if q::delete_note(&pool.conn, id)? == 0 {
            return Err(not_found("note delete", id));
        }
        audit(&pool.conn, "del", &format!("note #{id}"), "Note deleted");
        tracing::info!(id, "note deleted");
        Ok(())
    }
}
