use crate::core::{audit, require_text};
use crate::db::Storage;
use crate::db::queries::todos as q;
use crate::errors::{AppError, AppResult};
use crate::models::{CompletedToDo, ToDo, ToDoUpdate};
use crate::utils::date::{normalize_optional_date, now_timestamp};
use uuid::Uuid;

pub struct ToDoManager {
    storage: Storage,
}

fn not_found(op: &'static str, id: i64) -> AppError {
    AppError::NotFound {
        op,
        entity: "to-do",
        id,
    }
}

impl ToDoManager {
    pub fn new(storage: &Storage) -> AppResult<Self> {
        storage.ensure_schema()?;
        Ok(Self {
            storage: storage.clone(),
        })
    }

    pub fn add(&self, content: &str, deadline: Option<&str>) -> AppResult<ToDo> {
        require_text("to-do content", content)?;
        let deadline = normalize_optional_date(deadline)?;

        let pool = self.storage.open()?;
        let todo = ToDo {
            id: 0,
            uuid: Uuid::new_v4().to_string(),
            content: content.to_string(),
            deadline,
            created_at: now_timestamp(),
        };
        let id = q::insert_todo(
            &pool.conn,
            &todo.uuid,
            &todo.content,
            todo.deadline.as_deref(),
            &todo.created_at,
        )?;

        audit(&pool.conn, "add", &format!("todo #{id}"), content);
        tracing::info!(id, "to-do added");
        Ok(ToDo { id, ..todo })
    }

    pub fn search(&self, keyword: &str) -> AppResult<Vec<ToDo>> {
        let pool = self.storage.open()?;
        Ok(q::search_todos(&pool.conn, keyword)?)
    }

    pub fn list(&self) -> AppResult<Vec<ToDo>> {
        let pool = self.storage.open()?;
        Ok(q::list_todos(&pool.conn)?)
    }

    pub fn list_completed(&self) -> AppResult<Vec<CompletedToDo>> {
        let pool = self.storage.open()?;
        Ok(q::list_completed(&pool.conn)?)
    }

    pub fn get(&self, id: i64) -> AppResult<ToDo> {
        let pool = self.storage.open()?;
        q::get_todo(&pool.conn, id)?.ok_or_else(|| not_found("todo show", id))
    }

    pub fn update(&self, id: i64, patch: ToDoUpdate) -> AppResult<ToDo> {
        if let Some(content) = &patch.content {
            require_text("to-do content", content)?;
        }
        let deadline = match patch.deadline {
            Some(d) => Some(normalize_optional_date(d.as_deref())?),
            None => None,
        };

        let mut pool = self.storage.open()?;
        let tx = pool.conn.transaction()?;

        let current = q::get_todo(&tx, id)?.ok_or_else(|| not_found("todo update", id))?;
        let updated = ToDo {
            content: patch.content.unwrap_or(current.content),
            deadline: deadline.unwrap_or(current.deadline),
            ..current
        };
        q::update_todo(&tx, id, &updated.content, updated.deadline.as_deref())?;
        tx.commit()?;

        audit(&pool.conn, "edit", &format!("todo #{id}"), &updated.content);
        tracing::info!(id, "to-do updated");
        Ok(updated)
    }

    pub fn delete(&self, id: i64) -> AppResult<()> {
        let pool = self.storage.open()?;
        if q::delete_todo(&pool.conn, id)? == 0 {
            return Err(not_found("todo delete", id));
        }
        audit(&pool.conn, "del", &format!("todo #{id}"), "To-do deleted");
        tracing::info!(id, "to-do deleted");
        Ok(())
    }

    /// Move a to-do into the completed archive. Either both the archive
    /// insert and the active delete happen, or neither does.
    pub fn complete(&self, id: i64) -> AppResult<CompletedToDo> {
        let mut pool = self.storage.open()?;
        let tx = pool.conn.transaction()?;

        let todo = q::get_todo(&tx, id)?.ok_or_else(|| not_found("todo complete", id))?;
        let completed_at = now_timestamp();
        let archived_id = q::insert_completed(&tx, &todo, &completed_at)?;
        q::delete_todo(&tx, id)?;
        tx.commit()?;

        audit(
            &pool.conn,
            "done",
            &format!("todo #{id}"),
            &format!("Archived as completed #{archived_id}"),
        );
        tracing::info!(id, archived_id, "to-do completed");

        Ok(CompletedToDo {
            id: archived_id,
            uuid: todo.uuid,
            content: todo.content,
            deadline: todo.deadline,
            created_at: todo.created_at,
            completed_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testutil::storage;

    #[test]
    fn add_normalizes_deadline_and_allows_none() {
        let (_dir, s) = storage();
        let todos = ToDoManager::new(&s).unwrap();

        let with = todos.add("Pay rent", Some("2024-7-1")).unwrap();
        let without = todos.add("Call mom", None).unwrap();

        assert_eq!(with.deadline.as_deref(), Some("2024-07-01"));
        assert_eq!(without.deadline, None);
        assert_eq!(todos.list().unwrap(), vec![with, without]);
    }

    #[test]
    fn bad_deadline_is_rejected() {
        let (_dir, s) = storage();
        let todos = ToDoManager::new(&s).unwrap();

        let err = todos.add("Pay rent", Some("tomorrow")).unwrap_err();
        assert!(matches!(err, AppError::InvalidDate(_)), "{err}");
        assert!(todos.list().unwrap().is_empty());
    }

    #[test]
    fn complete_moves_row_into_archive() {
        let (_dir, s) = storage();
        let todos = ToDoManager::new(&s).unwrap();
        let t = todos.add("Pay rent", Some("2024-07-01")).unwrap();

        let done = todos.complete(t.id).unwrap();

        assert!(todos.list().unwrap().is_empty());
        let archive = todos.list_completed().unwrap();
        assert_eq!(archive, vec![done.clone()]);
        assert_eq!(done.content, "Pay rent");
        assert_eq!(done.deadline.as_deref(), Some("2024-07-01"));
        assert_eq!(done.uuid, t.uuid);
        assert_eq!(done.created_at, t.created_at);
    }

    #[test]
    fn complete_missing_is_not_found() {
        let (_dir, s) = storage();
        let todos = ToDoManager::new(&s).unwrap();

        let err = todos.complete(7).unwrap_err();
        assert!(matches!(err, AppError::NotFound { id: 7, .. }));
        assert!(todos.list_completed().unwrap().is_empty());
    }

    #[test]
    fn failed_delete_rolls_back_archive_insert() {
        let (_dir, s) = storage();
        let todos = ToDoManager::new(&s).unwrap();
        let t = todos.add("Pay rent", None).unwrap();

        let pool = s.open().unwrap();
        pool.conn
            .execute_batch(
                "CREATE TRIGGER block_delete BEFORE DELETE ON todos
                 BEGIN SELECT RAISE(ABORT, 'boom'); END;",
            )
            .unwrap();
        drop(pool);

        assert!(todos.complete(t.id).is_err());
        assert_eq!(todos.list().unwrap(), vec![t]);
        assert!(todos.list_completed().unwrap().is_empty());
    }

    #[test]
    fn update_can_clear_deadline() {
        let (_dir, s) = storage();
        let todos = ToDoManager::new(&s).unwrap();
        let t = todos.add("Pay rent", Some("2024-07-01")).unwrap();

        let cleared = todos
            .update(
                t.id,
                ToDoUpdate {
                    deadline: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(cleared.deadline, None);
        assert_eq!(cleared.content, "Pay rent");

        let renamed = todos
            .update(
                t.id,
                ToDoUpdate {
                    content: Some("Pay rent early".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(renamed.deadline, None);
        assert_eq!(todos.get(t.id).unwrap(), renamed);
    }

    #[test]
    fn search_matches_content_substring() {
        let (_dir, s) = storage();
        let todos = ToDoManager::new(&s).unwrap();
        todos.add("Buy MILK", None).unwrap();
        todos.add("Walk dog", None).unwrap();

        let hits = todos.search("milk").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].content, "Buy MILK");
    }

    #[test]
    fn delete_missing_is_not_found() {
        let (_dir, s) = storage();
        let todos = ToDoManager::new(&s).unwrap();
        assert!(matches!(
            todos.delete(1),
            Err(AppError::NotFound { .. })
        ));
    }
}
