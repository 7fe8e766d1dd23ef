use super::Record;
use crate::utils::colors::optional_or;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToDo {
    pub id: i64,
    pub uuid: String,
    pub content: String,
    pub deadline: Option<String>,
    pub created_at: String,
}

/// Archived copy of a completed to-do. Never modified after insertion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletedToDo {
    pub id: i64,
    pub uuid: String,
    pub content: String,
    pub deadline: Option<String>,
    pub created_at: String,
    pub completed_at: String,
}

/// Partial update. `deadline: Some(None)` clears the deadline.
#[derive(Debug, Clone, Default)]
pub struct ToDoUpdate {
    pub content: Option<String>,
    pub deadline: Option<Option<String>>,
}

impl ToDoUpdate {
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.deadline.is_none()
    }
}

impl Record for ToDo {
    const ENTITY: &'static str = "to-do";

    fn id(&self) -> i64 {
        self.id
    }

    fn headers() -> &'static [&'static str] {
        &["ID", "Content", "Deadline", "Timestamp"]
    }

    fn cells(&self, color: bool) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.content.clone(),
            optional_or(self.deadline.as_deref(), "No deadline", color),
            self.created_at.clone(),
        ]
    }
}

impl Record for CompletedToDo {
    const ENTITY: &'static str = "completed to-do";

    fn id(&self) -> i64 {
        self.id
    }

    fn headers() -> &'static [&'static str] {
        &["ID", "Content", "Deadline", "Created At", "Completed At"]
    }

    fn cells(&self, color: bool) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.content.clone(),
            optional_or(self.deadline.as_deref(), "No deadline", color),
            self.created_at.clone(),
            self.completed_at.clone(),
        ]
    }
}
