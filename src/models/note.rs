use super::Record;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    pub id: i64,
    pub uuid: String,
    pub name: String,
    pub content: String,
    /// Creation time, refreshed on every update.
    pub modified_at: String,
}

/// Partial update: `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct NoteUpdate {
    pub name: Option<String>,
    pub content: Option<String>,
}

impl NoteUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.content.is_none()
    }
}

impl Record for Note {
    const ENTITY: &'static str = "note";

    fn id(&self) -> i64 {
        self.id
    }

    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Content", "Timestamp"]
    }

    fn cells(&self, _color: bool) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.content.clone(),
            self.modified_at.clone(),
        ]
    }
}
