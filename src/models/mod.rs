//! Typed records returned by the managers.

pub mod appointment;
pub mod hour;
pub mod note;
pub mod todo;

pub use appointment::{Appointment, AppointmentUpdate};
pub use hour::{HourEntry, HourEntryUpdate, ServiceHourBalance};
pub use note::{Note, NoteUpdate};
pub use todo::{CompletedToDo, ToDo, ToDoUpdate};

use serde::Serialize;

/// A stored row that can be shown in a grid and picked by id.
pub trait Record {
    const ENTITY: &'static str;

    fn id(&self) -> i64;
    fn headers() -> &'static [&'static str];
    /// Display cells in `headers()` order. `color` greys out placeholders.
    fn cells(&self, color: bool) -> Vec<String>;
}

/// Row of the internal `log` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}
