use super::Record;
use crate::utils::colors::optional_or;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appointment {
    pub id: i64,
    pub uuid: String,
    pub title: String,
    pub date: String,
    /// `None` means an all-day appointment.
    pub time: Option<String>,
    pub description: Option<String>,
}

/// Partial update. The nested options on `time` and `description`
/// distinguish "keep" (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct AppointmentUpdate {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<Option<String>>,
    pub description: Option<Option<String>>,
}

impl AppointmentUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.description.is_none()
    }
}

impl Record for Appointment {
    const ENTITY: &'static str = "appointment";

    fn id(&self) -> i64 {
        self.id
    }

    fn headers() -> &'static [&'static str] {
        &["ID", "Title", "Date", "Time", "Description"]
    }

    fn cells(&self, color: bool) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.date.clone(),
            optional_or(self.time.as_deref(), "All Day", color),
            optional_or(self.description.as_deref(), "No description", color),
        ]
    }
}
