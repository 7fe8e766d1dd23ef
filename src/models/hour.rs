use super::Record;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourEntry {
    pub id: i64,
    pub uuid: String,
    pub job_name: String,
    pub hours_worked: f64,
    pub date: String,
}

#[derive(Debug, Clone, Default)]
pub struct HourEntryUpdate {
    pub job_name: Option<String>,
    pub hours: Option<f64>,
    pub date: Option<String>,
}

impl HourEntryUpdate {
    pub fn is_empty(&self) -> bool {
        self.job_name.is_none() && self.hours.is_none() && self.date.is_none()
    }
}

/// The singleton `service_hours` row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ServiceHourBalance {
    pub total_hours: f64,
    pub remaining_hours: f64,
}

impl Record for HourEntry {
    const ENTITY: &'static str = "hour entry";

    fn id(&self) -> i64 {
        self.id
    }

    fn headers() -> &'static [&'static str] {
        &["ID", "Job Name", "Hours Worked", "Date"]
    }

    fn cells(&self, _color: bool) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.job_name.clone(),
            self.hours_worked.to_string(),
            self.date.clone(),
        ]
    }
}
