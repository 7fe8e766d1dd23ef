use crate::core::{audit, require_text};
use crate::db::Storage;
use crate::db::queries::appointments as q;
use crate::errors::{AppError, AppResult};
use crate::models::{Appointment, AppointmentUpdate};
use crate::utils::date::normalize_date;
use crate::utils::time::normalize_optional_time;
use uuid::Uuid;

pub struct CalendarManager {
    storage: Storage,
}

fn not_found(op: &'static str, id: i64) -> AppError {
    AppError::NotFound {
        op,
        entity: "appointment",
        id,
    }
}

impl CalendarManager {
    pub fn new(storage: &Storage) -> AppResult<Self> {
        storage.ensure_schema()?;
        Ok(Self {
            storage: storage.clone(),
        })
    }

    /// `time: None` stores an all-day appointment.
    pub fn add(
        &self,
        title: &str,
        date: &str,
        time: Option<&str>,
        description: Option<&str>,
    ) -> AppResult<Appointment> {
        require_text("appointment title", title)?;
        let date = normalize_date(date)?;
        let time = normalize_optional_time(time)?;

        let pool = self.storage.open()?;
        let uuid = Uuid::new_v4().to_string();
        let id = q::insert_appointment(
            &pool.conn,
            &uuid,
            title,
            &date,
            time.as_deref(),
            description,
        )?;

        audit(
            &pool.conn,
            "add",
            &format!("appointment #{id}"),
            &format!("{title} on {date}"),
        );
        tracing::info!(id, %date, "appointment added");

        Ok(Appointment {
            id,
            uuid,
            title: title.to_string(),
            date,
            time,
            description: description.map(str::to_string),
        })
    }

    pub fn list(&self, date: Option<&str>) -> AppResult<Vec<Appointment>> {
        let date = date.map(normalize_date).transpose()?;
        let pool = self.storage.open()?;
        Ok(q::list_appointments(&pool.conn, date.as_deref())?)
    }

    /// Substring match on title or description.
    pub fn search(&self, keyword: &str) -> AppResult<Vec<Appointment>> {
        let pool = self.storage.open()?;
        Ok(q::search_appointments(&pool.conn, keyword)?)
    }

    pub fn get(&self, id: i64) -> AppResult<Appointment> {
        let pool = self.storage.open()?;
        q::get_appointment(&pool.conn, id)?.ok_or_else(|| not_found("cal show", id))
    }

    pub fn update(&self, id: i64, patch: AppointmentUpdate) -> AppResult<Appointment> {
        if let Some(title) = &patch.title {
            require_text("appointment title", title)?;
        }
        let date = patch.date.as_deref().map(normalize_date).transpose()?;
        let time = match patch.time {
            Some(t) => Some(normalize_optional_time(t.as_deref())?),
            None => None,
        };

        let mut pool = self.storage.open()?;
        let tx = pool.conn.transaction()?;

        let current =
            q::get_appointment(&tx, id)?.ok_or_else(|| not_found("cal update", id))?;
        let updated = Appointment {
            title: patch.title.unwrap_or(current.title),
            date: date.unwrap_or(current.date),
            time: time.unwrap_or(current.time),
            description: patch.description.unwrap_or(current.description),
            ..current
        };
        q::update_appointment(&tx, &updated)?;
        tx.commit()?;

        audit(
            &pool.conn,
            "edit",
            &format!("appointment #{id}"),
            &updated.title,
        );
        tracing::info!(id, "appointment updated");
        Ok(updated)
    }

    pub fn delete(&self, id: i64) -> AppResult<()> {
        let pool = self.storage.open()?;
        if q::delete_appointment(&pool.conn, id)? == 0 {
            return Err(not_found("cal delete", id));
        }
        audit(
            &pool.conn,
            "del",
            &format!("appointment #{id}"),
            "Appointment deleted",
        );
        tracing::info!(id, "appointment deleted");
        Ok(())
    }
}
