//! Service-hour tracking against a fixed total.
//!
//! The singleton `service_hours` row always satisfies
//! `remaining_hours = total_hours - SUM(hours.hours_worked)`. Every entry
//! mutation adjusts it inside the same transaction.

use crate::core::{audit, require_hours, require_text};
use crate::db::Storage;
use crate::db::queries::hours as q;
use crate::errors::{AppError, AppResult};
use crate::models::{HourEntry, HourEntryUpdate, ServiceHourBalance};
use crate::utils::date::{normalize_date, today_str};
use uuid::Uuid;

pub struct HourTracker {
    storage: Storage,
}

fn not_found(op: &'static str, id: i64) -> AppError {
    AppError::NotFound {
        op,
        entity: "hour entry",
        id,
    }
}

impl HourTracker {
    pub fn new(storage: &Storage) -> AppResult<Self> {
        storage.ensure_schema()?;
        Ok(Self {
            storage: storage.clone(),
        })
    }

    /// Set (or replace) the total. Remaining is recomputed from the
    /// entries already logged.
    pub fn set_total(&self, total: f64) -> AppResult<ServiceHourBalance> {
        require_hours(total)?;

        let mut pool = self.storage.open()?;
        let tx = pool.conn.transaction()?;
        q::upsert_total(&tx, total)?;
        let balance = q::get_balance(&tx)?.ok_or(AppError::NoBalanceSet { op: "hours total" })?;
        tx.commit()?;

        audit(
            &pool.conn,
            "total",
            "service hours",
            &format!("Total set to {total}"),
        );
        tracing::info!(total, remaining = balance.remaining_hours, "service hour total set");
        Ok(balance)
    }

    /// Log `hours` against `job`. `date` defaults to today.
    pub fn log_hours(&self, job: &str, hours: f64, date: Option<&str>) -> AppResult<HourEntry> {
        require_text("job name", job)?;
        require_hours(hours)?;
        let date = match date {
            Some(d) => normalize_date(d)?,
            None => today_str(),
        };

        let mut pool = self.storage.open()?;
        let tx = pool.conn.transaction()?;

        if q::get_balance(&tx)?.is_none() {
            return Err(AppError::NoBalanceSet { op: "hours log" });
        }
        let uuid = Uuid::new_v4().to_string();
        let id = q::insert_entry(&tx, &uuid, job, hours, &date)?;
        q::adjust_remaining(&tx, -hours)?;
        tx.commit()?;

        audit(
            &pool.conn,
            "add",
            &format!("hours #{id}"),
            &format!("{job}: {hours}h on {date}"),
        );
        tracing::info!(id, hours, "hours logged");

        Ok(HourEntry {
            id,
            uuid,
            job_name: job.to_string(),
            hours_worked: hours,
            date,
        })
    }

    pub fn update_entry(&self, id: i64, patch: HourEntryUpdate) -> AppResult<HourEntry> {
        if let Some(job) = &patch.job_name {
            require_text("job name", job)?;
        }
        if let Some(hours) = patch.hours {
            require_hours(hours)?;
        }
        let date = patch.date.as_deref().map(normalize_date).transpose()?;

        let mut pool = self.storage.open()?;
        let tx = pool.conn.transaction()?;

        let current = q::get_entry(&tx, id)?.ok_or_else(|| not_found("hours update", id))?;
        let delta = current.hours_worked - patch.hours.unwrap_or(current.hours_worked);
        let updated = HourEntry {
            job_name: patch.job_name.unwrap_or(current.job_name),
            hours_worked: patch.hours.unwrap_or(current.hours_worked),
            date: date.unwrap_or(current.date),
            ..current
        };

        q::update_entry(
            &tx,
            id,
            &updated.job_name,
            updated.hours_worked,
            &updated.date,
        )?;
        if q::adjust_remaining(&tx, delta)? == 0 {
            return Err(AppError::NoBalanceSet { op: "hours update" });
        }
        tx.commit()?;

        audit(
            &pool.conn,
            "edit",
            &format!("hours #{id}"),
            &format!("{}: {}h on {}", updated.job_name, updated.hours_worked, updated.date),
        );
        tracing::info!(id, delta, "hour entry updated");
        Ok(updated)
    }

    /// Remove an entry and give its hours back to the balance.
    pub fn delete_entry(&self, id: i64) -> AppResult<()> {
        let mut pool = self.storage.open()?;
        let tx = pool.conn.transaction()?;

        let entry = q::get_entry(&tx, id)?.ok_or_else(|| not_found("hours delete", id))?;
        q::delete_entry(&tx, id)?;
        // No balance row means there is nothing to keep in sync.
        q::adjust_remaining(&tx, entry.hours_worked)?;
        tx.commit()?;

        audit(&pool.conn, "del", &format!("hours #{id}"), "Hour entry deleted");
        tracing::info!(id, hours = entry.hours_worked, "hour entry deleted");
        Ok(())
    }

    pub fn remaining(&self) -> AppResult<f64> {
        self.balance()?
            .map(|b| b.remaining_hours)
            .ok_or(AppError::NoBalanceSet {
                op: "hours remaining",
            })
    }

    pub fn balance(&self) -> AppResult<Option<ServiceHourBalance>> {
        let pool = self.storage.open()?;
        Ok(q::get_balance(&pool.conn)?)
    }

    pub fn list(&self, date: Option<&str>) -> AppResult<Vec<HourEntry>> {
        let date = date.map(normalize_date).transpose()?;
        let pool = self.storage.open()?;
        Ok(q::list_entries(&pool.conn, date.as_deref())?)
    }

    pub fn search(&self, keyword: &str) -> AppResult<Vec<HourEntry>> {
        let pool = self.storage.open()?;
        Ok(q::search_entries(&pool.conn, keyword)?)
    }

    pub fn get(&self, id: i64) -> AppResult<HourEntry> {
        let pool = self.storage.open()?;
        q::get_entry(&pool.conn, id)?.ok_or_else(|| not_found("hours show", id))
    }
}
