//! Time utilities: parsing and normalizing HH:MM appointment times.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

pub fn normalize_time(t: &str) -> AppResult<String> {
    parse_time(t)
        .map(|v| v.format("%H:%M").to_string())
        .ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

pub fn normalize_optional_time(input: Option<&str>) -> AppResult<Option<String>> {
    input.map(normalize_time).transpose()
}
