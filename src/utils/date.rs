//! Date utilities: today's date, record timestamps, YYYY-MM-DD validation.

use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDate};

/// Storage format for every timestamp column. Sorts lexicographically.
pub const TIMESTAMP_FMT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FMT: &str = "%Y-%m-%d";

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn today_str() -> String {
    today().format(DATE_FMT).to_string()
}

/// Current local time formatted for the `timestamp` and `completed_at` columns.
pub fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FMT).to_string()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FMT).ok()
}

/// Validate a user-supplied date and return it in canonical form.
pub fn normalize_date(s: &str) -> AppResult<String> {
    parse_date(s)
        .map(|d| d.format(DATE_FMT).to_string())
        .ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

pub fn normalize_optional_date(s: Option<&str>) -> AppResult<Option<String>> {
    s.map(normalize_date).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_accepts_iso_dates() {
        assert_eq!(normalize_date("2024-03-01").unwrap(), "2024-03-01");
        assert_eq!(normalize_date(" 2024-3-1 ").unwrap(), "2024-03-01");
    }

    #[test]
    fn normalize_rejects_other_layouts() {
        assert!(matches!(
            normalize_date("03/01/2024"),
            Err(AppError::InvalidDate(_))
        ));
        assert!(matches!(
            normalize_date("2024-02-30"),
            Err(AppError::InvalidDate(_))
        ));
    }

    #[test]
    fn timestamps_sort_with_time() {
        let ts = now_timestamp();
        assert_eq!(ts.len(), 19);
        assert!(ts.starts_with(&today_str()));
    }
}
