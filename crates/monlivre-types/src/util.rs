use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::{Error, Result};

/// Parse a calendar date from the formats the backend emits.
///
/// Accepts plain ISO dates (`2025-01-01`), RFC 3339 timestamps
/// (`2025-01-01T10:00:00Z`, `2025-01-01T10:00:00.000+02:00`) and naive
/// timestamps (`2025-01-01T10:00:00`, `2025-01-01 10:00:00`). Timestamps keep
/// the calendar date as written, without converting to the local zone.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(ts.date());
        }
    }

    None
}

/// Strict variant for user input (command-line arguments, forms)
pub fn parse_date_arg(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| Error::InvalidDate(raw.to_string()))
}

/// Format a date the way the library's French UI shows it (`dd/mm/yyyy`)
pub fn format_fr_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max.saturating_sub(1)).collect::<String>() + "…"
    }
}

/// Case-insensitive substring test; an empty needle always matches
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
