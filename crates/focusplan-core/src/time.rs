//! Parsing of the textual time formats accepted on the request boundary.
//!
//! Everything inside the engine is a wall-clock [`NaiveDateTime`] in the
//! schedule's own time zone. Timestamps carrying an offset are reduced to the
//! wall-clock time they name; the zone label itself is never interpreted.
//! Due dates are the exception: they only order tasks, so offset forms are
//! normalised to UTC and compare as absolute moments.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::ValidationError;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const CLOCK_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

/// Parse an `HH:MM` (or `HH:MM:SS`) clock time.
pub fn parse_clock(field: &str, value: &str) -> Result<NaiveTime, ValidationError> {
    let trimmed = value.trim();
    CLOCK_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| ValidationError::InvalidClockTime {
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// Parse an ISO-8601 timestamp into a wall-clock date-time.
///
/// Accepts RFC 3339 (`2025-11-27T12:00:00Z`, `2025-11-27T12:00:00+02:00`),
/// naive forms with or without seconds, and a bare date (midnight).
pub fn parse_instant(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Like [`parse_instant`], reporting the offending field on failure.
pub fn require_instant(field: &str, value: &str) -> Result<NaiveDateTime, ValidationError> {
    parse_instant(value).ok_or_else(|| invalid_instant(field, value))
}

/// Parse a due date as an absolute moment.
///
/// Offset timestamps are normalised to UTC so due dates written in different
/// offsets compare by the moment they name. Naive forms are taken as given.
pub fn parse_due_instant(value: &str) -> Option<NaiveDateTime> {
    match DateTime::parse_from_rfc3339(value.trim()) {
        Ok(dt) => Some(dt.naive_utc()),
        Err(_) => parse_instant(value),
    }
}

/// Like [`parse_due_instant`], reporting the offending field on failure.
pub fn require_due_instant(field: &str, value: &str) -> Result<NaiveDateTime, ValidationError> {
    parse_due_instant(value).ok_or_else(|| invalid_instant(field, value))
}

fn invalid_instant(field: &str, value: &str) -> ValidationError {
    ValidationError::InvalidInstant {
        field: field.to_string(),
        value: value.to_string(),
    }
}

/// Parse a calendar date. A full timestamp is accepted and truncated to its date.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_instant(trimmed).map(|dt| dt.date()))
        .ok_or_else(|| ValidationError::InvalidDate(value.to_string()))
}
