//! Timestamp parsing and display in the dashboard's fixed zone.
//!
//! Records arrive with UTC timestamps. Every display string and every
//! calendar date is computed in `America/Chicago`; there is no per-user zone.

use crate::errors::TimeError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

pub const DISPLAY_ZONE: Tz = chrono_tz::America::Chicago;

const DISPLAY_FORMAT: &str = "%B %-d, %Y %-I:%M %p %Z";

// Offset-less layouts are read as UTC.
const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

pub fn parse_utc(raw: &str) -> Result<DateTime<Utc>, TimeError> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TimeError::MalformedTimestamp(raw.to_string()))
}

pub fn to_local(instant: DateTime<Utc>) -> DateTime<Tz> {
    instant.with_timezone(&DISPLAY_ZONE)
}

/// Calendar date of `instant` as seen in the display zone.
pub fn local_date(instant: DateTime<Utc>) -> NaiveDate {
    to_local(instant).date_naive()
}

/// Zero-padded `HH:MM` in the display zone. Sorts chronologically within a day.
pub fn local_hhmm(instant: DateTime<Utc>) -> String {
    to_local(instant).format("%H:%M").to_string()
}

/// Formats as `"June 1, 2024 9:30 AM CDT"`.
pub fn to_local_display(raw: &str) -> Result<String, TimeError> {
    let instant = parse_utc(raw)?;
    Ok(to_local(instant).format(DISPLAY_FORMAT).to_string())
}

/// Display string for a record field, `None` when the value cannot be parsed.
pub fn display_or_absent(raw: &str) -> Option<String> {
    to_local_display(raw).ok()
}

pub fn to_12_hour(hhmm: &str) -> Result<String, TimeError> {
    let malformed = || TimeError::MalformedTime(hhmm.to_string());
    let (hour, minute) = hhmm.trim().split_once(':').ok_or_else(malformed)?;

    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !digits(hour) || hour.len() > 2 || !digits(minute) || minute.len() != 2 {
        return Err(malformed());
    }

    let hour: u32 = hour.parse().map_err(|_| malformed())?;
    let minute: u32 = minute.parse().map_err(|_| malformed())?;
    if hour > 23 || minute > 59 {
        return Err(malformed());
    }

    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    Ok(format!("{display_hour}:{minute:02} {suffix}"))
}
