//! Parsing helpers for datetimes and entry IDs.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use uuid::Uuid;

use crate::errors::CliError;

/// A `--date` value: either a full instant or a calendar day in local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput {
    Instant(DateTime<Utc>),
    Day(NaiveDate),
}

/// Parse a datetime string (ISO-8601 or YYYY-MM-DD).
pub fn parse_date(value: &str) -> anyhow::Result<DateInput> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(DateInput::Instant(parsed.with_timezone(&Utc)));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(DateInput::Day(date));
    }

    Err(CliError::invalid_input(format!(
        "Invalid date/time (expected ISO-8601 or YYYY-MM-DD): {}",
        value
    ))
    .into())
}

/// Parse a local time of day (HH:MM, 24-hour).
pub fn parse_time(value: &str) -> anyhow::Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| {
        anyhow::Error::from(CliError::invalid_input(format!(
            "Invalid time (expected HH:MM): {}",
            value
        )))
    })
}

/// Apply `--date` and `--time` to an existing instant.
///
/// A bare day keeps the local time of day of `current`, and a time keeps the
/// local calendar day. Both are interpreted in the local time zone.
pub fn apply_date_time(
    current: DateTime<Utc>,
    date: Option<DateInput>,
    time: Option<NaiveTime>,
) -> anyhow::Result<DateTime<Utc>> {
    let base = match date {
        Some(DateInput::Instant(instant)) => instant,
        Some(DateInput::Day(day)) => {
            let time_of_day = current.with_timezone(&Local).time();
            from_local(day.and_time(time_of_day))?
        }
        None => current,
    };

    match time {
        Some(time) => {
            let day = base.with_timezone(&Local).date_naive();
            from_local(day.and_time(time))
        }
        None => Ok(base),
    }
}

fn from_local(naive: NaiveDateTime) -> anyhow::Result<DateTime<Utc>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| {
            anyhow::Error::from(CliError::invalid_input(format!(
                "{} does not exist in the local time zone",
                naive.format("%Y-%m-%d %H:%M")
            )))
        })
}

/// Parse a full entry UUID.
pub fn parse_entry_id(value: &str) -> anyhow::Result<Uuid> {
    Uuid::parse_str(value.trim()).map_err(|e| {
        anyhow::Error::from(CliError::invalid_input(format!("Invalid entry ID: {}", e)))
    })
}
