use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use thiserror::Error;

use crate::models::TimeRange;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Error, PartialEq)]
pub enum RangeError {
    #[error("invalid timestamp '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        source: chrono::ParseError,
    },

    #[error("start time {start} cannot be after end time {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

fn parse_date(value: &str) -> Result<DateTime<Utc>, RangeError> {
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| {
        RangeError::InvalidTimestamp {
            value: value.to_string(),
            source,
        }
    })?;
    Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

fn parse_minute(value: &str) -> Result<DateTime<Utc>, RangeError> {
    let naive = NaiveDateTime::parse_from_str(value, MINUTE_FORMAT).map_err(|source| {
        RangeError::InvalidTimestamp {
            value: value.to_string(),
            source,
        }
    })?;
    Ok(Utc.from_utc_datetime(&naive))
}

/// Parse a `YYYY-MM-DD` pair. The end day is inclusive, so the returned
/// range stops at midnight after `end`.
pub fn parse_date_range(start: &str, end: &str) -> Result<TimeRange, RangeError> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    if start > end {
        return Err(RangeError::InvalidRange { start, end });
    }
    let end_of_day = end
        .checked_add_signed(Duration::hours(24))
        .ok_or(RangeError::InvalidRange { start, end })?;
    Ok(TimeRange::new(start, end_of_day))
}

/// Parse a `YYYY-MM-DDTHH:MM` pair; the end must come strictly after the start.
pub fn parse_minute_range(start: &str, end: &str) -> Result<TimeRange, RangeError> {
    let start = parse_minute(start)?;
    let end = parse_minute(end)?;
    if end <= start {
        return Err(RangeError::InvalidRange { start, end });
    }
    Ok(TimeRange::new(start, end))
}
