use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::Completion;

/// Fixed-width UTC RFC 3339 with nanoseconds, so that SQLite string
/// comparison matches chronological order and values read back unchanged.
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn format_completion(value: Completion) -> Option<String> {
    value.finished_at().map(format_datetime)
}

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

pub fn parse_completion(value: Option<String>, field: &str) -> Result<Completion> {
    match value {
        Some(raw) => parse_datetime(&raw, field).map(Completion::Finished),
        None => Ok(Completion::Pending),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn formatted_timestamps_sort_chronologically() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let later = base + Duration::nanoseconds(1_500);

        let a = format_datetime(base);
        let b = format_datetime(later);
        assert_eq!(a, "2024-01-01T09:00:00.000000000Z");
        assert_eq!(a.len(), b.len());
        assert!(a < b);
    }

    #[test]
    fn completion_round_trips_through_text() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 17, 30, 0).unwrap();
        let stored = format_completion(Completion::Finished(at));

        assert_eq!(
            parse_completion(stored, "finished_at").unwrap(),
            Completion::Finished(at)
        );
        assert_eq!(
            parse_completion(None, "finished_at").unwrap(),
            Completion::Pending
        );
    }

    #[test]
    fn bad_timestamp_names_the_field() {
        let err = parse_datetime("yesterday", "created_at").unwrap_err();
        assert!(err.to_string().contains("created_at"));
    }
}
