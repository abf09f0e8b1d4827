//! Period builders shared by the analysis tests.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::models::{BreakPeriod, Completion, WorkPeriod};

pub fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, minute, 0).unwrap()
}

pub fn finished(id: &str, created_at: DateTime<Utc>, hours: f64) -> WorkPeriod {
    WorkPeriod {
        period_id: id.to_string(),
        created_at,
        finished_at: Completion::Finished(created_at + minutes(hours)),
        breaks: Vec::new(),
    }
}

pub fn open(id: &str, created_at: DateTime<Utc>) -> WorkPeriod {
    WorkPeriod {
        period_id: id.to_string(),
        created_at,
        finished_at: Completion::Pending,
        breaks: Vec::new(),
    }
}

pub fn with_break(mut period: WorkPeriod, offset_hours: f64, hours: Option<f64>) -> WorkPeriod {
    let created_at = period.created_at + minutes(offset_hours);
    period.breaks.push(BreakPeriod {
        break_id: format!("{}-b{}", period.period_id, period.breaks.len()),
        created_at,
        finished_at: hours
            .map(|length| Completion::Finished(created_at + minutes(length)))
            .unwrap_or_default(),
    });
    period
}

fn minutes(hours: f64) -> Duration {
    Duration::minutes((hours * 60.0).round() as i64)
}
