use chrono::{DateTime, Duration, Utc};

use crate::models::{BreakPeriod, Completion, WorkPeriod};

const MICROS_PER_HOUR: f64 = 3_600_000_000.0;
const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Hours between two instants. A finish before the start counts as zero.
pub fn elapsed_hours(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let elapsed = end - start;
    if elapsed <= Duration::zero() {
        return 0.0;
    }

    match elapsed.num_microseconds() {
        Some(micros) => micros as f64 / MICROS_PER_HOUR,
        None => elapsed.num_milliseconds() as f64 / MILLIS_PER_HOUR,
    }
}

/// Anything with a creation time and an optional finish time.
pub trait Timed {
    fn created_at(&self) -> DateTime<Utc>;
    fn completion(&self) -> Completion;

    /// Elapsed hours, or `None` while the entity is still open.
    fn total_hours(&self) -> Option<f64> {
        self.completion()
            .finished_at()
            .map(|finished| elapsed_hours(self.created_at(), finished))
    }
}

impl Timed for WorkPeriod {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn completion(&self) -> Completion {
        self.finished_at
    }
}

impl Timed for BreakPeriod {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn completion(&self) -> Completion {
        self.finished_at
    }
}
