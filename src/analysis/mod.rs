//! Work period aggregation and bucketing.
//!
//! Everything here is pure: callers hand in an already fetched snapshot of
//! periods and get fresh result structures back.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod partition;
pub mod totals;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;
#[cfg(test)]
mod property_tests;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::models::WorkPeriod;

pub use aggregate::{analyse_breaks, analyse_periods};
pub use config::BucketSize;
pub use error::AnalysisError;
pub use partition::{analyse_buckets, bucket_periods, group_periods_by_day};
pub use totals::{elapsed_hours, Timed};
pub use types::{AnalysisResult, BreakAnalysis, BucketAnalysisResult, RangedAnalysisResult};

pub fn summarize(periods: &[WorkPeriod]) -> AnalysisResult {
    analyse_periods(periods)
}

/// Per-day summaries over `[start, end)`, one entry per day window.
pub fn summarize_by_day(
    periods: &[WorkPeriod],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> BTreeMap<String, AnalysisResult> {
    group_periods_by_day(periods, start, end)
        .into_iter()
        .map(|(day, grouped)| (day, analyse_periods(&grouped)))
        .collect()
}

pub fn summarize_by_bucket(
    periods: &[WorkPeriod],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    size: BucketSize,
) -> Result<BTreeMap<DateTime<Utc>, BucketAnalysisResult>, AnalysisError> {
    analyse_buckets(&bucket_periods(periods, start, end, size))
}
