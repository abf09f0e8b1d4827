use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use crate::models::WorkPeriod;

use super::aggregate::analyse_periods;
use super::config::BucketSize;
use super::error::AnalysisError;
use super::types::BucketAnalysisResult;

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Both bounds are exclusive: a period created exactly on a window edge
/// belongs to neither neighbouring window.
fn created_within(period: &WorkPeriod, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    period.created_at > start && period.created_at < end
}

fn next_day(day_start: DateTime<Utc>) -> Option<DateTime<Utc>> {
    day_start.checked_add_signed(Duration::hours(24))
}

/// Periods created within the 24 hours following `day_start`.
pub fn periods_for_day(periods: &[WorkPeriod], day_start: DateTime<Utc>) -> Vec<WorkPeriod> {
    let day_end = next_day(day_start).unwrap_or(DateTime::<Utc>::MAX_UTC);
    periods
        .iter()
        .filter(|period| created_within(period, day_start, day_end))
        .cloned()
        .collect()
}

/// Group periods into day windows stepped 24 hours at a time from `start`.
///
/// Every window origin before `end` gets a `YYYY-MM-DD` key, even when no
/// period falls inside it. Each window rescans the full input. A window that
/// would run past the latest representable instant ends there instead.
pub fn group_periods_by_day(
    periods: &[WorkPeriod],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> BTreeMap<String, Vec<WorkPeriod>> {
    let mut grouped = BTreeMap::new();
    let mut day_start = start;

    while day_start < end {
        grouped.insert(
            day_start.format(DAY_KEY_FORMAT).to_string(),
            periods_for_day(periods, day_start),
        );
        match next_day(day_start) {
            Some(next) => day_start = next,
            None => break,
        }
    }

    grouped
}

/// Split `[start, end)` into contiguous windows of `size` and assign periods.
///
/// The final window is cut short at `end`. A period is matched against the
/// windows in order and leaves the pool as soon as one claims it, so no period
/// lands in two buckets.
pub fn bucket_periods(
    periods: &[WorkPeriod],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    size: BucketSize,
) -> BTreeMap<DateTime<Utc>, Vec<WorkPeriod>> {
    let width = size.as_duration();
    let mut buckets = BTreeMap::new();
    let mut remaining: Vec<WorkPeriod> = periods.to_vec();
    let mut bucket_start = start;

    while bucket_start < end {
        let bucket_end = bucket_start
            .checked_add_signed(width)
            .map_or(end, |candidate| candidate.min(end));

        let (inside, outside): (Vec<WorkPeriod>, Vec<WorkPeriod>) = remaining
            .into_iter()
            .partition(|period| created_within(period, bucket_start, bucket_end));

        buckets.insert(bucket_start, inside);
        remaining = outside;
        bucket_start = bucket_end;
    }

    buckets
}

/// Aggregate every non-empty bucket.
///
/// Empty buckets are left out of the result. `start_time` is the first
/// period's creation time and `end_time` the last period's finish time, in the
/// order the periods were supplied.
pub fn analyse_buckets(
    buckets: &BTreeMap<DateTime<Utc>, Vec<WorkPeriod>>,
) -> Result<BTreeMap<DateTime<Utc>, BucketAnalysisResult>, AnalysisError> {
    let mut analysed = BTreeMap::new();

    for (bucket_start, periods) in buckets {
        let (Some(first), Some(last)) = (periods.first(), periods.last()) else {
            continue;
        };

        let end_time = last
            .finished_at
            .finished_at()
            .ok_or_else(|| AnalysisError::IncompletePeriod {
                period_id: last.period_id.clone(),
            })?;

        analysed.insert(
            *bucket_start,
            BucketAnalysisResult {
                summary: analyse_periods(periods),
                start_time: first.created_at,
                end_time,
            },
        );
    }

    Ok(analysed)
}
