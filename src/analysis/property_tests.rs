use std::collections::HashSet;

use chrono::Duration;
use proptest::prelude::*;

use super::fixtures::at;
use super::*;
use crate::models::{BreakPeriod, Completion, WorkPeriod};

/// Periods spread over the first week of January 2024, minute resolution.
fn arb_periods(with_breaks: bool) -> impl Strategy<Value = Vec<WorkPeriod>> {
    let max_breaks: usize = if with_breaks { 3 } else { 0 };
    prop::collection::vec(
        (
            0i64..(7 * 24 * 60),
            prop::option::of(1i64..600),
            prop::collection::vec((0i64..300, prop::option::of(1i64..60)), 0..=max_breaks),
        ),
        0..25,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(index, (offset, length, breaks))| {
                let created_at = at(1, 0, 0) + Duration::minutes(offset);
                WorkPeriod {
                    period_id: format!("p{index}"),
                    created_at,
                    finished_at: length
                        .map(|minutes| Completion::Finished(created_at + Duration::minutes(minutes)))
                        .unwrap_or_default(),
                    breaks: breaks
                        .into_iter()
                        .enumerate()
                        .map(|(b, (start, len))| {
                            let break_start = created_at + Duration::minutes(start);
                            BreakPeriod {
                                break_id: format!("p{index}-b{b}"),
                                created_at: break_start,
                                finished_at: len
                                    .map(|minutes| {
                                        Completion::Finished(break_start + Duration::minutes(minutes))
                                    })
                                    .unwrap_or_default(),
                            }
                        })
                        .collect(),
                }
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_total_periods_matches_input(periods in arb_periods(true)) {
        prop_assert_eq!(summarize(&periods).total_periods, periods.len());
    }

    #[test]
    fn prop_no_breaks_means_work_equals_net(periods in arb_periods(false)) {
        let result = summarize(&periods);
        prop_assert_eq!(result.total_breaks, 0);
        prop_assert_eq!(result.total_work_hours, result.net_work_hours);
        prop_assert_eq!(result.total_work_hours, result.gross_work_hours);
    }

    #[test]
    fn prop_summarize_is_idempotent(periods in arb_periods(true)) {
        prop_assert_eq!(summarize(&periods), summarize(&periods));
    }

    #[test]
    fn prop_day_grouping_has_one_key_per_day(days in 0i64..40) {
        let start = at(1, 0, 0);
        let grouped = group_periods_by_day(&[], start, start + Duration::days(days));
        prop_assert_eq!(grouped.len() as i64, days);
    }

    #[test]
    fn prop_buckets_never_share_a_period(
        periods in arb_periods(false),
        minutes in 1i64..1500,
        range_hours in 1i64..(8 * 24),
    ) {
        let size = BucketSize::from_minutes(minutes).unwrap();
        let start = at(1, 0, 0);
        let buckets = bucket_periods(&periods, start, start + Duration::hours(range_hours), size);

        let mut seen = HashSet::new();
        for assigned in buckets.values() {
            for period in assigned {
                prop_assert!(seen.insert(period.period_id.clone()), "{} assigned twice", period.period_id);
                prop_assert!(periods.contains(period));
            }
        }
    }
}
