use crate::models::{BreakPeriod, WorkPeriod};

use super::totals::Timed;
use super::types::{AnalysisResult, BreakAnalysis};

/// Count every break and sum the hours of the finished ones.
pub fn analyse_breaks(breaks: &[BreakPeriod]) -> BreakAnalysis {
    BreakAnalysis {
        break_count: breaks.len(),
        total_hours: breaks.iter().filter_map(|item| item.total_hours()).sum(),
    }
}

/// Fold work periods and their breaks into summary statistics.
///
/// Unfinished periods still count towards `total_periods` and their breaks are
/// still analysed. Break hours are taken off `total_work_hours` per period and
/// then taken off again when `net_work_hours` is derived. `gross_work_hours`
/// carries the untouched sum.
pub fn analyse_periods(periods: &[WorkPeriod]) -> AnalysisResult {
    let mut result = AnalysisResult::default();

    for period in periods {
        result.total_periods += 1;

        if let Some(hours) = period.total_hours() {
            result.gross_work_hours += hours;
            result.total_work_hours += hours;
        }

        let breaks = analyse_breaks(&period.breaks);
        result.total_work_hours -= breaks.total_hours;
        result.total_break_hours += breaks.total_hours;
        result.total_breaks += breaks.break_count;
    }

    result.net_work_hours = result.total_work_hours - result.total_break_hours;
    result
}
