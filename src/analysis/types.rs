use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary statistics over a collection of work periods.
///
/// `total_work_hours` already has break time removed once; `net_work_hours`
/// removes it a second time. `gross_work_hours` is the plain sum of finished
/// period durations with no break time removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub total_periods: usize,
    pub total_breaks: usize,
    pub total_work_hours: f64,
    pub total_break_hours: f64,
    pub net_work_hours: f64,
    pub gross_work_hours: f64,
}

/// Break count and finished break hours for one work period.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BreakAnalysis {
    pub break_count: usize,
    pub total_hours: f64,
}

/// Summary of one fixed-size bucket together with the span its periods occupy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketAnalysisResult {
    #[serde(flatten)]
    pub summary: AnalysisResult,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangedAnalysisResult {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub results: AnalysisResult,
}
