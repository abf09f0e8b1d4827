use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("bucket size must be a positive number of minutes, got {0}")]
    InvalidBucketSize(i64),

    /// A bucket's last period has no finish time to report as `endTime`.
    #[error("work period {period_id} has not finished")]
    IncompletePeriod { period_id: String },
}
