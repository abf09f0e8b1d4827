use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A span of time bounded by two instants. Callers decide whether the bounds
/// are inclusive; storage queries treat both as exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }
}
