use chrono::Duration;

use super::error::AnalysisError;

/// Width of a fixed-size analysis bucket, in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketSize {
    minutes: u32,
}

impl BucketSize {
    /// One calendar day, used when a request does not name a bucket size.
    pub const DEFAULT_MINUTES: u32 = 1440;

    pub fn from_minutes(minutes: i64) -> Result<Self, AnalysisError> {
        u32::try_from(minutes)
            .ok()
            .filter(|value| *value > 0)
            .map(|minutes| Self { minutes })
            .ok_or(AnalysisError::InvalidBucketSize(minutes))
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn as_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.minutes))
    }
}

impl Default for BucketSize {
    fn default() -> Self {
        Self {
            minutes: Self::DEFAULT_MINUTES,
        }
    }
}
