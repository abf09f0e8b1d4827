use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::break_period::{ActiveBreakPeriod, BreakPeriod};

/// Finish state of a work or break period.
///
/// Serialized as an optional timestamp so the wire format keeps a plain
/// `finishedAt` field that is absent while the period is still open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<DateTime<Utc>>", into = "Option<DateTime<Utc>>")]
pub enum Completion {
    #[default]
    Pending,
    Finished(DateTime<Utc>),
}

impl Completion {
    pub fn is_pending(&self) -> bool {
        matches!(self, Completion::Pending)
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Completion::Pending => None,
            Completion::Finished(at) => Some(*at),
        }
    }
}

impl From<Option<DateTime<Utc>>> for Completion {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        match value {
            Some(at) => Completion::Finished(at),
            None => Completion::Pending,
        }
    }
}

impl From<Completion> for Option<DateTime<Utc>> {
    fn from(value: Completion) -> Self {
        value.finished_at()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkPeriod {
    pub period_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Completion::is_pending")]
    pub finished_at: Completion,
    #[serde(default)]
    pub breaks: Vec<BreakPeriod>,
}

/// The period a user is currently working in, as reported by `/active`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveWorkPeriod {
    pub period_id: String,
    pub created_at: DateTime<Utc>,
    /// Hours elapsed since `created_at` at the time of the lookup.
    pub active_since: f64,
    pub active_break: Option<ActiveBreakPeriod>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub uid: String,
    pub work_periods: Vec<WorkPeriod>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn pending_period_omits_finished_at() {
        let period = WorkPeriod {
            period_id: "p1".into(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            finished_at: Completion::Pending,
            breaks: Vec::new(),
        };

        let json = serde_json::to_value(&period).unwrap();
        assert_eq!(json["periodId"], "p1");
        assert!(json.get("finishedAt").is_none());
        assert_eq!(json["breaks"], serde_json::json!([]));
    }

    #[test]
    fn finished_at_reads_back_as_finished() {
        let raw = r#"{
            "periodId": "p2",
            "createdAt": "2024-01-01T09:00:00Z",
            "finishedAt": "2024-01-01T11:00:00Z"
        }"#;

        let period: WorkPeriod = serde_json::from_str(raw).unwrap();
        assert_eq!(
            period.finished_at,
            Completion::Finished(Utc.with_ymd_and_hms(2024, 1, 1, 11, 0, 0).unwrap())
        );
        assert!(period.breaks.is_empty());
    }
}
