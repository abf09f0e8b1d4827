use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::period::Completion;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakPeriod {
    pub break_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Completion::is_pending")]
    pub finished_at: Completion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveBreakPeriod {
    pub break_id: String,
    pub created_at: DateTime<Utc>,
}
