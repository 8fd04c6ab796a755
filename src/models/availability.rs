use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvailabilityStatus {
    #[serde(rename = "proposé")]
    Proposed,
    #[serde(rename = "validé")]
    Validated,
    #[serde(rename = "refusé")]
    Refused,
}

impl AvailabilityStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AvailabilityStatus::Proposed => "proposé",
            AvailabilityStatus::Validated => "validé",
            AvailabilityStatus::Refused => "refusé",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            AvailabilityStatus::Validated | AvailabilityStatus::Refused
        )
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityDecision {
    Validate,
    Refuse,
}

/// A time slot an employee volunteers for. `date` is `YYYY-MM-DD`, times are
/// `HH:MM`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityProposal {
    pub id: String,
    pub user_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub comment: Option<String>,
    pub status: AvailabilityStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityCreateInput {
    pub user_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub comment: Option<String>,
}
