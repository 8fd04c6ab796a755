use std::fmt;

use serde::{Deserialize, Serialize};

/// Absence request lifecycle. Serialized values are the French wire labels
/// the collaborator contracts transmit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbsenceStatus {
    #[serde(rename = "En cours")]
    Pending,
    #[serde(rename = "Accepté par le remplaçant")]
    AcceptedByReplacement,
    #[serde(rename = "Refusé par le remplaçant")]
    RejectedByReplacement,
    #[serde(rename = "Validé par le cadre")]
    ApprovedByManager,
    #[serde(rename = "Refusé par le cadre")]
    RejectedByManager,
}

impl AbsenceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AbsenceStatus::Pending => "En cours",
            AbsenceStatus::AcceptedByReplacement => "Accepté par le remplaçant",
            AbsenceStatus::RejectedByReplacement => "Refusé par le remplaçant",
            AbsenceStatus::ApprovedByManager => "Validé par le cadre",
            AbsenceStatus::RejectedByManager => "Refusé par le cadre",
        }
    }

    /// Manager decisions are final; nothing moves out of these states.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            AbsenceStatus::ApprovedByManager | AbsenceStatus::RejectedByManager
        )
    }
}

impl fmt::Display for AbsenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacementDecision {
    Accept,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerDecision {
    Approve,
    Reject,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceRequest {
    pub id: String,
    pub staff_id: String,
    pub service_id: String,
    pub start_date: String,
    pub start_hour: String,
    pub end_date: String,
    pub end_hour: String,
    pub reason_code: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub replacement_id: Option<String>,
    pub status: AbsenceStatus,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceCreateInput {
    pub staff_id: String,
    pub service_id: String,
    pub start_date: String,
    pub start_hour: String,
    pub end_date: String,
    pub end_hour: String,
    pub reason_code: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub replacement_id: Option<String>,
}
