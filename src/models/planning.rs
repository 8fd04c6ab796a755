use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Activity code carried by cells created from an availability proposal.
pub const AVAILABILITY_CODE: &str = "DISP";

/// Default activity code assigned when a proposed cell is validated.
pub const DEFAULT_VALIDATED_CODE: &str = "RH";

/// Codes offered in the planning grid.
pub const GRID_ACTIVITY_CODES: [&str; 7] = ["RH", "CA", "J'", "EX", "CSF", "F", "DISP"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellStatus {
    #[serde(rename = "proposé")]
    Proposed,
    #[serde(rename = "validé")]
    Validated,
    #[serde(rename = "refusé")]
    Refused,
    #[serde(rename = "vide")]
    Empty,
}

impl CellStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CellStatus::Proposed => "proposé",
            CellStatus::Validated => "validé",
            CellStatus::Refused => "refusé",
            CellStatus::Empty => "vide",
        }
    }
}

impl fmt::Display for CellStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One agent/date entry of the planning grid. At most one cell exists per
/// `(agent_id, date)` pair; `availability_id` points back to the proposal the
/// cell was merged from, when there is one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanningCell {
    pub agent_id: String,
    pub date: String,
    pub activity_code: String,
    pub status: CellStatus,
    #[serde(default)]
    pub availability_id: Option<String>,
}

/// A week of the navigable planning window: its number in the year and the
/// seven dates starting on Monday.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanningWeek {
    pub week_number: u32,
    pub year: i32,
    pub dates: Vec<NaiveDate>,
}
