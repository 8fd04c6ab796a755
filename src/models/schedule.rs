use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One projected calendar day. `is_working_day` is the final flag: the
/// contract covers the weekday and no approved absence does.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDay {
    pub date: NaiveDate,
    pub is_working_day: bool,
    pub is_absent_day: bool,
}

/// A manager-approved absence reduced to day granularity, bounds inclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkedTotals {
    pub worked_days: u32,
    pub worked_hours: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
    pub worked_days: u32,
    pub days_off: u32,
    pub absence_days: u32,
}
