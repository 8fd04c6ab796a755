use serde::{Deserialize, Serialize};

/// One recurring slot in an employee's weekly pattern. `day_of_week` holds a
/// French day name ("Lundi", "Mardi", …); times are `HH:MM`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkDay {
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
}

/// The single active contract of an employee. Replaced wholesale by a
/// manager, never edited field by field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub employee_id: String,
    pub contract_type: String,
    pub working_period: String,
    pub weekly_hours: f64,
    pub daily_hours: f64,
    #[serde(default)]
    pub work_days: Vec<WorkDay>,
}
