use std::collections::HashSet;

use chrono::Weekday;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::contract::Contract;
use crate::repository::ContractRepository;
use crate::services::date_utils;
use crate::services::schedule_service::REFERENCE_WEEKLY_HOURS;

pub struct ContractService<R: ContractRepository> {
    repo: R,
}

impl<R: ContractRepository> ContractService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// A missing contract is a normal state for a new employee, hence the
    /// `Option` instead of a not-found error.
    pub fn find_by_employee(&self, employee_id: &str) -> AppResult<Option<Contract>> {
        self.repo.get_by_employee(employee_id)
    }

    /// Replaces the employee's contract wholesale after validating it.
    pub fn replace(&self, contract: Contract) -> AppResult<Contract> {
        validate_contract(&contract)?;
        let stored = self.repo.replace(contract)?;
        info!(target: "app::contract", employee_id = %stored.employee_id, "contract replaced");
        Ok(stored)
    }
}

/// Rejects duplicate work days and inverted time ranges.
pub fn validate_contract(contract: &Contract) -> AppResult<()> {
    let mut seen = HashSet::new();
    for day in &contract.work_days {
        if !seen.insert(day.day_of_week.as_str()) {
            return Err(AppError::validation(
                "Les jours de travail doivent être uniques",
            ));
        }
        let start = date_utils::parse_time(&day.start_time)?;
        let end = date_utils::parse_time(&day.end_time)?;
        if end <= start {
            return Err(AppError::validation(
                "L'heure de fin doit être postérieure à l'heure de début",
            ));
        }
    }
    Ok(())
}

pub fn is_working_day_of_week(contract: &Contract, day: Weekday) -> bool {
    let name = date_utils::day_name(day);
    contract.work_days.iter().any(|entry| entry.day_of_week == name)
}

/// Sums the weekly pattern's hours, scaled by the declared weekly hours
/// against the 35h full-time reference when the contract declares them.
pub fn weekly_hours_from_work_days(contract: &Contract) -> AppResult<f64> {
    let mut total = 0.0;
    for day in &contract.work_days {
        let start = date_utils::parse_time(&day.start_time)?;
        let end = date_utils::parse_time(&day.end_time)?;
        let minutes = date_utils::time_to_minutes(end) - date_utils::time_to_minutes(start);
        total += minutes as f64 / 60.0;
    }
    if contract.weekly_hours > 0.0 {
        total *= contract.weekly_hours / REFERENCE_WEEKLY_HOURS;
    }
    Ok(total)
}
