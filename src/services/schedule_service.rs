use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::error::AppResult;
use crate::models::absence::{AbsenceRequest, AbsenceStatus};
use crate::models::contract::Contract;
use crate::models::schedule::{AbsenceInterval, MonthlyStats, ScheduleDay, WorkedTotals};
use crate::services::contract_service::is_working_day_of_week;
use crate::services::date_utils;

/// Assumed hours per worked day, independent of the contract's declared
/// daily hours.
pub const HOURS_PER_WORKED_DAY: f64 = 8.0;

/// Full-time weekly hours used as the normalization base.
pub const REFERENCE_WEEKLY_HOURS: f64 = 35.0;

/// Extracts the day-granularity intervals of the given staff member's
/// manager-approved absences. Other statuses never block a day.
pub fn approved_intervals(
    absences: &[AbsenceRequest],
    staff_id: &str,
) -> AppResult<Vec<AbsenceInterval>> {
    let mut intervals = Vec::new();
    for absence in absences
        .iter()
        .filter(|a| a.staff_id == staff_id && a.status == AbsenceStatus::ApprovedByManager)
    {
        intervals.push(AbsenceInterval {
            start: date_utils::parse_date(&absence.start_date)?,
            end: date_utils::parse_date(&absence.end_date)?,
        });
    }
    Ok(intervals)
}

/// True when the date falls inside any approved interval, both bounds
/// included.
pub fn is_absent_day(intervals: &[AbsenceInterval], date: NaiveDate) -> bool {
    intervals
        .iter()
        .any(|interval| interval.start <= date && date <= interval.end)
}

/// Projects the contract over an inclusive date range. A day counts as
/// working when the contract schedules it and no approved absence covers
/// it; an absent day is never a working day.
pub fn project(
    contract: &Contract,
    intervals: &[AbsenceInterval],
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<ScheduleDay> {
    let mut days = Vec::new();
    let mut cursor = from;
    while cursor <= to {
        let scheduled = is_working_day_of_week(contract, cursor.weekday());
        let absent = is_absent_day(intervals, cursor);
        days.push(ScheduleDay {
            date: cursor,
            is_working_day: scheduled && !absent,
            is_absent_day: absent,
        });
        cursor = match cursor.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    debug!(
        target: "app::schedule",
        from = %from,
        to = %to,
        days = days.len(),
        "schedule projected"
    );
    days
}

/// Counts the worked days over the range and converts them to hours at the
/// fixed per-day rate.
pub fn total_worked_days_and_hours(
    contract: &Contract,
    intervals: &[AbsenceInterval],
    from: NaiveDate,
    to: NaiveDate,
) -> WorkedTotals {
    let worked_days = project(contract, intervals, from, to)
        .iter()
        .filter(|day| day.is_working_day)
        .count() as u32;
    WorkedTotals {
        worked_days,
        worked_hours: f64::from(worked_days) * HOURS_PER_WORKED_DAY,
    }
}

/// Scales raw worked hours by the contract's weekly hours against the
/// 35-hour reference. A contract with no declared weekly hours keeps the
/// raw total.
pub fn normalized_total_hours(totals: &WorkedTotals, weekly_hours: f64) -> f64 {
    if weekly_hours > 0.0 {
        totals.worked_hours * weekly_hours / REFERENCE_WEEKLY_HOURS
    } else {
        totals.worked_hours
    }
}

/// Buckets every day of the month into exactly one of worked, off, or
/// absent. Absence takes priority over the contract schedule.
pub fn monthly_stats(
    contract: &Contract,
    intervals: &[AbsenceInterval],
    year: i32,
    month: u32,
) -> AppResult<MonthlyStats> {
    let (first, last) = date_utils::month_bounds(year, month)?;
    let mut stats = MonthlyStats::default();
    let mut cursor = first;
    while cursor <= last {
        if is_absent_day(intervals, cursor) {
            stats.absence_days += 1;
        } else if is_working_day_of_week(contract, cursor.weekday()) {
            stats.worked_days += 1;
        } else {
            stats.days_off += 1;
        }
        cursor = match cursor.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    Ok(stats)
}

/// Counts the working days left strictly after `from` through the end of
/// its month.
pub fn remaining_work_days(
    contract: &Contract,
    intervals: &[AbsenceInterval],
    from: NaiveDate,
) -> u32 {
    let mut count = 0;
    let mut cursor = from;
    loop {
        cursor = match cursor.succ_opt() {
            Some(next) => next,
            None => break,
        };
        if cursor.month() != from.month() || cursor.year() != from.year() {
            break;
        }
        if is_working_day_of_week(contract, cursor.weekday()) && !is_absent_day(intervals, cursor) {
            count += 1;
        }
    }
    count
}

/// First day strictly after `from`, within the same month, that the
/// contract leaves free and no absence covers. `None` when the month has
/// no such day left.
pub fn next_day_off(
    contract: &Contract,
    intervals: &[AbsenceInterval],
    from: NaiveDate,
) -> Option<NaiveDate> {
    let mut cursor = from;
    loop {
        cursor = cursor.succ_opt()?;
        if cursor.month() != from.month() || cursor.year() != from.year() {
            return None;
        }
        if !is_working_day_of_week(contract, cursor.weekday()) && !is_absent_day(intervals, cursor) {
            return Some(cursor);
        }
    }
}
