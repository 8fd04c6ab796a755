use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde_json::json;

use crate::error::{AppError, AppResult};

/// Day names as the collaborator contracts spell them, Sunday first.
pub const FRENCH_DAY_NAMES: [&str; 7] = [
    "Dimanche", "Lundi", "Mardi", "Mercredi", "Jeudi", "Vendredi", "Samedi",
];

pub fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|err| {
        AppError::validation_with_details(
            "Format de date invalide. Utilisez le format YYYY-MM-DD",
            json!({"value": value, "error": err.to_string()}),
        )
    })
}

pub fn parse_time(value: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|err| {
        AppError::validation_with_details(
            "Format d'heure invalide. Utilisez le format HH:MM",
            json!({"value": value, "error": err.to_string()}),
        )
    })
}

pub fn parse_date_time(date: &str, time: &str) -> AppResult<NaiveDateTime> {
    let date = parse_date(date)?;
    let time = parse_time(time)?;
    Ok(date.and_time(time))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn day_name(day: Weekday) -> &'static str {
    FRENCH_DAY_NAMES[day.num_days_from_sunday() as usize]
}

pub fn time_to_minutes(time: NaiveTime) -> i64 {
    (time.hour() as i64) * 60 + (time.minute() as i64)
}

/// Strict overlap: ranges that merely touch do not overlap.
pub fn ranges_overlap(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Week number within the year: `ceil((day_of_year + jan1_weekday + 1) / 7)`
/// with Sunday-based weekday indices. Week 1 holds January 1st.
pub fn week_number(date: NaiveDate) -> u32 {
    let jan1 = NaiveDate::from_ymd_opt(date.year(), 1, 1).expect("january 1st is always valid");
    let past_days = date.ordinal0() as i64;
    let offset = jan1.weekday().num_days_from_sunday() as i64;
    ((past_days + offset + 1 + 6) / 7) as u32
}

pub fn monday_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// First and last day of the given month.
pub fn month_bounds(year: i32, month: u32) -> AppResult<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::validation("Mois invalide"))?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last = next_month
        .and_then(|date| date.pred_opt())
        .ok_or_else(|| AppError::validation("Mois invalide"))?;
    Ok((first, last))
}
