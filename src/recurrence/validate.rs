use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::normalize::{detect_source, frequency_is_known, parse_year_month, RecurrenceSource};
use super::record::{ExpenseRecord, LegacyRecurringConfig, RecurrenceSpec};

/// One problem found on a raw record. Rendered messages are form-level
/// feedback; they never block the calculation path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, thiserror::Error)]
pub enum ValidationIssue {
    #[error("unrecognized frequency `{token}`")]
    UnknownFrequency { token: String },
    #[error("interval must be at least 1, got {given}")]
    NonPositiveInterval { given: i64 },
    #[error("end date {end} precedes start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    #[error("week day {given} outside 0-6")]
    WeekDayOutOfRange { given: i64 },
    #[error("month day {given} outside 1-31")]
    MonthDayOutOfRange { given: i64 },
    #[error("year config month {month} outside 1-12")]
    YearMonthOutOfRange { month: u32 },
    #[error("year config day {day} outside 1-31")]
    YearDayOutOfRange { day: u32 },
    #[error("amount {given} is not a usable currency magnitude")]
    InvalidAmount { given: f64 },
    #[error("adjustments month `{raw}` is not YYYY-MM")]
    InvalidAdjustmentsMonth { raw: String },
    #[error("adjustment date `{raw}` is not YYYY-MM-DD")]
    InvalidAdjustmentDate { raw: String },
    #[error("adjustment for `{date}` is not finite")]
    NonFiniteAdjustment { date: String },
}

/// Outcome of validating a raw record. Advisory only: callers decide
/// whether to gate on it before invoking the calculators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationIssue>,
}

/// Checks a raw record in whichever historical shape it carries, reporting
/// every problem found. Never fails and never mutates.
pub fn validate(record: &ExpenseRecord) -> ValidationReport {
    let mut errors = Vec::new();

    if let Some(amount) = record.amount {
        if !amount.is_finite() || amount < 0.0 {
            errors.push(ValidationIssue::InvalidAmount { given: amount });
        }
    }

    match detect_source(record) {
        RecurrenceSource::Canonical(spec) => check_canonical(spec, &mut errors),
        RecurrenceSource::Legacy(legacy) => check_legacy(legacy, &mut errors),
        RecurrenceSource::Flat(flat) => check_flat(flat, &mut errors),
    }

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
    }
}

fn check_canonical(spec: &RecurrenceSpec, errors: &mut Vec<ValidationIssue>) {
    check_frequency(spec.pattern.as_deref(), errors);
    check_interval(spec.interval, errors);
    check_date_order(spec.start_date, spec.end_date, errors);
    for &day in spec.week_days.as_deref().unwrap_or_default() {
        if !(0..=6).contains(&day) {
            errors.push(ValidationIssue::WeekDayOutOfRange { given: day });
        }
    }
    for &day in spec.month_days.as_deref().unwrap_or_default() {
        if !(1..=31).contains(&day) {
            errors.push(ValidationIssue::MonthDayOutOfRange { given: day });
        }
    }
    if let Some(year_config) = spec.year_config {
        if !(1..=12).contains(&year_config.month) {
            errors.push(ValidationIssue::YearMonthOutOfRange {
                month: year_config.month,
            });
        }
        if !(1..=31).contains(&year_config.day) {
            errors.push(ValidationIssue::YearDayOutOfRange {
                day: year_config.day,
            });
        }
    }
    if let Some(raw) = spec.adjustments_month.as_deref() {
        if parse_year_month(raw).is_none() {
            errors.push(ValidationIssue::InvalidAdjustmentsMonth {
                raw: raw.to_string(),
            });
        }
    }
    for (key, &amount) in spec.daily_adjustments.iter().flatten() {
        if NaiveDate::parse_from_str(key, "%Y-%m-%d").is_err() {
            errors.push(ValidationIssue::InvalidAdjustmentDate { raw: key.clone() });
        } else if !amount.is_finite() {
            errors.push(ValidationIssue::NonFiniteAdjustment { date: key.clone() });
        }
    }
}

fn check_legacy(legacy: &LegacyRecurringConfig, errors: &mut Vec<ValidationIssue>) {
    check_frequency(legacy.frequency.as_deref(), errors);
    check_interval(legacy.interval, errors);
    check_date_order(legacy.start_date, legacy.end_date, errors);
    check_single_week_day(legacy.day_of_week, errors);
    check_single_month_day(legacy.day_of_month, errors);
    for &day in legacy.specific_dates.as_deref().unwrap_or_default() {
        if !(1..=31).contains(&day) {
            errors.push(ValidationIssue::MonthDayOutOfRange { given: day });
        }
    }
}

fn check_flat(record: &ExpenseRecord, errors: &mut Vec<ValidationIssue>) {
    check_frequency(record.frequency.as_deref(), errors);
    check_interval(record.interval, errors);
    check_date_order(record.start_date, record.end_date, errors);
    check_single_week_day(record.day_of_week, errors);
    check_single_month_day(record.day_of_month, errors);
}

fn check_frequency(token: Option<&str>, errors: &mut Vec<ValidationIssue>) {
    if let Some(token) = token {
        if frequency_is_known(token) {
            return;
        }
        errors.push(ValidationIssue::UnknownFrequency {
            token: token.to_string(),
        });
    }
}

fn check_interval(interval: Option<i64>, errors: &mut Vec<ValidationIssue>) {
    if let Some(given) = interval {
        if given < 1 {
            errors.push(ValidationIssue::NonPositiveInterval { given });
        }
    }
}

fn check_date_order(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    errors: &mut Vec<ValidationIssue>,
) {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            errors.push(ValidationIssue::EndBeforeStart { start, end });
        }
    }
}

fn check_single_week_day(day: Option<i64>, errors: &mut Vec<ValidationIssue>) {
    if let Some(given) = day {
        if !(0..=6).contains(&given) {
            errors.push(ValidationIssue::WeekDayOutOfRange { given });
        }
    }
}

fn check_single_month_day(day: Option<i64>, errors: &mut Vec<ValidationIssue>) {
    if let Some(given) = day {
        if !(1..=31).contains(&given) {
            errors.push(ValidationIssue::MonthDayOutOfRange { given });
        }
    }
}
