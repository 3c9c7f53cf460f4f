use chrono::{Datelike, Duration, NaiveDate};

use super::config::{RecurrenceConfig, RecurrencePattern, RecurringExpense};

/// Forward-search horizon for `next_occurrence`. A pattern that does not
/// fire within two years of the reference date is reported as having no
/// next occurrence.
const NEXT_OCCURRENCE_LOOKAHEAD_DAYS: i64 = 365 * 2;

/// Decides whether a cadence fires on `date`. Pure predicate: every pattern
/// reduces to the same mechanism, the integer unit distance from the anchor
/// taken modulo the interval.
pub fn occurs_on(config: &RecurrenceConfig, date: NaiveDate) -> bool {
    if !config.within_bounds(date) {
        return false;
    }
    let start = config.start_date;
    let interval = i64::from(config.interval.max(1));

    match &config.pattern {
        RecurrencePattern::Daily => (date - start).num_days() % interval == 0,
        RecurrencePattern::Weekly { week_days } => {
            let aligned_week = (date - start).num_days() / 7 % interval == 0;
            if week_days.is_empty() {
                return aligned_week;
            }
            aligned_week && week_days.contains(&date.weekday().num_days_from_sunday())
        }
        RecurrencePattern::Monthly { month_days } => {
            // Short months are never reconciled: a selector of 31 simply
            // does not fire in February.
            let day_matches = if month_days.is_empty() {
                date.day() == start.day()
            } else {
                month_days.contains(&date.day())
            };
            day_matches && months_between(start, date) % interval == 0
        }
        RecurrencePattern::Yearly { month, day } => {
            date.month() == *month
                && date.day() == *day
                && i64::from(date.year() - start.year()) % interval == 0
        }
    }
}

/// Whole-month distance between two dates, ignoring the day component.
fn months_between(start: NaiveDate, date: NaiveDate) -> i64 {
    i64::from(date.year() - start.year()) * 12 + i64::from(date.month() as i32 - start.month() as i32)
}

/// First date on or after the day following `from` on which the expense
/// fires, bounded by the lookahead horizon. A reference date before the
/// anchor searches from the anchor itself; the anchor is validated against
/// the evaluator rather than assumed to fire.
pub fn next_occurrence(expense: &RecurringExpense, from: NaiveDate) -> Option<NaiveDate> {
    let config = &expense.config;
    if !config.is_active {
        return None;
    }
    if from < config.start_date {
        return scan_from(config, config.start_date);
    }
    if let Some(end) = config.end_date {
        if end < from {
            return None;
        }
    }
    scan_from(config, from + Duration::days(1))
}

fn scan_from(config: &RecurrenceConfig, first: NaiveDate) -> Option<NaiveDate> {
    let mut candidate = first;
    for _ in 0..NEXT_OCCURRENCE_LOOKAHEAD_DAYS {
        if occurs_on(config, candidate) {
            return Some(candidate);
        }
        candidate = candidate.succ_opt()?;
    }
    None
}
