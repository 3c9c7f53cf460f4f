use chrono::{Datelike, Duration, NaiveDate};

use super::amount::daily_adjusted_amount;
use super::config::{DateWindow, RecurringExpense};
use super::occurrence::occurs_on;

/// Total contribution of the expense over the window, walking every day and
/// summing the adjusted amount on each firing date. Returns 0 without
/// iterating when the expense is inactive or its eligibility bounds do not
/// intersect the window.
pub fn range_amount(expense: &RecurringExpense, window: DateWindow) -> f64 {
    let config = &expense.config;
    if !config.is_active {
        return 0.0;
    }
    if config.start_date > window.end {
        return 0.0;
    }
    if let Some(end) = config.end_date {
        if end < window.start {
            return 0.0;
        }
    }

    window
        .days()
        .filter(|day| occurs_on(config, *day))
        .map(|day| daily_adjusted_amount(expense, day))
        .sum()
}

/// Contribution of the expense over one calendar month. Returns 0 for a
/// month designation that does not exist on the calendar.
pub fn month_total(expense: &RecurringExpense, year: i32, month: u32) -> f64 {
    let Some(start) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0.0;
    };
    let end = last_day_of_month(start);
    range_amount(expense, DateWindow { start, end })
}

fn last_day_of_month(first: NaiveDate) -> NaiveDate {
    let (next_year, next_month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1).unwrap() - Duration::days(1)
}
