use chrono::NaiveDate;

use super::config::{RecurrencePattern, RecurringExpense};

/// Average days per calendar month used when spreading amounts.
pub const DAYS_PER_MONTH: f64 = 30.44;
/// Average weeks per calendar month.
pub const WEEKS_PER_MONTH: f64 = 4.33;
/// Average days per calendar year, leap years included.
pub const DAYS_PER_YEAR: f64 = 365.25;
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Daily-equivalent contribution of the expense, spreading the per-firing
/// amount over the cadence with the fixed averaging constants. A daily
/// cadence is per firing, not spread.
pub fn base_daily_amount(expense: &RecurringExpense) -> f64 {
    let amount = finite_amount(expense);
    let interval = f64::from(expense.config.interval.max(1));
    match &expense.config.pattern {
        RecurrencePattern::Daily => amount / interval,
        RecurrencePattern::Weekly { .. } => amount * 7.0 / (interval * DAYS_PER_MONTH),
        RecurrencePattern::Monthly { .. } => amount / (interval * DAYS_PER_MONTH),
        RecurrencePattern::Yearly { .. } => amount / (interval * DAYS_PER_YEAR),
    }
}

/// Monthly-equivalent contribution of the expense.
pub fn monthly_amount(expense: &RecurringExpense) -> f64 {
    let amount = finite_amount(expense);
    let interval = f64::from(expense.config.interval.max(1));
    match &expense.config.pattern {
        RecurrencePattern::Daily => amount * DAYS_PER_MONTH / interval,
        RecurrencePattern::Weekly { .. } => amount * WEEKS_PER_MONTH / interval,
        RecurrencePattern::Monthly { .. } => amount / interval,
        RecurrencePattern::Yearly { .. } => amount / (interval * MONTHS_PER_YEAR),
    }
}

/// Contribution for one specific date. A manual override registered for the
/// date replaces the base amount verbatim, even when it is zero or exceeds
/// the base; otherwise the base daily amount applies.
pub fn daily_adjusted_amount(expense: &RecurringExpense, date: NaiveDate) -> f64 {
    expense
        .config
        .adjustment_for(date)
        .unwrap_or_else(|| base_daily_amount(expense))
}

fn finite_amount(expense: &RecurringExpense) -> f64 {
    if expense.amount.is_finite() {
        expense.amount
    } else {
        0.0
    }
}
