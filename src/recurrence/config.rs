use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::EngineError;

/// Canonical recurrence cadence. Pattern-specific day selectors live on the
/// variant so a config can never carry selectors that contradict its own
/// granularity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecurrencePattern {
    Daily,
    /// `week_days` holds weekday indices 0-6 with 0 = Sunday, sorted and
    /// deduplicated. Empty means any day on an aligned week.
    Weekly { week_days: Vec<u32> },
    /// `month_days` holds days of month 1-31, sorted and deduplicated.
    /// Empty means the anchor date's own day of month.
    Monthly { month_days: Vec<u32> },
    Yearly { month: u32, day: u32 },
}

impl RecurrencePattern {
    /// Unit name used by labels and log context.
    pub fn unit_name(&self) -> &'static str {
        match self {
            RecurrencePattern::Daily => "day",
            RecurrencePattern::Weekly { .. } => "week",
            RecurrencePattern::Monthly { .. } => "month",
            RecurrencePattern::Yearly { .. } => "year",
        }
    }
}

/// Canonical recurrence configuration. Produced by the normalizer from any
/// of the historical record shapes; the engine only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurrenceConfig {
    pub pattern: RecurrencePattern,
    /// Every N units of the pattern. Always >= 1.
    pub interval: u32,
    /// Anchor date, the zero point for cadence arithmetic. The anchor is
    /// also the first date eligible to fire.
    pub start_date: NaiveDate,
    /// Last date eligible to fire, inclusive. `None` means unbounded.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    /// Per-date manual override amounts. An entry replaces the computed
    /// base amount for that exact date.
    #[serde(default)]
    pub daily_adjustments: BTreeMap<NaiveDate, f64>,
    /// `(year, month)` scope for `daily_adjustments`. When set, overrides
    /// dated outside that month are ignored.
    #[serde(default)]
    pub adjustments_month: Option<(i32, u32)>,
}

impl RecurrenceConfig {
    pub fn monthly(start_date: NaiveDate) -> Self {
        Self {
            pattern: RecurrencePattern::Monthly {
                month_days: Vec::new(),
            },
            interval: 1,
            start_date,
            end_date: None,
            is_active: true,
            daily_adjustments: BTreeMap::new(),
            adjustments_month: None,
        }
    }

    /// True when `date` falls inside the config's own eligibility bounds.
    pub fn within_bounds(&self, date: NaiveDate) -> bool {
        if date < self.start_date {
            return false;
        }
        match self.end_date {
            Some(end) => date <= end,
            None => true,
        }
    }

    /// Override amount for `date`, honoring the `adjustments_month` scope.
    pub fn adjustment_for(&self, date: NaiveDate) -> Option<f64> {
        if let Some((year, month)) = self.adjustments_month {
            if date.year() != year || date.month() != month {
                return None;
            }
        }
        self.daily_adjustments.get(&date).copied()
    }
}

/// A recurring expense as the engine sees it: identity for log context,
/// the total amount per firing, and the canonical cadence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringExpense {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: Option<String>,
    pub amount: f64,
    pub config: RecurrenceConfig,
}

/// Inclusive calendar-day range used by range aggregation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, EngineError> {
        if end < start {
            return Err(EngineError::InvalidInput(
                "window end must not precede start".into(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Iterates every calendar day in the window, both ends included.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}
