use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::config::{RecurrenceConfig, RecurrencePattern, RecurringExpense};
use super::record::{ExpenseRecord, LegacyRecurringConfig, RecurrenceSpec};

/// Degraded-input signal raised while normalizing a record. Carried on the
/// result so callers decide whether to surface, log, or ignore it; each one
/// is also emitted as a `tracing::warn!` event at the point of degradation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, thiserror::Error)]
pub enum NormalizeWarning {
    #[error("unrecognized frequency `{token}`, falling back to monthly")]
    UnknownFrequency { token: String },
    #[error("missing or non-finite amount, using 0")]
    MissingAmount,
    #[error("missing start date, anchoring on the supplied current date")]
    MissingStartDate,
    #[error("invalid interval {given}, clamping to 1")]
    InvalidInterval { given: i64 },
    #[error("unparseable adjustments month `{raw}`, dropping the scope")]
    InvalidAdjustmentsMonth { raw: String },
    #[error("unparseable adjustment date `{raw}`, dropping the override")]
    InvalidAdjustmentDate { raw: String },
    #[error("week day {given} out of range 0-6, dropping it")]
    DroppedWeekDay { given: i64 },
    #[error("month day {given} out of range 1-31, dropping it")]
    DroppedMonthDay { given: i64 },
}

/// Result of normalizing a raw record: the canonical expense plus every
/// degradation applied on the way there.
#[derive(Debug, Clone)]
pub struct NormalizedExpense {
    pub expense: RecurringExpense,
    pub warnings: Vec<NormalizeWarning>,
}

impl NormalizedExpense {
    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Which historical shape a record's cadence was read from. Detection is an
/// ordered precedence: canonical object, then legacy object, then flat
/// fields on the record itself.
#[derive(Debug, Clone, Copy)]
pub enum RecurrenceSource<'a> {
    Canonical(&'a RecurrenceSpec),
    Legacy(&'a LegacyRecurringConfig),
    Flat(&'a ExpenseRecord),
}

pub fn detect_source(record: &ExpenseRecord) -> RecurrenceSource<'_> {
    if let Some(spec) = record.recurrence.as_ref() {
        return RecurrenceSource::Canonical(spec);
    }
    if let Some(legacy) = record.recurring_config.as_ref() {
        return RecurrenceSource::Legacy(legacy);
    }
    RecurrenceSource::Flat(record)
}

/// Converts a persisted record in any historical shape into the canonical
/// expense. Total: malformed input degrades with warnings, never fails.
/// `today` anchors records that carry no start date at all; the caller owns
/// the clock.
pub fn normalize(record: &ExpenseRecord, today: NaiveDate) -> NormalizedExpense {
    let mut warnings = Vec::new();

    let amount = match record.amount {
        Some(value) if value.is_finite() => value,
        _ => {
            push_warning(record, &mut warnings, NormalizeWarning::MissingAmount);
            0.0
        }
    };

    let source = detect_source(record);
    let parts = match source {
        RecurrenceSource::Canonical(spec) => canonical_parts(record, spec, &mut warnings),
        RecurrenceSource::Legacy(legacy) => legacy_parts(legacy),
        RecurrenceSource::Flat(flat) => flat_parts(flat),
    };

    let interval = normalize_interval(record, parts.interval, &mut warnings);
    let start_date = match parts.start_date {
        Some(date) => date,
        None => {
            push_warning(record, &mut warnings, NormalizeWarning::MissingStartDate);
            today
        }
    };
    let pattern = build_pattern(record, &parts, start_date, &mut warnings);

    let config = RecurrenceConfig {
        pattern,
        interval,
        start_date,
        end_date: parts.end_date,
        is_active: parts.is_active.unwrap_or(true),
        daily_adjustments: parts.daily_adjustments,
        adjustments_month: parts.adjustments_month,
    };

    NormalizedExpense {
        expense: RecurringExpense {
            id: record.id,
            name: record.name.clone(),
            amount,
            config,
        },
        warnings,
    }
}

/// Shape-independent intermediate: everything extracted from whichever
/// source shape won detection, still in raw form.
struct RawParts {
    frequency: Option<String>,
    interval: Option<i64>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    is_active: Option<bool>,
    week_days: Option<Vec<i64>>,
    month_days: Option<Vec<i64>>,
    year_config: Option<(u32, u32)>,
    daily_adjustments: BTreeMap<NaiveDate, f64>,
    adjustments_month: Option<(i32, u32)>,
}

fn canonical_parts(
    record: &ExpenseRecord,
    spec: &RecurrenceSpec,
    warnings: &mut Vec<NormalizeWarning>,
) -> RawParts {
    let daily_adjustments = spec
        .daily_adjustments
        .as_ref()
        .map(|raw| parse_adjustments(record, raw, warnings))
        .unwrap_or_default();
    let adjustments_month = spec
        .adjustments_month
        .as_deref()
        .and_then(|raw| parse_adjustments_month(record, raw, warnings));
    RawParts {
        frequency: spec.pattern.clone(),
        interval: spec.interval,
        start_date: spec.start_date,
        end_date: spec.end_date,
        is_active: spec.is_active,
        week_days: spec.week_days.clone(),
        month_days: spec.month_days.clone(),
        year_config: spec.year_config.map(|yc| (yc.month, yc.day)),
        daily_adjustments,
        adjustments_month,
    }
}

fn legacy_parts(legacy: &LegacyRecurringConfig) -> RawParts {
    // Legacy records never carried adjustments; the month selector can be a
    // `specific_dates` list or a single `day_of_month`.
    let month_days = legacy
        .specific_dates
        .clone()
        .or_else(|| legacy.day_of_month.map(|day| vec![day]));
    RawParts {
        frequency: legacy.frequency.clone(),
        interval: legacy.interval,
        start_date: legacy.start_date,
        end_date: legacy.end_date,
        is_active: legacy.is_active,
        week_days: legacy.day_of_week.map(|day| vec![day]),
        month_days,
        year_config: None,
        daily_adjustments: BTreeMap::new(),
        adjustments_month: None,
    }
}

fn flat_parts(record: &ExpenseRecord) -> RawParts {
    RawParts {
        frequency: record.frequency.clone(),
        interval: record.interval,
        start_date: record.start_date,
        end_date: record.end_date,
        is_active: record.is_active,
        week_days: record.day_of_week.map(|day| vec![day]),
        month_days: record.day_of_month.map(|day| vec![day]),
        year_config: None,
        daily_adjustments: BTreeMap::new(),
        adjustments_month: None,
    }
}

/// Fixed token table mapping every frequency spelling the data has ever
/// used onto the four canonical patterns.
fn lookup_frequency(token: &str) -> Option<&'static str> {
    match token.trim().to_ascii_lowercase().as_str() {
        "daily" | "diario" => Some("daily"),
        "weekly" | "semanal" => Some("weekly"),
        "monthly" | "mensual" => Some("monthly"),
        "yearly" | "annual" | "anual" => Some("yearly"),
        _ => None,
    }
}

pub(crate) fn frequency_is_known(token: &str) -> bool {
    lookup_frequency(token).is_some()
}

/// Parses a `YYYY-MM` month designation.
pub(crate) fn parse_year_month(raw: &str) -> Option<(i32, u32)> {
    let (year, month) = raw.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}

fn build_pattern(
    record: &ExpenseRecord,
    parts: &RawParts,
    start_date: NaiveDate,
    warnings: &mut Vec<NormalizeWarning>,
) -> RecurrencePattern {
    let canonical = match parts.frequency.as_deref() {
        Some(token) => match lookup_frequency(token) {
            Some(canonical) => canonical,
            None => {
                push_warning(
                    record,
                    warnings,
                    NormalizeWarning::UnknownFrequency {
                        token: token.to_string(),
                    },
                );
                "monthly"
            }
        },
        // An absent pattern is the most common legacy degradation; treat it
        // as monthly without flagging the record.
        None => "monthly",
    };

    match canonical {
        "daily" => RecurrencePattern::Daily,
        "weekly" => RecurrencePattern::Weekly {
            week_days: sanitize_days(record, parts.week_days.as_deref(), 0..=6, warnings, |given| {
                NormalizeWarning::DroppedWeekDay { given }
            }),
        },
        "yearly" => {
            let (month, day) = parts
                .year_config
                .unwrap_or((start_date.month(), start_date.day()));
            RecurrencePattern::Yearly { month, day }
        }
        _ => RecurrencePattern::Monthly {
            month_days: sanitize_days(
                record,
                parts.month_days.as_deref(),
                1..=31,
                warnings,
                |given| NormalizeWarning::DroppedMonthDay { given },
            ),
        },
    }
}

fn normalize_interval(
    record: &ExpenseRecord,
    raw: Option<i64>,
    warnings: &mut Vec<NormalizeWarning>,
) -> u32 {
    match raw {
        None => 1,
        Some(value) if value >= 1 => value.min(u32::MAX as i64) as u32,
        Some(value) => {
            push_warning(
                record,
                warnings,
                NormalizeWarning::InvalidInterval { given: value },
            );
            1
        }
    }
}

fn sanitize_days(
    record: &ExpenseRecord,
    raw: Option<&[i64]>,
    range: std::ops::RangeInclusive<i64>,
    warnings: &mut Vec<NormalizeWarning>,
    dropped: impl Fn(i64) -> NormalizeWarning,
) -> Vec<u32> {
    let mut days: Vec<u32> = Vec::new();
    for &value in raw.unwrap_or_default() {
        if range.contains(&value) {
            days.push(value as u32);
        } else {
            push_warning(record, warnings, dropped(value));
        }
    }
    days.sort_unstable();
    days.dedup();
    days
}

fn parse_adjustments(
    record: &ExpenseRecord,
    raw: &BTreeMap<String, f64>,
    warnings: &mut Vec<NormalizeWarning>,
) -> BTreeMap<NaiveDate, f64> {
    let mut adjustments = BTreeMap::new();
    for (key, &amount) in raw {
        match NaiveDate::parse_from_str(key, "%Y-%m-%d") {
            Ok(date) if amount.is_finite() => {
                adjustments.insert(date, amount);
            }
            _ => {
                push_warning(
                    record,
                    warnings,
                    NormalizeWarning::InvalidAdjustmentDate { raw: key.clone() },
                );
            }
        }
    }
    adjustments
}

fn parse_adjustments_month(
    record: &ExpenseRecord,
    raw: &str,
    warnings: &mut Vec<NormalizeWarning>,
) -> Option<(i32, u32)> {
    let parsed = parse_year_month(raw);
    if parsed.is_none() {
        push_warning(
            record,
            warnings,
            NormalizeWarning::InvalidAdjustmentsMonth {
                raw: raw.to_string(),
            },
        );
    }
    parsed
}

fn push_warning(
    record: &ExpenseRecord,
    warnings: &mut Vec<NormalizeWarning>,
    warning: NormalizeWarning,
) {
    warn!("expense {}: {}", record.display_ref(), warning);
    warnings.push(warning);
}
