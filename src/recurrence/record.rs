use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::EngineError;

/// A persisted expense document as it arrives from storage. Three historical
/// shapes coexist in the data: a `recurrence` object close to the canonical
/// form, an older `recurring_config` object, and the oldest records that
/// carry the cadence fields flat on the document itself. All fields are
/// optional so any of the shapes deserializes without loss.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpenseRecord {
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub recurrence: Option<RecurrenceSpec>,
    #[serde(alias = "recurringConfig")]
    pub recurring_config: Option<LegacyRecurringConfig>,
    // Flat-shape fields, only consulted when neither object is present.
    pub frequency: Option<String>,
    pub interval: Option<i64>,
    #[serde(alias = "startDate")]
    pub start_date: Option<NaiveDate>,
    #[serde(alias = "endDate")]
    pub end_date: Option<NaiveDate>,
    #[serde(alias = "isActive")]
    pub is_active: Option<bool>,
    #[serde(alias = "dayOfWeek")]
    pub day_of_week: Option<i64>,
    #[serde(alias = "dayOfMonth")]
    pub day_of_month: Option<i64>,
}

impl ExpenseRecord {
    pub fn from_json(raw: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self, EngineError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Log-friendly identity: the record id when present, else the name,
    /// else a placeholder.
    pub fn display_ref(&self) -> String {
        if let Some(id) = self.id {
            return id.to_string();
        }
        self.name.clone().unwrap_or_else(|| "<unnamed>".into())
    }
}

/// Shape (a): the `recurrence` object, pattern/interval vocabulary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecurrenceSpec {
    pub pattern: Option<String>,
    pub interval: Option<i64>,
    #[serde(alias = "startDate")]
    pub start_date: Option<NaiveDate>,
    #[serde(alias = "endDate")]
    pub end_date: Option<NaiveDate>,
    #[serde(alias = "isActive")]
    pub is_active: Option<bool>,
    #[serde(alias = "weekDays")]
    pub week_days: Option<Vec<i64>>,
    #[serde(alias = "monthDays")]
    pub month_days: Option<Vec<i64>>,
    #[serde(alias = "yearConfig")]
    pub year_config: Option<YearConfig>,
    #[serde(alias = "dailyAdjustments")]
    pub daily_adjustments: Option<BTreeMap<String, f64>>,
    #[serde(alias = "adjustmentsMonth")]
    pub adjustments_month: Option<String>,
}

/// Shape (b): the legacy `recurring_config` object, frequency vocabulary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyRecurringConfig {
    pub frequency: Option<String>,
    pub interval: Option<i64>,
    #[serde(alias = "startDate")]
    pub start_date: Option<NaiveDate>,
    #[serde(alias = "endDate")]
    pub end_date: Option<NaiveDate>,
    #[serde(alias = "isActive")]
    pub is_active: Option<bool>,
    #[serde(alias = "dayOfWeek")]
    pub day_of_week: Option<i64>,
    #[serde(alias = "dayOfMonth")]
    pub day_of_month: Option<i64>,
    #[serde(alias = "specificDates")]
    pub specific_dates: Option<Vec<i64>>,
}

/// Month/day pair for yearly cadences.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct YearConfig {
    pub month: u32,
    pub day: u32,
}
