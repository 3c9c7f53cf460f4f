use std::collections::BTreeMap;

use chrono::NaiveDate;
use expense_core::recurrence::{
    describe, validate, ExpenseRecord, RecurrenceConfig, RecurrencePattern, ValidationIssue,
};
use serde_json::json;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn config(pattern: RecurrencePattern, interval: u32) -> RecurrenceConfig {
    RecurrenceConfig {
        pattern,
        interval,
        start_date: date(2024, 1, 1),
        end_date: None,
        is_active: true,
        daily_adjustments: BTreeMap::new(),
        adjustments_month: None,
    }
}

#[test]
fn describe_renders_each_pattern() {
    assert_eq!(describe(&config(RecurrencePattern::Daily, 1)), "daily");
    assert_eq!(describe(&config(RecurrencePattern::Daily, 3)), "every 3 days");
    assert_eq!(
        describe(&config(
            RecurrencePattern::Weekly {
                week_days: vec![1, 3]
            },
            2
        )),
        "every 2 weeks on Monday, Wednesday"
    );
    assert_eq!(
        describe(&config(
            RecurrencePattern::Weekly {
                week_days: Vec::new()
            },
            1
        )),
        "weekly"
    );
    assert_eq!(describe(&RecurrenceConfig::monthly(date(2024, 1, 1))), "monthly");
    assert_eq!(
        describe(&config(
            RecurrencePattern::Monthly {
                month_days: vec![15]
            },
            1
        )),
        "monthly on day 15"
    );
    assert_eq!(
        describe(&config(
            RecurrencePattern::Monthly {
                month_days: vec![1, 15]
            },
            2
        )),
        "every 2 months on days 1, 15"
    );
    assert_eq!(
        describe(&config(RecurrencePattern::Yearly { month: 3, day: 10 }, 1)),
        "yearly on March 10"
    );
    assert_eq!(
        describe(&config(RecurrencePattern::Yearly { month: 3, day: 10 }, 5)),
        "every 5 years on March 10"
    );
}

#[test]
fn describe_appends_bounds_and_activity() {
    let mut bounded = config(
        RecurrencePattern::Monthly {
            month_days: Vec::new(),
        },
        1,
    );
    bounded.end_date = Some(date(2024, 12, 31));
    assert_eq!(describe(&bounded), "monthly until 2024-12-31");

    let mut inactive = config(RecurrencePattern::Daily, 1);
    inactive.is_active = false;
    assert_eq!(describe(&inactive), "daily (inactive)");
}

#[test]
fn clean_record_validates() {
    let record = ExpenseRecord::from_json_value(json!({
        "amount": 1500.0,
        "recurrence": {
            "pattern": "weekly",
            "interval": 2,
            "weekDays": [1, 3, 5],
            "startDate": "2024-01-01",
            "endDate": "2024-12-31"
        }
    }))
    .unwrap();

    let report = validate(&record);
    assert!(report.is_valid, "unexpected issues: {:?}", report.errors);
    assert!(report.errors.is_empty());
}

#[test]
fn unknown_frequency_is_reported() {
    let record = ExpenseRecord::from_json_value(json!({
        "amount": 100.0,
        "frequency": "quincenal"
    }))
    .unwrap();

    let report = validate(&record);
    assert!(!report.is_valid);
    assert!(report.errors.contains(&ValidationIssue::UnknownFrequency {
        token: "quincenal".into()
    }));
}

#[test]
fn interval_and_date_order_are_checked() {
    let record = ExpenseRecord::from_json_value(json!({
        "amount": 100.0,
        "recurrence": {
            "pattern": "monthly",
            "interval": 0,
            "startDate": "2024-06-01",
            "endDate": "2024-01-01"
        }
    }))
    .unwrap();

    let report = validate(&record);
    assert!(report
        .errors
        .contains(&ValidationIssue::NonPositiveInterval { given: 0 }));
    assert!(report.errors.contains(&ValidationIssue::EndBeforeStart {
        start: date(2024, 6, 1),
        end: date(2024, 1, 1)
    }));
}

#[test]
fn day_selectors_are_range_checked_per_shape() {
    let legacy = ExpenseRecord::from_json_value(json!({
        "amount": 100.0,
        "recurringConfig": {
            "frequency": "semanal",
            "dayOfWeek": 7,
            "specificDates": [0, 32]
        }
    }))
    .unwrap();
    let report = validate(&legacy);
    assert!(report
        .errors
        .contains(&ValidationIssue::WeekDayOutOfRange { given: 7 }));
    assert!(report
        .errors
        .contains(&ValidationIssue::MonthDayOutOfRange { given: 0 }));
    assert!(report
        .errors
        .contains(&ValidationIssue::MonthDayOutOfRange { given: 32 }));

    let flat = ExpenseRecord::from_json_value(json!({
        "amount": 100.0,
        "frequency": "monthly",
        "dayOfMonth": 45
    }))
    .unwrap();
    assert!(validate(&flat)
        .errors
        .contains(&ValidationIssue::MonthDayOutOfRange { given: 45 }));
}

#[test]
fn year_config_bounds_are_checked() {
    let record = ExpenseRecord::from_json_value(json!({
        "amount": 100.0,
        "recurrence": {
            "pattern": "yearly",
            "yearConfig": { "month": 13, "day": 40 },
            "startDate": "2024-01-01"
        }
    }))
    .unwrap();

    let report = validate(&record);
    assert!(report
        .errors
        .contains(&ValidationIssue::YearMonthOutOfRange { month: 13 }));
    assert!(report
        .errors
        .contains(&ValidationIssue::YearDayOutOfRange { day: 40 }));
}

#[test]
fn negative_amount_is_reported() {
    let record = ExpenseRecord::from_json_value(json!({
        "amount": -5.0,
        "frequency": "monthly"
    }))
    .unwrap();

    assert!(validate(&record)
        .errors
        .contains(&ValidationIssue::InvalidAmount { given: -5.0 }));
}

#[test]
fn adjustment_entries_are_checked() {
    let mut record = ExpenseRecord::from_json_value(json!({
        "amount": 100.0,
        "recurrence": {
            "pattern": "monthly",
            "startDate": "2024-01-01",
            "dailyAdjustments": { "2024-03-10": 5.0, "bogus": 1.0 },
            "adjustmentsMonth": "March 2024"
        }
    }))
    .unwrap();

    let report = validate(&record);
    assert!(report
        .errors
        .contains(&ValidationIssue::InvalidAdjustmentDate { raw: "bogus".into() }));
    assert!(report
        .errors
        .contains(&ValidationIssue::InvalidAdjustmentsMonth {
            raw: "March 2024".into()
        }));

    // Non-finite overrides cannot arrive through JSON; patch the record.
    if let Some(spec) = record.recurrence.as_mut() {
        if let Some(adjustments) = spec.daily_adjustments.as_mut() {
            adjustments.insert("2024-03-11".into(), f64::NAN);
        }
    }
    assert!(validate(&record)
        .errors
        .contains(&ValidationIssue::NonFiniteAdjustment {
            date: "2024-03-11".into()
        }));
}

#[test]
fn validation_never_blocks_the_calculator() {
    let record = ExpenseRecord::from_json_value(json!({
        "amount": 100.0,
        "frequency": "quincenal",
        "interval": -2
    }))
    .unwrap();

    let report = validate(&record);
    assert!(!report.is_valid);

    // The calculation path still produces usable numbers from the same record.
    let normalized = expense_core::recurrence::normalize(&record, date(2024, 6, 1));
    assert!(expense_core::recurrence::base_daily_amount(&normalized.expense) > 0.0);
}
