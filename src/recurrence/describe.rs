use super::config::{RecurrenceConfig, RecurrencePattern};

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Renders a config as a natural-language phrase for display, for example
/// "every 2 weeks on Monday, Wednesday" or "monthly on day 15".
pub fn describe(config: &RecurrenceConfig) -> String {
    let interval = config.interval.max(1);
    let mut text = match &config.pattern {
        RecurrencePattern::Daily => cadence(interval, "daily", "days"),
        RecurrencePattern::Weekly { week_days } => {
            let mut base = cadence(interval, "weekly", "weeks");
            if !week_days.is_empty() {
                base.push_str(" on ");
                base.push_str(&weekday_list(week_days));
            }
            base
        }
        RecurrencePattern::Monthly { month_days } => {
            let mut base = cadence(interval, "monthly", "months");
            match month_days.as_slice() {
                [] => {}
                [day] => base.push_str(&format!(" on day {day}")),
                days => {
                    let list: Vec<String> = days.iter().map(u32::to_string).collect();
                    base.push_str(&format!(" on days {}", list.join(", ")));
                }
            }
            base
        }
        RecurrencePattern::Yearly { month, day } => {
            format!(
                "{} on {} {}",
                cadence(interval, "yearly", "years"),
                month_name(*month),
                day
            )
        }
    };

    if let Some(end) = config.end_date {
        text.push_str(&format!(" until {end}"));
    }
    if !config.is_active {
        text.push_str(" (inactive)");
    }
    text
}

fn cadence(interval: u32, simple: &str, plural_unit: &str) -> String {
    if interval == 1 {
        simple.to_string()
    } else {
        format!("every {interval} {plural_unit}")
    }
}

fn weekday_list(week_days: &[u32]) -> String {
    let names: Vec<&str> = week_days
        .iter()
        .map(|day| WEEKDAY_NAMES.get(*day as usize).copied().unwrap_or("?"))
        .collect();
    names.join(", ")
}

fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or("?")
}
