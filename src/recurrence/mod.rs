//! Recurring-expense evaluation: normalization of persisted records,
//! occurrence decisions, amount spreading, range aggregation, and the
//! display/validation helpers around them.

pub mod amount;
pub mod config;
pub mod describe;
pub mod normalize;
pub mod occurrence;
pub mod range;
pub mod record;
pub mod validate;

pub use amount::{base_daily_amount, daily_adjusted_amount, monthly_amount};
pub use config::{DateWindow, RecurrenceConfig, RecurrencePattern, RecurringExpense};
pub use describe::describe;
pub use normalize::{detect_source, normalize, NormalizeWarning, NormalizedExpense, RecurrenceSource};
pub use occurrence::{next_occurrence, occurs_on};
pub use range::{month_total, range_amount};
pub use record::{ExpenseRecord, LegacyRecurringConfig, RecurrenceSpec, YearConfig};
pub use validate::{validate, ValidationIssue, ValidationReport};
