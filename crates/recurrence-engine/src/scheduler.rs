//! Rule evaluation entry points.
//!
//! [`evaluate_single`] validates the window, dispatches to the generator for
//! the rule's recurrence type, and trims the result to the window.
//! [`evaluate_batch`] concatenates per-rule results in rule order; overlapping
//! rules produce duplicate dates on purpose.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{Result, ScheduleError};
use crate::rule::{RecurrenceRule, RecurrenceType};
use crate::window::{is_window_valid, trim_to_window, DateRange};
use crate::{daily, monthly, weekly, yearly};

/// Evaluate one rule.
///
/// With `window` omitted, the rule's own `[effective_date, expiration_date]`
/// is used, which requires an expiration date.
///
/// # Errors
/// Returns `ScheduleError::Precondition` when `window` is `None` and the rule
/// has no expiration date, and `ScheduleError::CalendarArithmetic` when the
/// rule asks for a date that cannot be constructed.
pub fn evaluate_single(
    rule: &RecurrenceRule,
    window: Option<DateRange>,
) -> Result<Vec<NaiveDate>> {
    let window = match window {
        Some(window) => window,
        None => default_window(rule)?,
    };

    if !is_window_valid(rule, window.start, window.end) {
        debug!(
            start = %window.start,
            end = %window.end,
            effective = %rule.effective_date,
            "window cannot intersect rule"
        );
        return Ok(Vec::new());
    }

    let generated = match rule.recurrence_type {
        RecurrenceType::NonRecurring => vec![rule.effective_date],
        RecurrenceType::Daily => daily::generate(rule, window.end)?,
        RecurrenceType::Weekly => weekly::generate(rule, window.end)?,
        RecurrenceType::Monthly => monthly::generate(rule, window.end)?,
        RecurrenceType::Yearly => yearly::generate(rule, window.end)?,
    };

    Ok(trim_to_window(window.start, window.end, generated))
}

/// Evaluate every rule against the same window and concatenate the results.
///
/// Output is in rule order, then generator order within each rule. Nothing is
/// sorted or deduplicated. The first failing rule aborts the batch.
pub fn evaluate_batch(rules: &[RecurrenceRule], window: DateRange) -> Result<Vec<NaiveDate>> {
    let mut results = Vec::new();
    for rule in rules {
        results.extend(evaluate_single(rule, Some(window))?);
    }
    Ok(results)
}

fn default_window(rule: &RecurrenceRule) -> Result<DateRange> {
    let end = rule.expiration_date.ok_or_else(|| {
        ScheduleError::Precondition(
            "rule has no expiration date; supply an explicit window".to_string(),
        )
    })?;
    Ok(DateRange::new(rule.effective_date, end))
}
