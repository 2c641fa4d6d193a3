//! Yearly recurrence.
//!
//! - Without ordinality: a fixed `(month, day_of_month)` every `interval`
//!   years, starting with the first such date on or after the effective date.
//! - With ordinality, `month` and a weekday mask: the same week counting as
//!   monthly ordinal rules, confined to `month` and stepping by years.
//!
//! Other combinations produce no dates.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::calendar::{add_years, month_start};
use crate::error::{Result, ScheduleError};
use crate::ordinal::{scan_month, ScanBounds};
use crate::rule::RecurrenceRule;

/// Generate yearly occurrences for `rule`, using `default_end` when the rule
/// has no expiration date.
pub fn generate(rule: &RecurrenceRule, default_end: NaiveDate) -> Result<Vec<NaiveDate>> {
    let search_end = rule.search_end(default_end);

    let dates = match (rule.ordinality.target(), rule.month, rule.day_of_month) {
        (Some(target), Some(month), _) if !rule.weekday_mask.is_empty() => {
            debug!(
                ordinal = target,
                month,
                mask = %rule.weekday_mask,
                %search_end,
                "yearly: ordinal mode"
            );
            ordinal(rule, target, month, search_end)?
        }
        (None, Some(month), Some(day)) => {
            debug!(month, day, %search_end, "yearly: fixed day mode");
            fixed_day(rule, month, day, search_end)?
        }
        _ => {
            debug!("yearly: no mode selected");
            Vec::new()
        }
    };

    Ok(rule.apply_limit(dates))
}

/// `(month, day)` every `interval` years.
///
/// Feb 29 only exists in leap years; years where it is missing are skipped
/// rather than shifted. A pair that exists in no year is an error.
fn fixed_day(
    rule: &RecurrenceRule,
    month: u32,
    day: u32,
    search_end: NaiveDate,
) -> Result<Vec<NaiveDate>> {
    if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
        return Err(ScheduleError::CalendarArithmetic(format!(
            "month {} has no day {}",
            month, day
        )));
    }

    let interval = rule.interval();
    let effective = rule.effective_date;
    let mut year = if (month, day) >= (effective.month(), effective.day()) {
        effective.year()
    } else {
        add_years(effective.year(), 1)?
    };

    let mut dates = Vec::new();
    loop {
        if month_start(year, month)? >= search_end {
            break;
        }
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            if date >= search_end {
                break;
            }
            dates.push(date);
        }
        year = add_years(year, interval)?;
    }
    Ok(dates)
}

fn ordinal(
    rule: &RecurrenceRule,
    target: i8,
    month: u32,
    search_end: NaiveDate,
) -> Result<Vec<NaiveDate>> {
    let bounds = ScanBounds {
        not_before: rule.effective_date,
        search_end,
    };
    let interval = rule.interval();

    let mut dates = Vec::new();
    let mut year = rule.effective_date.year();
    loop {
        let first = month_start(year, month)?;
        let scan = scan_month(rule.weekday_mask, first, target, bounds)?;
        dates.extend(scan.dates);
        if scan.exhausted {
            break;
        }
        year = add_years(year, interval)?;
    }
    Ok(dates)
}
