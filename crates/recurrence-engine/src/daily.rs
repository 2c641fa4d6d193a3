//! Daily recurrence.
//!
//! Two modes:
//!
//! - **Weekday** (`weekday_mask` non-empty): every Monday-Friday date from the
//!   effective date up to the search end. The mask's contents and the interval
//!   are both ignored in this mode; existing rule data depends on it.
//! - **Plain**: the effective date, then every `interval` days.
//!
//! Both stop strictly before the search end (expiration date, or the caller's
//! end when the rule has none).

use chrono::{Datelike, NaiveDate, Weekday};
use tracing::debug;

use crate::calendar::add_days;
use crate::error::Result;
use crate::rule::RecurrenceRule;

/// Generate daily occurrences for `rule`, using `default_end` when the rule
/// has no expiration date.
pub fn generate(rule: &RecurrenceRule, default_end: NaiveDate) -> Result<Vec<NaiveDate>> {
    let search_end = rule.search_end(default_end);

    let dates = if rule.weekday_mask.is_empty() {
        debug!(interval = rule.interval(), %search_end, "daily: plain mode");
        every_n_days(rule.effective_date, search_end, rule.interval())?
    } else {
        debug!(%search_end, "daily: weekday mode");
        business_days(rule.effective_date, search_end)?
    };

    Ok(rule.apply_limit(dates))
}

fn every_n_days(start: NaiveDate, search_end: NaiveDate, interval: u32) -> Result<Vec<NaiveDate>> {
    let mut dates = Vec::new();
    let mut cursor = start;
    while cursor < search_end {
        dates.push(cursor);
        cursor = add_days(cursor, u64::from(interval))?;
    }
    Ok(dates)
}

fn business_days(start: NaiveDate, search_end: NaiveDate) -> Result<Vec<NaiveDate>> {
    let mut dates = Vec::new();
    let mut cursor = start;
    while cursor < search_end {
        if !matches!(cursor.weekday(), Weekday::Sat | Weekday::Sun) {
            dates.push(cursor);
        }
        cursor = add_days(cursor, 1)?;
    }
    Ok(dates)
}
