//! Weekly recurrence.
//!
//! With a weekday mask, every `interval`-th Sunday-started week beginning with
//! the one containing the effective date contributes its flagged days
//! (Monday-first, Sunday last) that fall inside the rule's own
//! effective/expiration bounds. Without a mask the rule simply repeats every
//! `7 * interval` days from the effective date.

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::calendar::{add_days, start_of_week, week_matches};
use crate::error::Result;
use crate::rule::RecurrenceRule;

/// Generate weekly occurrences for `rule`, using `default_end` when the rule
/// has no expiration date.
pub fn generate(rule: &RecurrenceRule, default_end: NaiveDate) -> Result<Vec<NaiveDate>> {
    let search_end = rule.search_end(default_end);
    let step = 7 * u64::from(rule.interval());

    let mut dates = Vec::new();
    if rule.weekday_mask.is_empty() {
        debug!(step, %search_end, "weekly: plain mode");
        let mut cursor = rule.effective_date;
        while cursor < search_end {
            dates.push(cursor);
            cursor = add_days(cursor, step)?;
        }
    } else {
        debug!(mask = %rule.weekday_mask, step, %search_end, "weekly: weekday mode");
        let mut week = start_of_week(rule.effective_date)?;
        while week < search_end {
            let matches = week_matches(rule.weekday_mask, week)?;
            trace!(%week, count = matches.len(), "weekly: week scanned");
            dates.extend(matches.into_iter().filter(|d| rule.covers(*d)));
            week = add_days(week, step)?;
        }
    }

    Ok(rule.apply_limit(dates))
}
