//! Monthly recurrence.
//!
//! Mode selection, first match wins:
//!
//! 1. `use_first_full_work_week` - the first week of each month whose Monday
//!    falls inside the month.
//! 2. `ordinality` set - the n-th (or last) week containing a flagged weekday.
//!    Needs a non-empty weekday mask.
//! 3. `day_of_month` set - a fixed day every `interval` months.
//!
//! Anything else produces no dates.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::calendar::{
    add_days, add_months, day_in_month, first_of_month, start_of_week, week_matches,
};
use crate::error::Result;
use crate::ordinal::{scan_month, ScanBounds};
use crate::rule::RecurrenceRule;

/// Generate monthly occurrences for `rule`, using `default_end` when the rule
/// has no expiration date.
pub fn generate(rule: &RecurrenceRule, default_end: NaiveDate) -> Result<Vec<NaiveDate>> {
    let search_end = rule.search_end(default_end);

    let dates = if rule.use_first_full_work_week {
        debug!(%search_end, "monthly: first full work week mode");
        first_full_work_week(rule, search_end)?
    } else if let Some(target) = rule.ordinality.target() {
        debug!(
            ordinal = target,
            mask = %rule.weekday_mask,
            %search_end,
            "monthly: ordinal mode"
        );
        ordinal(rule, target, search_end)?
    } else if let Some(day) = rule.day_of_month {
        debug!(day, %search_end, "monthly: fixed day mode");
        fixed_day(rule, day, search_end)?
    } else {
        debug!("monthly: no mode selected");
        Vec::new()
    };

    Ok(rule.apply_limit(dates))
}

/// `day` of every `interval`-th month, starting with the effective month when
/// that day has not yet passed, otherwise `interval` months later.
///
/// The first occurrence must exist as given, so day 31 anchored in April is
/// an error. Later occurrences step the previous one by `interval` months,
/// and month addition clamps: Jan 31 continues Feb 29, Mar 29, Apr 29.
fn fixed_day(rule: &RecurrenceRule, day: u32, search_end: NaiveDate) -> Result<Vec<NaiveDate>> {
    let interval = rule.interval();
    let effective = rule.effective_date;

    let mut month = first_of_month(effective);
    if effective.day() > day {
        month = add_months(month, interval)?;
    }

    let mut dates = Vec::new();
    let mut date = day_in_month(month, day)?;
    while date < search_end {
        dates.push(date);
        date = add_months(date, interval)?;
    }
    Ok(dates)
}

fn ordinal(rule: &RecurrenceRule, target: i8, search_end: NaiveDate) -> Result<Vec<NaiveDate>> {
    if rule.weekday_mask.is_empty() {
        return Ok(Vec::new());
    }

    let bounds = ScanBounds {
        not_before: rule.effective_date,
        search_end,
    };
    let interval = rule.interval();

    let mut dates = Vec::new();
    let mut month = first_of_month(rule.effective_date);
    loop {
        let scan = scan_month(rule.weekday_mask, month, target, bounds)?;
        dates.extend(scan.dates);
        if scan.exhausted {
            break;
        }
        month = add_months(month, interval)?;
    }
    Ok(dates)
}

/// The Sunday-started week containing the 1st is used when its Monday is in
/// the month; otherwise the following week. With no weekday mask the week's
/// Monday is emitted, else every flagged day of that week. Days outside the
/// rule's own effective/expiration bounds are dropped.
fn first_full_work_week(rule: &RecurrenceRule, search_end: NaiveDate) -> Result<Vec<NaiveDate>> {
    let interval = rule.interval();

    let mut dates = Vec::new();
    let mut month = first_of_month(rule.effective_date);
    while month <= search_end {
        let mut week = start_of_week(month)?;
        if add_days(week, 1)?.month() != month.month() {
            week = add_days(week, 7)?;
        }

        let matches = if rule.weekday_mask.is_empty() {
            vec![add_days(week, 1)?]
        } else {
            week_matches(rule.weekday_mask, week)?
        };
        dates.extend(matches.into_iter().filter(|d| rule.covers(*d)));

        month = add_months(month, interval)?;
    }
    Ok(dates)
}
