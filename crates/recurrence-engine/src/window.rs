//! Window validation and trimming.
//!
//! The scheduler rejects windows that cannot intersect a rule before running
//! any generator, and trims generator output to the caller's window after.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::rule::RecurrenceRule;

/// An inclusive `[start, end]` date range requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Whether a `[start, end]` request can possibly intersect `rule`.
///
/// False when the window is inverted, starts on or after the rule's
/// expiration date, or ends on or before its effective date.
pub fn is_window_valid(rule: &RecurrenceRule, start: NaiveDate, end: NaiveDate) -> bool {
    if start > end {
        return false;
    }
    if rule.expiration_date.is_some_and(|expiration| start >= expiration) {
        return false;
    }
    end > rule.effective_date
}

/// Keep only dates with `start <= d <= end`, preserving order.
pub fn trim_to_window(start: NaiveDate, end: NaiveDate, dates: Vec<NaiveDate>) -> Vec<NaiveDate> {
    let range = DateRange::new(start, end);
    dates.into_iter().filter(|d| range.contains(*d)).collect()
}
