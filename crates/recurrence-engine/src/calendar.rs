//! Calendar arithmetic shared by the generators.
//!
//! Every helper returns a `Result` so that stepping past the representable
//! date range surfaces as [`ScheduleError::CalendarArithmetic`] instead of
//! a panic or a silently stuck cursor.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::error::{Result, ScheduleError};
use crate::weekday::WeekdayMask;

fn overflow(what: &str, date: NaiveDate, amount: impl std::fmt::Display) -> ScheduleError {
    ScheduleError::CalendarArithmetic(format!(
        "cannot {} {} from {}: outside the representable date range",
        what, amount, date
    ))
}

pub fn add_days(date: NaiveDate, days: u64) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| overflow("add days", date, days))
}

pub fn sub_days(date: NaiveDate, days: u64) -> Result<NaiveDate> {
    date.checked_sub_days(Days::new(days))
        .ok_or_else(|| overflow("subtract days", date, days))
}

/// Add calendar months, clamping the day to the length of the target month
/// (Jan 31 + 1 month = Feb 28/29).
pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| overflow("add months", date, months))
}

pub fn add_years(year: i32, years: u32) -> Result<i32> {
    i32::try_from(years)
        .ok()
        .and_then(|n| year.checked_add(n))
        .ok_or_else(|| {
            ScheduleError::CalendarArithmetic(format!(
                "cannot add {} years to year {}",
                years, year
            ))
        })
}

/// The Sunday on or before `date`.
pub fn start_of_week(date: NaiveDate) -> Result<NaiveDate> {
    sub_days(date, u64::from(date.weekday().num_days_from_sunday()))
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month, and `date` already proved the year/month valid.
    date.with_day(1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> Result<NaiveDate> {
    let next = add_months(first_of_month(date), 1)?;
    sub_days(next, 1)
}

/// First day of `month` in `year`.
pub fn month_start(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        ScheduleError::CalendarArithmetic(format!("no such month: {}-{:02}", year, month))
    })
}

/// `day` within the month starting at `first`. A day the month does not have
/// is an error rather than a clamp.
pub fn day_in_month(first: NaiveDate, day: u32) -> Result<NaiveDate> {
    first.with_day(day).ok_or_else(|| {
        ScheduleError::CalendarArithmetic(format!(
            "{} has no day {}",
            first.format("%Y-%m"),
            day
        ))
    })
}

/// The dates in the 7-day run starting at `start` whose weekday is flagged in
/// `mask`, in canonical Monday-first order.
///
/// `start` is normally a Sunday, which makes Sunday both the first day of the
/// run and the last date emitted.
pub fn week_matches(mask: WeekdayMask, start: NaiveDate) -> Result<Vec<NaiveDate>> {
    mask.iter()
        .map(|day| add_days(start, offset_to(start.weekday(), day)))
        .collect()
}

fn offset_to(from: Weekday, to: Weekday) -> u64 {
    let from = from.num_days_from_sunday();
    let to = to.num_days_from_sunday();
    u64::from((to + 7 - from) % 7)
}
