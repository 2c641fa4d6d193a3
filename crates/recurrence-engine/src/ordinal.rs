//! Ordinal week selection within a single month ("2nd Tuesday", "last Friday").
//!
//! Monthly and yearly rules share these scanners and differ only in how they
//! advance from one month to the next.

use chrono::NaiveDate;
use tracing::trace;

use crate::calendar::{add_days, last_of_month, start_of_week, sub_days, week_matches};
use crate::error::Result;
use crate::weekday::WeekdayMask;

/// Bounds applied to every match produced by a scan.
#[derive(Debug, Clone, Copy)]
pub struct ScanBounds {
    /// Matches before this date (the rule's effective date) are dropped.
    pub not_before: NaiveDate,
    /// Matches after this date are dropped, and weeks starting on or after it
    /// are not scanned.
    pub search_end: NaiveDate,
}

impl ScanBounds {
    fn keep(&self, date: NaiveDate) -> bool {
        date >= self.not_before && date <= self.search_end
    }
}

/// Outcome of scanning one month.
#[derive(Debug, Default)]
pub struct MonthScan {
    pub dates: Vec<NaiveDate>,
    /// Set once the scan hit a week starting at or after the search end; the
    /// caller must not scan later months.
    pub exhausted: bool,
}

/// Scan the Sunday-started weeks of the month beginning at `first`, counting
/// weeks that contain at least one flagged day inside the month, and return
/// the matches of week number `target` (1-based).
///
/// The count is taken before the bounds are applied, so a target week that
/// falls before the effective date yields nothing rather than shifting to a
/// later week.
pub fn nth_week(
    mask: WeekdayMask,
    first: NaiveDate,
    target: u8,
    bounds: ScanBounds,
) -> Result<MonthScan> {
    let month_end = last_of_month(first)?;
    let mut week = start_of_week(first)?;
    let mut counted = 0u8;
    let mut scan = MonthScan::default();

    while week <= month_end {
        if week >= bounds.search_end {
            scan.exhausted = true;
            break;
        }

        let in_month: Vec<NaiveDate> = week_matches(mask, week)?
            .into_iter()
            .filter(|d| *d >= first && *d <= month_end)
            .collect();

        if !in_month.is_empty() {
            counted += 1;
        }

        if counted == target {
            scan.dates = in_month.into_iter().filter(|d| bounds.keep(*d)).collect();
            trace!(
                %first,
                %week,
                ordinal = target,
                found = scan.dates.len(),
                "ordinal week selected"
            );
            break;
        }

        week = add_days(week, 7)?;
    }

    Ok(scan)
}

/// Return the flagged days among the final seven days of the month beginning
/// at `first`. Every weekday occurs exactly once in that run, so no counting
/// is needed to find "the last one".
pub fn last_week(mask: WeekdayMask, first: NaiveDate, bounds: ScanBounds) -> Result<MonthScan> {
    let month_end = last_of_month(first)?;
    let run_start = sub_days(month_end, 6)?;

    if run_start >= bounds.search_end {
        return Ok(MonthScan {
            dates: Vec::new(),
            exhausted: true,
        });
    }

    let dates: Vec<NaiveDate> = week_matches(mask, run_start)?
        .into_iter()
        .filter(|d| bounds.keep(*d))
        .collect();
    trace!(%first, %run_start, found = dates.len(), "last week scanned");

    Ok(MonthScan {
        dates,
        exhausted: false,
    })
}

/// Dispatch to [`nth_week`] or [`last_week`] for an ordinality target
/// (1..=4 forward, -1 for last). Other targets scan nothing.
pub fn scan_month(
    mask: WeekdayMask,
    first: NaiveDate,
    target: i8,
    bounds: ScanBounds,
) -> Result<MonthScan> {
    match target {
        -1 => last_week(mask, first, bounds),
        n if n > 0 => nth_week(mask, first, n.unsigned_abs(), bounds),
        _ => Ok(MonthScan {
            dates: Vec::new(),
            exhausted: true,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn open_bounds() -> ScanBounds {
        ScanBounds {
            not_before: date(2000, 1, 1),
            search_end: date(2100, 1, 1),
        }
    }

    #[test]
    fn second_tuesday_of_january_2024() {
        let scan = nth_week(
            WeekdayMask::from_weekday(Weekday::Tue),
            date(2024, 1, 1),
            2,
            open_bounds(),
        )
        .unwrap();
        assert_eq!(scan.dates, vec![date(2024, 1, 9)]);
        assert!(!scan.exhausted);
    }

    #[test]
    fn first_week_counts_only_days_inside_the_month() {
        // March 2024 starts on a Friday; the Sunday-started week of Feb 25
        // holds Mon-Thu from February, so only Friday the 1st counts for it.
        let scan = nth_week(WeekdayMask::WEEKDAYS, date(2024, 3, 1), 1, open_bounds()).unwrap();
        assert_eq!(scan.dates, vec![date(2024, 3, 1)]);
    }

    #[test]
    fn fifth_week_target_not_present_yields_nothing() {
        // February 2026 has exactly four Mondays.
        let scan = nth_week(
            WeekdayMask::from_weekday(Weekday::Mon),
            date(2026, 2, 1),
            5,
            open_bounds(),
        )
        .unwrap();
        assert!(scan.dates.is_empty());
    }

    #[test]
    fn last_friday_of_february_2024() {
        let scan = last_week(
            WeekdayMask::from_weekday(Weekday::Fri),
            date(2024, 2, 1),
            open_bounds(),
        )
        .unwrap();
        assert_eq!(scan.dates, vec![date(2024, 2, 23)]);
    }

    #[test]
    fn scan_reports_exhaustion_at_search_end() {
        let bounds = ScanBounds {
            not_before: date(2024, 1, 1),
            search_end: date(2024, 1, 5),
        };
        let scan = nth_week(
            WeekdayMask::from_weekday(Weekday::Tue),
            date(2024, 1, 1),
            2,
            bounds,
        )
        .unwrap();
        assert!(scan.dates.is_empty());
        assert!(scan.exhausted);
    }

    #[test]
    fn matches_before_effective_date_are_dropped_not_shifted() {
        let bounds = ScanBounds {
            not_before: date(2024, 1, 10),
            search_end: date(2024, 12, 31),
        };
        // 1st Tuesday of January 2024 is the 2nd, before the effective date.
        let scan = nth_week(
            WeekdayMask::from_weekday(Weekday::Tue),
            date(2024, 1, 1),
            1,
            bounds,
        )
        .unwrap();
        assert!(scan.dates.is_empty());
    }
}
