//! Tests for the daily generator, driven through `evaluate_single`.

use chrono::{Datelike, NaiveDate, Weekday};
use recurrence_engine::{evaluate_single, DateRange, RecurrenceRule, RecurrenceType, WeekdayMask};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn daily(effective: NaiveDate) -> RecurrenceRule {
    RecurrenceRule::new(effective, RecurrenceType::Daily)
}

// ---------------------------------------------------------------------------
// Plain mode
// ---------------------------------------------------------------------------

#[test]
fn every_other_day_stops_before_expiration() {
    let rule = daily(date(2024, 1, 1))
        .with_expiration(date(2024, 1, 10))
        .with_interval(2);

    let result = evaluate_single(&rule, None).expect("should evaluate");

    assert_eq!(
        result,
        vec![
            date(2024, 1, 1),
            date(2024, 1, 3),
            date(2024, 1, 5),
            date(2024, 1, 7),
            date(2024, 1, 9),
        ]
    );
}

#[test]
fn expiration_date_itself_is_excluded() {
    // Interval 1 would land on Jan 5, which is the (exclusive) search end.
    let rule = daily(date(2024, 1, 1)).with_expiration(date(2024, 1, 5));
    let result = evaluate_single(&rule, None).unwrap();
    assert_eq!(result.len(), 4);
    assert_eq!(result.last(), Some(&date(2024, 1, 4)));
}

#[test]
fn zero_interval_behaves_as_one() {
    let rule = daily(date(2024, 1, 1))
        .with_expiration(date(2024, 1, 4))
        .with_interval(0);
    let result = evaluate_single(&rule, None).unwrap();
    assert_eq!(result, vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)]);
}

#[test]
fn unbounded_rule_uses_window_end() {
    let rule = daily(date(2024, 1, 1)).with_interval(10);
    let window = DateRange::new(date(2024, 1, 1), date(2024, 2, 1));
    let result = evaluate_single(&rule, Some(window)).unwrap();
    assert_eq!(
        result,
        vec![
            date(2024, 1, 1),
            date(2024, 1, 11),
            date(2024, 1, 21),
            date(2024, 1, 31),
        ]
    );
}

// ---------------------------------------------------------------------------
// Weekday mode
// ---------------------------------------------------------------------------

#[test]
fn weekday_mode_excludes_weekend() {
    // Mon 2024-03-04 through Sun 2024-03-10.
    let rule = daily(date(2024, 3, 4))
        .with_expiration(date(2024, 3, 10))
        .with_weekdays(WeekdayMask::WEEKDAYS);

    let result = evaluate_single(&rule, None).unwrap();

    assert_eq!(
        result,
        vec![
            date(2024, 3, 4),
            date(2024, 3, 5),
            date(2024, 3, 6),
            date(2024, 3, 7),
            date(2024, 3, 8),
        ]
    );
}

#[test]
fn weekday_mode_ignores_interval() {
    let base = daily(date(2024, 3, 4))
        .with_expiration(date(2024, 3, 10))
        .with_weekdays(WeekdayMask::WEEKDAYS);

    let plain = evaluate_single(&base, None).unwrap();
    let with_interval = evaluate_single(&base.clone().with_interval(3), None).unwrap();

    assert_eq!(plain, with_interval);
}

#[test]
fn weekday_mode_yields_monday_to_friday_whatever_the_mask() {
    // Only Saturday flagged, yet the daily weekday mode emits business days.
    let rule = daily(date(2024, 3, 4))
        .with_expiration(date(2024, 3, 18))
        .with_weekdays(WeekdayMask::from_weekday(Weekday::Sat));

    let result = evaluate_single(&rule, None).unwrap();

    assert_eq!(result.len(), 10);
    assert!(result
        .iter()
        .all(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun)));
}

// ---------------------------------------------------------------------------
// Occurrence limit
// ---------------------------------------------------------------------------

#[test]
fn limit_truncates_generated_sequence() {
    let rule = daily(date(2024, 1, 1))
        .with_expiration(date(2024, 12, 31))
        .with_occurrence_limit(3);
    let result = evaluate_single(&rule, None).unwrap();
    assert_eq!(result, vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)]);
}

#[test]
fn limit_applies_before_window_trim() {
    let rule = daily(date(2024, 1, 1))
        .with_expiration(date(2024, 12, 31))
        .with_occurrence_limit(3);
    let window = DateRange::new(date(2024, 1, 2), date(2024, 6, 1));
    let result = evaluate_single(&rule, Some(window)).unwrap();
    assert_eq!(result, vec![date(2024, 1, 2), date(2024, 1, 3)]);
}
