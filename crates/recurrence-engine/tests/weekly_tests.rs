//! Tests for the weekly generator.

use chrono::{NaiveDate, Weekday};
use recurrence_engine::{evaluate_single, DateRange, RecurrenceRule, RecurrenceType, WeekdayMask};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn mask(days: &[Weekday]) -> WeekdayMask {
    days.iter().copied().collect()
}

fn weekly(effective: NaiveDate) -> RecurrenceRule {
    RecurrenceRule::new(effective, RecurrenceType::Weekly)
}

// ---------------------------------------------------------------------------
// Plain mode
// ---------------------------------------------------------------------------

#[test]
fn plain_every_two_weeks() {
    let rule = weekly(date(2024, 1, 1))
        .with_expiration(date(2024, 2, 1))
        .with_interval(2);
    let result = evaluate_single(&rule, None).unwrap();
    assert_eq!(
        result,
        vec![date(2024, 1, 1), date(2024, 1, 15), date(2024, 1, 29)]
    );
}

// ---------------------------------------------------------------------------
// Weekday mode
// ---------------------------------------------------------------------------

#[test]
fn mon_wed_fri_from_midweek_start() {
    // Effective Wed 2024-01-03; the week of Sunday Dec 31 includes Mon Jan 1,
    // which the default window [effective, expiration] trims away.
    let rule = weekly(date(2024, 1, 3))
        .with_expiration(date(2024, 1, 20))
        .with_weekdays(mask(&[Weekday::Mon, Weekday::Wed, Weekday::Fri]));

    let result = evaluate_single(&rule, None).unwrap();

    assert_eq!(
        result,
        vec![
            date(2024, 1, 3),
            date(2024, 1, 5),
            date(2024, 1, 8),
            date(2024, 1, 10),
            date(2024, 1, 12),
            date(2024, 1, 15),
            date(2024, 1, 17),
            date(2024, 1, 19),
        ]
    );
}

#[test]
fn wider_window_does_not_leak_outside_rule_bounds() {
    // Effective Wed 03-06, expiring Wed 03-13: Mon 03-04 and Fri 03-15 fall in
    // scanned weeks but outside the rule.
    let rule = weekly(date(2024, 3, 6))
        .with_expiration(date(2024, 3, 13))
        .with_weekdays(mask(&[Weekday::Mon, Weekday::Fri]));
    let window = DateRange::new(date(2024, 3, 1), date(2024, 3, 31));

    let result = evaluate_single(&rule, Some(window)).unwrap();

    assert_eq!(result, vec![date(2024, 3, 8), date(2024, 3, 11)]);
}

#[test]
fn biweekly_tue_thu_skips_alternate_weeks() {
    let rule = weekly(date(2026, 1, 6))
        .with_expiration(date(2026, 2, 20))
        .with_interval(2)
        .with_weekdays(mask(&[Weekday::Tue, Weekday::Thu]));

    let result = evaluate_single(&rule, None).unwrap();

    assert_eq!(
        result,
        vec![
            date(2026, 1, 6),
            date(2026, 1, 8),
            date(2026, 1, 20),
            date(2026, 1, 22),
            date(2026, 2, 3),
            date(2026, 2, 5),
            date(2026, 2, 17),
            date(2026, 2, 19),
        ]
    );
}

#[test]
fn sunday_is_emitted_after_the_rest_of_its_week() {
    // Week anchor Sunday 2024-03-03: Monday the 4th comes out first.
    let rule = weekly(date(2024, 3, 3))
        .with_expiration(date(2024, 3, 17))
        .with_weekdays(mask(&[Weekday::Sun, Weekday::Mon]));

    let result = evaluate_single(&rule, None).unwrap();

    assert_eq!(
        result,
        vec![
            date(2024, 3, 4),
            date(2024, 3, 3),
            date(2024, 3, 11),
            date(2024, 3, 10),
        ]
    );
}

// ---------------------------------------------------------------------------
// Occurrence limit
// ---------------------------------------------------------------------------

#[test]
fn limit_counts_generated_not_windowed_occurrences() {
    // Unbounded weekly rule capped at 3: Jan 1, 8, 15.
    let rule = weekly(date(2024, 1, 1)).with_occurrence_limit(3);

    let full = evaluate_single(
        &rule,
        Some(DateRange::new(date(2024, 1, 1), date(2024, 12, 31))),
    )
    .unwrap();
    assert_eq!(full, vec![date(2024, 1, 1), date(2024, 1, 8), date(2024, 1, 15)]);

    // A window past the first three yields nothing rather than later weeks.
    let later = evaluate_single(
        &rule,
        Some(DateRange::new(date(2024, 2, 1), date(2024, 3, 1))),
    )
    .unwrap();
    assert!(later.is_empty());
}
