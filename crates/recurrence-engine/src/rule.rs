//! The recurrence rule value object.
//!
//! A [`RecurrenceRule`] is built once by the caller and handed to the engine
//! by reference; no generator mutates it. Legacy integer codes for the
//! recurrence type and ordinality convert through `TryFrom<i32>` and fail on
//! unknown values instead of falling through to an empty result.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ScheduleError};
use crate::weekday::WeekdayMask;

/// Which generator family a rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceType {
    #[default]
    NonRecurring,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl TryFrom<i32> for RecurrenceType {
    type Error = ScheduleError;

    fn try_from(code: i32) -> Result<Self> {
        match code {
            0 => Ok(RecurrenceType::NonRecurring),
            1 => Ok(RecurrenceType::Daily),
            2 => Ok(RecurrenceType::Weekly),
            3 => Ok(RecurrenceType::Monthly),
            4 => Ok(RecurrenceType::Yearly),
            other => Err(ScheduleError::InvalidRule(format!(
                "unknown recurrence type code {}",
                other
            ))),
        }
    }
}

impl From<RecurrenceType> for i32 {
    fn from(kind: RecurrenceType) -> Self {
        kind as i32
    }
}

/// "Which instance" selector for ordinal monthly/yearly rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ordinality {
    #[default]
    None,
    First,
    Second,
    Third,
    Fourth,
    Last,
}

impl Ordinality {
    /// The week count an ordinal scan is looking for: 1..=4 counting forward,
    /// -1 for the last one. `None` has no target.
    pub fn target(self) -> Option<i8> {
        match self {
            Ordinality::None => None,
            Ordinality::First => Some(1),
            Ordinality::Second => Some(2),
            Ordinality::Third => Some(3),
            Ordinality::Fourth => Some(4),
            Ordinality::Last => Some(-1),
        }
    }
}

impl TryFrom<i32> for Ordinality {
    type Error = ScheduleError;

    fn try_from(code: i32) -> Result<Self> {
        match code {
            0 => Ok(Ordinality::None),
            1 => Ok(Ordinality::First),
            2 => Ok(Ordinality::Second),
            3 => Ok(Ordinality::Third),
            4 => Ok(Ordinality::Fourth),
            5 => Ok(Ordinality::Last),
            other => Err(ScheduleError::InvalidRule(format!(
                "unknown ordinality code {}",
                other
            ))),
        }
    }
}

impl From<Ordinality> for i32 {
    fn from(ordinality: Ordinality) -> Self {
        ordinality as i32
    }
}

/// One recurrence pattern.
///
/// Optional fields are only consulted by the generator variants that need
/// them; see the per-type modules for which combination selects which mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    /// First possible occurrence.
    pub effective_date: NaiveDate,
    /// Bound after which nothing is produced. `None` means the caller's window
    /// end is used instead.
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default)]
    pub recurrence_type: RecurrenceType,
    #[serde(default)]
    pub weekday_mask: WeekdayMask,
    #[serde(default)]
    pub ordinality: Ordinality,
    /// 1-12, yearly rules only.
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub day_of_month: Option<u32>,
    /// Every N periods. Absent or zero behaves as 1, see [`RecurrenceRule::interval`].
    #[serde(default)]
    pub interval: Option<u32>,
    /// Cap on the number of generated occurrences, applied before the caller's
    /// window trim.
    #[serde(default)]
    pub occurrence_limit: Option<u32>,
    #[serde(default)]
    pub use_first_full_work_week: bool,
    #[serde(default)]
    pub description: String,
}

impl RecurrenceRule {
    pub fn new(effective_date: NaiveDate, recurrence_type: RecurrenceType) -> Self {
        RecurrenceRule {
            effective_date,
            expiration_date: None,
            recurrence_type,
            weekday_mask: WeekdayMask::NONE,
            ordinality: Ordinality::None,
            month: None,
            day_of_month: None,
            interval: None,
            occurrence_limit: None,
            use_first_full_work_week: false,
            description: String::new(),
        }
    }

    /// A one-off rule occurring only on `date`.
    pub fn non_recurring(date: NaiveDate) -> Self {
        RecurrenceRule::new(date, RecurrenceType::NonRecurring)
    }

    pub fn with_expiration(mut self, date: NaiveDate) -> Self {
        self.expiration_date = Some(date);
        self
    }

    pub fn with_weekdays(mut self, mask: WeekdayMask) -> Self {
        self.weekday_mask = mask;
        self
    }

    pub fn with_ordinality(mut self, ordinality: Ordinality) -> Self {
        self.ordinality = ordinality;
        self
    }

    pub fn with_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn with_day_of_month(mut self, day: u32) -> Self {
        self.day_of_month = Some(day);
        self
    }

    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn with_occurrence_limit(mut self, limit: u32) -> Self {
        self.occurrence_limit = Some(limit);
        self
    }

    pub fn with_first_full_work_week(mut self, enabled: bool) -> Self {
        self.use_first_full_work_week = enabled;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Effective "every N" multiplier: an absent or zero interval counts as 1.
    pub fn interval(&self) -> u32 {
        match self.interval {
            Some(n) if n > 0 => n,
            _ => 1,
        }
    }

    /// The expiration date if set, otherwise `fallback`.
    pub fn search_end(&self, fallback: NaiveDate) -> NaiveDate {
        self.expiration_date.unwrap_or(fallback)
    }

    /// Truncate generated occurrences to the rule's occurrence limit, if any.
    pub fn apply_limit(&self, mut dates: Vec<NaiveDate>) -> Vec<NaiveDate> {
        if let Some(limit) = self.occurrence_limit {
            let limit = limit as usize;
            if dates.len() > limit {
                debug!(
                    generated = dates.len(),
                    limit, "truncating to occurrence limit"
                );
                dates.truncate(limit);
            }
        }
        dates
    }

    /// Check the invariants a well-formed rule satisfies.
    ///
    /// The engine itself does not call this; it is for callers that build
    /// rules from untrusted input and want a precise error up front.
    pub fn validate(&self) -> Result<()> {
        if let Some(expiration) = self.expiration_date {
            if expiration < self.effective_date {
                return Err(ScheduleError::InvalidRule(format!(
                    "expiration date {} precedes effective date {}",
                    expiration, self.effective_date
                )));
            }
        }

        if self.interval == Some(0) {
            return Err(ScheduleError::InvalidRule(
                "interval must be at least 1".to_string(),
            ));
        }

        if let Some(month) = self.month {
            if !(1..=12).contains(&month) {
                return Err(ScheduleError::InvalidRule(format!(
                    "month {} is outside 1..=12",
                    month
                )));
            }
        }

        if let Some(day) = self.day_of_month {
            if !(1..=31).contains(&day) {
                return Err(ScheduleError::InvalidRule(format!(
                    "day of month {} is outside 1..=31",
                    day
                )));
            }
            // 2000 is a leap year, so this accepts Feb 29 and rejects Feb 30.
            if let Some(month) = self.month {
                if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
                    return Err(ScheduleError::InvalidRule(format!(
                        "month {} has no day {}",
                        month, day
                    )));
                }
            }
        }

        Ok(())
    }

    /// Whether `date` lies inside the rule's own effective/expiration bounds.
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.effective_date && self.expiration_date.is_none_or(|end| date <= end)
    }
}
