//! Immutable weekday bit set.
//!
//! Bits follow the canonical Monday-first order: Monday is bit 0, Sunday is
//! bit 6. An empty mask means "no weekday filter" to the generators.

use std::fmt;
use std::ops::BitOr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// The seven weekdays in the order masks are iterated and matches are emitted.
pub const CANONICAL_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const VALID_BITS: u8 = 0b0111_1111;

/// A set of weekdays, stored as a 7-bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Weekday>", into = "Vec<Weekday>")]
pub struct WeekdayMask(u8);

impl WeekdayMask {
    pub const NONE: WeekdayMask = WeekdayMask(0);
    /// Monday through Friday.
    pub const WEEKDAYS: WeekdayMask = WeekdayMask(0b0001_1111);
    pub const WEEKEND: WeekdayMask = WeekdayMask(0b0110_0000);
    pub const ALL: WeekdayMask = WeekdayMask(VALID_BITS);

    /// Build a mask from raw bits, rejecting anything outside the seven
    /// weekday bits.
    pub fn from_bits(bits: u8) -> Result<Self> {
        if bits & !VALID_BITS != 0 {
            return Err(ScheduleError::InvalidRule(format!(
                "weekday mask {:#010b} sets bits outside Monday..Sunday",
                bits
            )));
        }
        Ok(WeekdayMask(bits))
    }

    pub fn from_weekday(day: Weekday) -> Self {
        WeekdayMask(1u8 << day.num_days_from_monday())
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, day: Weekday) -> bool {
        self.0 & (1u8 << day.num_days_from_monday()) != 0
    }

    pub const fn union(self, other: WeekdayMask) -> Self {
        WeekdayMask(self.0 | other.0)
    }

    /// A copy of this mask with `day` added.
    pub fn with(self, day: Weekday) -> Self {
        self.union(WeekdayMask::from_weekday(day))
    }

    /// Flagged weekdays in canonical (Monday-first) order.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        CANONICAL_ORDER
            .into_iter()
            .filter(move |day| self.contains(*day))
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }
}

impl BitOr for WeekdayMask {
    type Output = WeekdayMask;

    fn bitor(self, rhs: WeekdayMask) -> WeekdayMask {
        self.union(rhs)
    }
}

/// Legacy storage keeps the mask as a raw integer column.
impl TryFrom<u8> for WeekdayMask {
    type Error = ScheduleError;

    fn try_from(bits: u8) -> Result<Self> {
        WeekdayMask::from_bits(bits)
    }
}

impl From<WeekdayMask> for u8 {
    fn from(mask: WeekdayMask) -> Self {
        mask.bits()
    }
}

impl From<Weekday> for WeekdayMask {
    fn from(day: Weekday) -> Self {
        WeekdayMask::from_weekday(day)
    }
}

impl FromIterator<Weekday> for WeekdayMask {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        iter.into_iter().fold(WeekdayMask::NONE, WeekdayMask::with)
    }
}

impl From<Vec<Weekday>> for WeekdayMask {
    fn from(days: Vec<Weekday>) -> Self {
        days.into_iter().collect()
    }
}

impl From<WeekdayMask> for Vec<Weekday> {
    fn from(mask: WeekdayMask) -> Self {
        mask.iter().collect()
    }
}

impl fmt::Display for WeekdayMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        let names: Vec<String> = self.iter().map(|d| d.to_string()).collect();
        f.write_str(&names.join(","))
    }
}
