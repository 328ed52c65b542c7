//! Weekly time slot model.
//!
//! The timetable week is a fixed grid of 5 teaching days × 6 two-hour
//! slots (08:00-20:00). Every slot maps to a `(row, column)` coordinate
//! of an [`AvailabilityGrid`](super::AvailabilityGrid): the row is the
//! slot within the day, the column is the day.
//!
//! # Codes
//! Slots are written as a day prefix plus a slot digit: `M1` is
//! Monday 08:00-10:00, `TH6` is Thursday 18:00-20:00.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EntityError;

/// Number of slots in a teaching day.
pub const SLOTS_PER_DAY: usize = 6;
/// Number of teaching days in a week.
pub const DAYS_PER_WEEK: usize = 5;

const SLOT_RANGES: [&str; SLOTS_PER_DAY] = [
    "08:00-10:00",
    "10:00-12:00",
    "12:00-14:00",
    "14:00-16:00",
    "16:00-18:00",
    "18:00-20:00",
];

/// A teaching day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    /// All days in week order.
    pub const ALL: [Day; DAYS_PER_WEEK] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    /// Grid column of this day.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short code used in slot codes (`M`, `T`, `W`, `TH`, `F`).
    pub fn code(self) -> &'static str {
        match self {
            Day::Monday => "M",
            Day::Tuesday => "T",
            Day::Wednesday => "W",
            Day::Thursday => "TH",
            Day::Friday => "F",
        }
    }

    /// English day name.
    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
        }
    }

    /// Parses an English day name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(name))
    }
}

/// One of the 30 weekly teaching slots.
///
/// Equality is by (day, slot). The grid coordinates are a bijection
/// onto `[0, 6) × [0, 5)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot {
    day: Day,
    // 0-based slot within the day
    slot: u8,
}

impl TimeSlot {
    /// Total number of weekly slots.
    pub const COUNT: usize = SLOTS_PER_DAY * DAYS_PER_WEEK;

    /// Creates a slot from a day and a 1-based slot number (1..=6).
    pub fn new(day: Day, number: u8) -> Option<Self> {
        if (1..=SLOTS_PER_DAY as u8).contains(&number) {
            Some(Self {
                day,
                slot: number - 1,
            })
        } else {
            None
        }
    }

    /// Creates a slot from grid coordinates.
    pub fn from_grid(row: usize, column: usize) -> Option<Self> {
        if row >= SLOTS_PER_DAY || column >= DAYS_PER_WEEK {
            return None;
        }
        Some(Self {
            day: Day::ALL[column],
            slot: row as u8,
        })
    }

    /// Iterates all 30 slots, day by day.
    pub fn all() -> impl Iterator<Item = TimeSlot> {
        Day::ALL.into_iter().flat_map(|day| {
            (0..SLOTS_PER_DAY as u8).map(move |slot| TimeSlot { day, slot })
        })
    }

    /// The day of this slot.
    #[inline]
    pub fn day(&self) -> Day {
        self.day
    }

    /// 1-based slot number within the day.
    #[inline]
    pub fn number(&self) -> u8 {
        self.slot + 1
    }

    /// Grid coordinates `(row, column)`.
    #[inline]
    pub fn grid(&self) -> (usize, usize) {
        (self.slot as usize, self.day.index())
    }

    /// Dense index in `0..30`, following [`TimeSlot::all`] order.
    #[inline]
    pub fn index(&self) -> usize {
        self.day.index() * SLOTS_PER_DAY + self.slot as usize
    }

    /// Clock range of this slot, e.g. `"08:00-10:00"`.
    pub fn range(&self) -> &'static str {
        SLOT_RANGES[self.slot as usize]
    }

    /// Human-readable label, e.g. `"Monday 08:00-10:00"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.day.name(), self.range())
    }

    /// Parses a slot code such as `M1`, `T4` or `TH6`.
    pub fn from_code(code: &str) -> Result<Self, EntityError> {
        let code = code.trim();
        let split = code
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(code.len());
        let (prefix, digits) = code.split_at(split);

        let day = Day::ALL
            .into_iter()
            .find(|d| d.code().eq_ignore_ascii_case(prefix));
        let number = digits.parse::<u8>().ok();

        match (day, number) {
            (Some(day), Some(number)) => Self::new(day, number).ok_or_else(|| {
                EntityError::single(
                    "time slot",
                    format!("Slot {number} is out of range 1-6 in '{code}'."),
                )
            }),
            _ => Err(EntityError::single(
                "time slot",
                format!("Invalid time slot code '{code}'."),
            )),
        }
    }

    /// Parses a day name and a clock range, e.g. `("Monday", "08:00-10:00")`.
    ///
    /// Single-digit hours (`8:00-10:00`) are accepted.
    pub fn from_day_and_range(day: &str, range: &str) -> Result<Self, EntityError> {
        let parsed_day = Day::from_name(day);
        let normalized = normalize_range(range);
        let slot = SLOT_RANGES.iter().position(|r| Some(*r) == normalized.as_deref());

        match (parsed_day, slot) {
            (Some(day), Some(slot)) => Ok(Self {
                day,
                slot: slot as u8,
            }),
            (None, _) => Err(EntityError::single(
                "time slot",
                format!("Invalid day '{day}'."),
            )),
            (_, None) => Err(EntityError::single(
                "time slot",
                format!("Invalid time interval '{range}' for {day}."),
            )),
        }
    }
}

fn normalize_range(range: &str) -> Option<String> {
    let (start, end) = range.trim().split_once('-')?;
    let pad = |t: &str| {
        let t = t.trim();
        let (h, m) = t.split_once(':')?;
        let h: u8 = h.parse().ok()?;
        let m: u8 = m.parse().ok()?;
        Some(format!("{h:02}:{m:02}"))
    };
    Some(format!("{}-{}", pad(start)?, pad(end)?))
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.day.code(), self.number())
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.to_string()
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = EntityError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::from_code(&code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_thirty_slots() {
        let slots: Vec<_> = TimeSlot::all().collect();
        assert_eq!(slots.len(), TimeSlot::COUNT);
        let unique: HashSet<_> = slots.iter().collect();
        assert_eq!(unique.len(), 30);
    }

    #[test]
    fn test_grid_is_bijection() {
        let mut seen = HashSet::new();
        for (i, slot) in TimeSlot::all().enumerate() {
            let (row, col) = slot.grid();
            assert!(row < SLOTS_PER_DAY && col < DAYS_PER_WEEK);
            assert!(seen.insert((row, col)));
            assert_eq!(TimeSlot::from_grid(row, col), Some(slot));
            assert_eq!(slot.index(), i);
        }
        assert!(TimeSlot::from_grid(6, 0).is_none());
        assert!(TimeSlot::from_grid(0, 5).is_none());
    }

    #[test]
    fn test_codes() {
        let m1 = TimeSlot::from_code("M1").unwrap();
        assert_eq!(m1.day(), Day::Monday);
        assert_eq!(m1.grid(), (0, 0));

        let th6 = TimeSlot::from_code("TH6").unwrap();
        assert_eq!(th6.day(), Day::Thursday);
        assert_eq!(th6.grid(), (5, 3));
        assert_eq!(th6.to_string(), "TH6");

        let t3 = TimeSlot::from_code("T3").unwrap();
        assert_eq!(t3.day(), Day::Tuesday);

        assert!(TimeSlot::from_code("M7").is_err());
        assert!(TimeSlot::from_code("X1").is_err());
        assert!(TimeSlot::from_code("M").is_err());
    }

    #[test]
    fn test_day_and_range() {
        let slot = TimeSlot::from_day_and_range("Monday", "08:00-10:00").unwrap();
        assert_eq!(slot, TimeSlot::from_code("M1").unwrap());

        let slot = TimeSlot::from_day_and_range("friday", "8:00-10:00").unwrap();
        assert_eq!(slot.to_string(), "F1");
        assert_eq!(slot.label(), "Friday 08:00-10:00");

        assert!(TimeSlot::from_day_and_range("Sunday", "08:00-10:00").is_err());
        assert!(TimeSlot::from_day_and_range("Monday", "09:00-11:00").is_err());
    }

    #[test]
    fn test_serde_as_code() {
        let slot = TimeSlot::from_code("W2").unwrap();
        let json = serde_json::to_string(&slot).unwrap();
        assert_eq!(json, "\"W2\"");
        let back: TimeSlot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, slot);
    }
}
