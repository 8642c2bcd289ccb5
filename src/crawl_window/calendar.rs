//! Calendar fields and composite field values
//!
//! Rules compare a *composite* of one or more fields, most significant first:
//! month, week of month, day of month, day of week, hour, minute.

use std::fmt;
use std::ops::BitOr;

use chrono::{Datelike, Timelike};
use serde::{Deserialize, Serialize};

/// One calendar field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarField {
    /// 1 (January) to 12
    Month,
    /// 1 to 6, weeks starting on Sunday; the week holding the 1st is week 1
    WeekOfMonth,
    /// 1 to 31
    DayOfMonth,
    /// 1 (Sunday) to 7 (Saturday)
    DayOfWeek,
    /// 0 to 23
    HourOfDay,
    /// 0 to 59
    Minute,
}

impl CalendarField {
    /// Most significant first
    pub const ORDERED: [CalendarField; 6] = [
        CalendarField::Month,
        CalendarField::WeekOfMonth,
        CalendarField::DayOfMonth,
        CalendarField::DayOfWeek,
        CalendarField::HourOfDay,
        CalendarField::Minute,
    ];

    const fn bit(self) -> u8 {
        match self {
            Self::Month => 1 << 5,
            Self::WeekOfMonth => 1 << 4,
            Self::DayOfMonth => 1 << 3,
            Self::DayOfWeek => 1 << 2,
            Self::HourOfDay => 1 << 1,
            Self::Minute => 1,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Month => 0,
            Self::WeekOfMonth => 1,
            Self::DayOfMonth => 2,
            Self::DayOfWeek => 3,
            Self::HourOfDay => 4,
            Self::Minute => 5,
        }
    }
}

/// Set of calendar fields a rule compares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FieldMask(u8);

impl FieldMask {
    pub const MONTH: Self = Self(CalendarField::Month.bit());
    pub const WEEK_OF_MONTH: Self = Self(CalendarField::WeekOfMonth.bit());
    pub const DAY_OF_MONTH: Self = Self(CalendarField::DayOfMonth.bit());
    pub const DAY_OF_WEEK: Self = Self(CalendarField::DayOfWeek.bit());
    pub const HOUR_OF_DAY: Self = Self(CalendarField::HourOfDay.bit());
    pub const MINUTE: Self = Self(CalendarField::Minute.bit());
    /// Hour and minute
    pub const TIME: Self = Self(CalendarField::HourOfDay.bit() | CalendarField::Minute.bit());

    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn contains(self, field: CalendarField) -> bool {
        self.0 & field.bit() != 0
    }

    /// Fields in the mask, most significant first
    pub fn fields(self) -> impl Iterator<Item = CalendarField> {
        CalendarField::ORDERED
            .into_iter()
            .filter(move |f| self.contains(*f))
    }

    #[must_use]
    pub fn least_significant(self) -> Option<CalendarField> {
        self.fields().last()
    }
}

impl BitOr for FieldMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl From<CalendarField> for FieldMask {
    fn from(field: CalendarField) -> Self {
        Self(field.bit())
    }
}

/// Values of every calendar field at one instant, or a partial pattern
///
/// Used both for the fields of a real instant and for rule endpoints, where
/// only the fields in the rule's mask matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CalendarPoint {
    values: [u32; 6],
}

impl CalendarPoint {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fields of a zoned date-time
    pub fn from_datetime<T: Datelike + Timelike>(dt: &T) -> Self {
        let day = dt.day();
        // Sunday-first weekday of the 1st of the month, 0 = Sunday
        let first_weekday = (dt.weekday().num_days_from_sunday() + 35 - (day - 1) % 7) % 7;
        let week_of_month = (day - 1 + first_weekday) / 7 + 1;
        Self::new()
            .with(CalendarField::Month, dt.month())
            .with(CalendarField::WeekOfMonth, week_of_month)
            .with(CalendarField::DayOfMonth, day)
            .with(CalendarField::DayOfWeek, dt.weekday().num_days_from_sunday() + 1)
            .with(CalendarField::HourOfDay, dt.hour())
            .with(CalendarField::Minute, dt.minute())
    }

    /// Hour and minute only
    #[must_use]
    pub fn time(hour: u32, minute: u32) -> Self {
        Self::new()
            .with(CalendarField::HourOfDay, hour)
            .with(CalendarField::Minute, minute)
    }

    #[must_use]
    pub fn with(mut self, field: CalendarField, value: u32) -> Self {
        self.values[field.index()] = value;
        self
    }

    #[must_use]
    pub fn get(&self, field: CalendarField) -> u32 {
        self.values[field.index()]
    }

    /// Composite of the masked fields; unmasked fields compare equal
    #[must_use]
    pub fn project(&self, mask: FieldMask) -> [u32; 6] {
        let mut out = [0; 6];
        for field in mask.fields() {
            out[field.index()] = self.values[field.index()];
        }
        out
    }
}

impl fmt::Display for CalendarPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [month, week, day, dow, hour, minute] = self.values;
        write!(
            f,
            "month {month}, week {week}, day {day}, weekday {dow}, {hour}:{minute:02}"
        )
    }
}
