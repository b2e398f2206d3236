use std::{cmp::Ordering, str::FromStr};

use crate::{CalendarDate, DateError, prelude::*};

/// An inclusive pair of calendar days, displayed as `YYYYMMDD/YYYYMMDD`.
///
/// The normalizer does not require `start <= end`: an inverted pair supplied
/// by a caller is echoed through unchanged, and ordering is left to the
/// upstream API. Use [`DateRange::is_ordered`] when a caller wants to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct DateRange {
    start: CalendarDate,
    end: CalendarDate,
}

impl DateRange {
    /// Creates a range from two dates, as given.
    pub const fn new(start: CalendarDate, end: CalendarDate) -> Self {
        Self { start, end }
    }

    /// A range covering a single day.
    pub const fn single(day: CalendarDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// Returns the start date of the range
    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    /// Returns the end date of the range
    pub const fn end(&self) -> CalendarDate {
        self.end
    }

    /// Returns both start and end dates as a tuple
    pub const fn dates(&self) -> (CalendarDate, CalendarDate) {
        (self.start, self.end)
    }

    /// Whether the range covers exactly one day
    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }

    /// Whether `start <= end` holds
    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }

    /// Checks if the range contains a given day (only meaningful on an
    /// ordered range; an inverted range contains nothing).
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl FromStr for DateRange {
    type Err = DateError;

    /// Parses `YYYYMMDD/YYYYMMDD`, each side going through the strict
    /// canonical-date gate.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let Some((start_str, end_str)) = trimmed.split_once('/') else {
            return Err(DateError::UnrecognizedFormat(trimmed.to_owned()));
        };
        if end_str.contains('/') {
            return Err(DateError::UnrecognizedFormat(trimmed.to_owned()));
        }

        let start = start_str.trim().parse::<CalendarDate>()?;
        let end = end_str.trim().parse::<CalendarDate>()?;
        Ok(Self::new(start, end))
    }
}

impl PartialOrd for DateRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateRange {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare start dates first, then end dates
        match self.start.cmp(&other.start) {
            Ordering::Equal => self.end.cmp(&other.end),
            ord => ord,
        }
    }
}

impl serde::Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
