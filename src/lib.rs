mod consts;
mod date;
mod normalize;
mod period;
mod prelude;
mod query;
mod range;
mod types;

pub use consts::*;
pub use date::CalendarDate;
pub use normalize::{is_valid, normalize, validate};
pub use period::RelativePeriod;
pub use query::{
    ApiConfig, AttendanceData, AttendanceResponse, DateQuery, QueryError, ResolvedQuery,
    render_summary,
};
pub use range::DateRange;
pub use types::{Day, Month, Year};

use crate::prelude::*;

/// Error produced by date normalization and validation.
///
/// Each variant carries the offending token or components so callers can
/// surface a precise diagnostic; nothing is retried or swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    /// The free-form normalizer exhausted every template.
    #[display(fmt = "Unrecognized date format: {_0}")]
    UnrecognizedFormat(String),
    /// Syntactically 8-digit but calendrically impossible, or not a
    /// canonical `YYYYMMDD` string at all.
    #[display(fmt = "Invalid calendar date: {_0}")]
    InvalidCalendarDate(String),
    /// A period name outside the closed relative-period set.
    #[display(fmt = "Unknown relative period: {_0}")]
    UnknownPeriod(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for DateError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DateError::UnrecognizedFormat("not-a-date".into()).to_string(),
            "Unrecognized date format: not-a-date"
        );
        assert_eq!(
            DateError::InvalidCalendarDate("20250231".into()).to_string(),
            "Invalid calendar date: 20250231"
        );
        assert_eq!(
            DateError::UnknownPeriod("last_year".into()).to_string(),
            "Unknown relative period: last_year"
        );
        assert_eq!(
            DateError::InvalidYear(10000).to_string(),
            "Invalid year: 10000 (must be 1-9999)"
        );
        assert_eq!(
            DateError::InvalidDay {
                year: 2025,
                month: 2,
                day: 31
            }
            .to_string(),
            "Invalid day 31 for month 2025-02"
        );
    }
}
