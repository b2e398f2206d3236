use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};

use crate::DateError;
use crate::consts::{MAX_YEAR, MIN_DAY};
use crate::types::{Day, Month, Year, days_in_month};

/// A concrete Gregorian calendar day, always presentable as the canonical
/// 8-digit `YYYYMMDD` string the upstream attendance API expects.
///
/// Construction goes through the validated [`Year`] / [`Month`] / [`Day`]
/// component types, so a value of this type is always a real calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: Year,
    month: Month,
    day: Day,
}

impl CalendarDate {
    /// Creates a date from raw components, validating each one.
    ///
    /// # Errors
    /// Returns the component error (`InvalidYear`, `InvalidMonth` or
    /// `InvalidDay`) for the first field that fails validation.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        let year_t = Year::new(year)?;
        let month_t = Month::new(month)?;
        let day_t = Day::new(day, year, month)?;
        Ok(Self {
            year: year_t,
            month: month_t,
            day: day_t,
        })
    }

    /// Returns the year component
    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    /// Returns the month component
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Returns the day component
    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Today's local calendar day.
    ///
    /// Callers that make several normalizer calls for one logical request
    /// should capture this once and pass it to every call, so all of them
    /// see the same "now".
    ///
    /// # Errors
    /// Returns `InvalidCalendarDate` if the local date falls outside the
    /// supported year range (1..=9999).
    pub fn today() -> Result<Self, DateError> {
        Self::try_from(Local::now().date_naive())
    }

    /// Days since the Unix epoch (1970-01-01), negative for earlier dates.
    ///
    /// Standard civil-from-days conversion over 400-year Gregorian eras.
    pub(crate) fn to_epoch_days(self) -> i64 {
        let m = i64::from(self.month.get());
        let d = i64::from(self.day.get());
        let y = i64::from(self.year.get()) - i64::from(m <= 2);
        let era = y.div_euclid(400);
        let yoe = y - era * 400;
        let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + d - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        era * 146_097 + doe - 719_468
    }

    /// Inverse of [`Self::to_epoch_days`].
    ///
    /// # Errors
    /// Returns `InvalidYear` if the resulting year falls outside 1..=9999.
    pub(crate) fn from_epoch_days(days: i64) -> Result<Self, DateError> {
        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365;
        let y = yoe + era * 400;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let d = doy - (153 * mp + 2) / 5 + 1;
        let m = if mp < 10 { mp + 3 } else { mp - 9 };
        let y = y + i64::from(m <= 2);

        if !(1..=i64::from(MAX_YEAR)).contains(&y) {
            return Err(DateError::InvalidYear(y.clamp(0, i64::from(u16::MAX)) as u16));
        }
        Self::from_ymd(y as u16, m as u8, d as u8)
    }

    /// The date `n` days earlier.
    ///
    /// # Errors
    /// Returns `InvalidYear` when stepping below year 1.
    pub fn minus_days(self, n: i64) -> Result<Self, DateError> {
        Self::from_epoch_days(self.to_epoch_days() - n)
    }

    /// The date `n` days later.
    ///
    /// # Errors
    /// Returns `InvalidYear` when stepping past year 9999.
    pub fn plus_days(self, n: i64) -> Result<Self, DateError> {
        Self::from_epoch_days(self.to_epoch_days() + n)
    }

    /// Weekday index with Monday = 0 through Sunday = 6.
    pub fn weekday_monday0(self) -> u8 {
        // Epoch day 0 (1970-01-01) was a Thursday, index 3.
        (self.to_epoch_days() + 3).rem_euclid(7) as u8
    }

    /// The first day of this date's month.
    ///
    /// # Errors
    /// Never fails in practice; day 1 is valid for every month.
    pub fn first_of_month(self) -> Result<Self, DateError> {
        let day = Day::new(MIN_DAY, self.year.get(), self.month.get())?;
        Ok(Self { day, ..self })
    }

    /// The last day of this date's month.
    ///
    /// # Errors
    /// Never fails in practice; the month length is always a valid day.
    pub fn last_of_month(self) -> Result<Self, DateError> {
        let last = days_in_month(self.year.get(), self.month.get());
        let day = Day::new(last, self.year.get(), self.month.get())?;
        Ok(Self { day, ..self })
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}{:02}{:02}",
            self.year.get(),
            self.month.get(),
            self.day.get()
        )
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    /// Strict canonical parse: exactly 8 ASCII digits forming a real
    /// Gregorian date. Anything else is `InvalidCalendarDate`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DateError::InvalidCalendarDate(s.to_owned());

        if s.len() != crate::consts::CANONICAL_LEN || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year = s[0..4].parse::<u16>().map_err(|_| invalid())?;
        let month = s[4..6].parse::<u8>().map_err(|_| invalid())?;
        let day = s[6..8].parse::<u8>().map_err(|_| invalid())?;

        Self::from_ymd(year, month, day).map_err(|_| invalid())
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = DateError;

    fn try_from(value: NaiveDate) -> Result<Self, Self::Error> {
        let out_of_range = || DateError::InvalidCalendarDate(value.to_string());
        let year = u16::try_from(value.year()).map_err(|_| out_of_range())?;
        let month = u8::try_from(value.month()).map_err(|_| out_of_range())?;
        let day = u8::try_from(value.day()).map_err(|_| out_of_range())?;
        Self::from_ymd(year, month, day)
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_display_canonical() {
        assert_eq!(date(2025, 4, 23).to_string(), "20250423");
        assert_eq!(date(803, 1, 9).to_string(), "08030109");
    }

    #[test]
    fn test_parse_canonical() {
        let d = "20250423".parse::<CalendarDate>().unwrap();
        assert_eq!(d, date(2025, 4, 23));
        assert_eq!(d.year(), 2025);
        assert_eq!(d.month(), 4);
        assert_eq!(d.day(), 23);
    }

    #[test]
    fn test_parse_rejects_impossible_date() {
        let result = "20250231".parse::<CalendarDate>();
        assert!(matches!(result, Err(DateError::InvalidCalendarDate(s)) if s == "20250231"));
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!("2025042".parse::<CalendarDate>().is_err());
        assert!("202504233".parse::<CalendarDate>().is_err());
        assert!("2025-4-2".parse::<CalendarDate>().is_err());
        assert!("2025042x".parse::<CalendarDate>().is_err());
        assert!("".parse::<CalendarDate>().is_err());
    }

    #[test]
    fn test_parse_rejects_zero_components() {
        assert!("20250001".parse::<CalendarDate>().is_err());
        assert!("20250100".parse::<CalendarDate>().is_err());
        assert!("00001231".parse::<CalendarDate>().is_err());
    }

    #[test]
    fn test_epoch_days_round_trip() {
        for d in [
            date(1970, 1, 1),
            date(2024, 2, 29),
            date(2025, 3, 1),
            date(1, 1, 1),
            date(9999, 12, 31),
        ] {
            assert_eq!(CalendarDate::from_epoch_days(d.to_epoch_days()).unwrap(), d);
        }
        assert_eq!(date(1970, 1, 1).to_epoch_days(), 0);
    }

    #[test]
    fn test_weekday() {
        // 1970-01-01 was a Thursday
        assert_eq!(date(1970, 1, 1).weekday_monday0(), 3);
        // 2025-04-21 was a Monday, 2025-04-23 a Wednesday
        assert_eq!(date(2025, 4, 21).weekday_monday0(), 0);
        assert_eq!(date(2025, 4, 23).weekday_monday0(), 2);
        // 2025-04-20 was a Sunday
        assert_eq!(date(2025, 4, 20).weekday_monday0(), 6);
    }

    #[test]
    fn test_minus_days_across_boundaries() {
        assert_eq!(date(2025, 3, 1).minus_days(1).unwrap(), date(2025, 2, 28));
        assert_eq!(date(2024, 3, 1).minus_days(1).unwrap(), date(2024, 2, 29));
        assert_eq!(date(2025, 1, 1).minus_days(1).unwrap(), date(2024, 12, 31));
        assert_eq!(date(2025, 4, 23).minus_days(0).unwrap(), date(2025, 4, 23));
    }

    #[test]
    fn test_minus_days_underflow() {
        let result = date(1, 1, 1).minus_days(1);
        assert!(matches!(result, Err(DateError::InvalidYear(_))));
    }

    #[test]
    fn test_plus_days_overflow() {
        let result = date(9999, 12, 31).plus_days(1);
        assert!(matches!(result, Err(DateError::InvalidYear(_))));
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(date(2025, 4, 23).first_of_month().unwrap(), date(2025, 4, 1));
        assert_eq!(date(2025, 4, 23).last_of_month().unwrap(), date(2025, 4, 30));
        assert_eq!(date(2024, 2, 10).last_of_month().unwrap(), date(2024, 2, 29));
        assert_eq!(date(2023, 2, 10).last_of_month().unwrap(), date(2023, 2, 28));
    }

    #[test]
    fn test_ordering() {
        assert!(date(2025, 4, 22) < date(2025, 4, 23));
        assert!(date(2024, 12, 31) < date(2025, 1, 1));
        assert!(date(2025, 1, 31) < date(2025, 2, 1));
    }

    #[test]
    fn test_today_is_parseable() {
        let today = CalendarDate::today().unwrap();
        let canonical = today.to_string();
        assert_eq!(canonical.parse::<CalendarDate>().unwrap(), today);
    }

    #[test]
    fn test_try_from_naive_date() {
        let naive = NaiveDate::from_ymd_opt(2025, 4, 23).unwrap();
        assert_eq!(CalendarDate::try_from(naive).unwrap(), date(2025, 4, 23));

        let negative = NaiveDate::from_ymd_opt(-44, 3, 15).unwrap();
        assert!(CalendarDate::try_from(negative).is_err());
    }

    #[test]
    fn test_serde_string_format() {
        let d = date(2025, 4, 23);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#""20250423""#);
        let parsed: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(d, parsed);

        let result: Result<CalendarDate, _> = serde_json::from_str(r#""20250231""#);
        assert!(result.is_err());
    }
}
