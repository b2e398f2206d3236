use std::str::FromStr;

use crate::consts::DAYS_PER_WEEK;
use crate::{CalendarDate, DateError, DateRange, prelude::*};

/// A named date range relative to "now", matching the period names the
/// attendance tool accepts. The set is closed; anything else is an
/// [`DateError::UnknownPeriod`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum RelativePeriod {
    #[display(fmt = "today")]
    Today,
    #[display(fmt = "yesterday")]
    Yesterday,
    #[display(fmt = "day_before_yesterday")]
    DayBeforeYesterday,
    #[display(fmt = "this_week")]
    ThisWeek,
    #[display(fmt = "last_week")]
    LastWeek,
    #[display(fmt = "this_month")]
    ThisMonth,
    #[display(fmt = "last_month")]
    LastMonth,
}

impl RelativePeriod {
    /// Every recognized period, in the order the tool documents them.
    pub const ALL: [Self; 7] = [
        Self::Today,
        Self::Yesterday,
        Self::DayBeforeYesterday,
        Self::ThisWeek,
        Self::LastWeek,
        Self::ThisMonth,
        Self::LastMonth,
    ];

    /// The Chinese report label used when rendering attendance summaries.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Today => "今日",
            Self::Yesterday => "昨日",
            Self::DayBeforeYesterday => "前天",
            Self::ThisWeek => "本周",
            Self::LastWeek => "上周",
            Self::ThisMonth => "本月",
            Self::LastMonth => "上月",
        }
    }

    /// Resolves this period against `now` into a concrete inclusive range.
    ///
    /// Weeks start on Monday. `this_week` and `this_month` run up to `now`
    /// itself; `last_week` and `last_month` cover the whole previous
    /// week/month.
    ///
    /// # Errors
    /// Only when the arithmetic steps outside years 1..=9999, which cannot
    /// happen for any realistic `now`.
    pub fn resolve(self, now: CalendarDate) -> Result<DateRange, DateError> {
        match self {
            Self::Today => Ok(DateRange::single(now)),
            Self::Yesterday => Ok(DateRange::single(now.minus_days(1)?)),
            Self::DayBeforeYesterday => Ok(DateRange::single(now.minus_days(2)?)),
            Self::ThisWeek => {
                let monday = now.minus_days(i64::from(now.weekday_monday0()))?;
                Ok(DateRange::new(monday, now))
            }
            Self::LastWeek => {
                let monday = now.minus_days(i64::from(now.weekday_monday0()) + DAYS_PER_WEEK)?;
                let sunday = monday.plus_days(DAYS_PER_WEEK - 1)?;
                Ok(DateRange::new(monday, sunday))
            }
            Self::ThisMonth => Ok(DateRange::new(now.first_of_month()?, now)),
            Self::LastMonth => {
                // Step to day 1, back one day to land in the previous month,
                // then take that month's bounds.
                let last_of_prev = now.first_of_month()?.minus_days(1)?;
                Ok(DateRange::new(last_of_prev.first_of_month()?, last_of_prev))
            }
        }
    }
}

impl FromStr for RelativePeriod {
    type Err = DateError;

    /// Case-insensitive match on the snake_case period names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(Self::Today),
            "yesterday" => Ok(Self::Yesterday),
            "day_before_yesterday" => Ok(Self::DayBeforeYesterday),
            "this_week" => Ok(Self::ThisWeek),
            "last_week" => Ok(Self::LastWeek),
            "this_month" => Ok(Self::ThisMonth),
            "last_month" => Ok(Self::LastMonth),
            _ => Err(DateError::UnknownPeriod(s.to_owned())),
        }
    }
}

impl serde::Serialize for RelativePeriod {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for RelativePeriod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
