//! The attendance-query side of the crate: resolving a caller's raw
//! `start_date` / `end_date` / `period` fields into a validated
//! [`DateRange`], building the upstream request URL, decoding the upstream
//! response shape and rendering the textual summary.
//!
//! Everything here is pure data; the HTTP transport that actually sends
//! the request lives outside this crate.

use serde::{Deserialize, Serialize};

use crate::normalize::{normalize, validate};
use crate::{CalendarDate, DateError, DateRange, RelativePeriod};

/// Upstream API path for the daily consumer totals.
const ATTENDANCE_PATH: &str = "/rsdata/totalnumberofconsumers";

/// Error from query resolution or the upstream API.
///
/// Date problems and upstream failures are distinct kinds so a caller can
/// tell a typo in its own input from a broken upstream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The caller's date input failed normalization or validation.
    #[error(transparent)]
    Date(#[from] DateError),

    /// The upstream API reported failure or returned an unusable body.
    #[error("Upstream API error: {0}")]
    Api(String),
}

/// Connection settings for the attendance API, supplied explicitly at
/// construction time. Nothing in this crate reads the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    token: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// The `GET` URL for consumer totals over `range`.
    pub fn attendance_url(&self, range: &DateRange) -> String {
        format!(
            "{}{ATTENDANCE_PATH}?startTime={}&endTime={}",
            self.base_url.trim_end_matches('/'),
            range.start(),
            range.end()
        )
    }

    /// The `Authorization` header value.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// The three optional fields a caller may supply, exactly as the tool
/// receives them. Precedence during resolution: `period` first, then an
/// explicit date pair, then a default of today.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DateQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub period: Option<String>,
}

impl DateQuery {
    /// Resolves the query against one snapshot of the current day.
    ///
    /// - A `period` field is parsed strictly: an unknown name is a hard
    ///   [`DateError::UnknownPeriod`], never a silent today-fallback.
    /// - Explicit dates each go through the free-form normalizer and the
    ///   strict calendar gate. The pair is kept as given; an inverted
    ///   range is passed through for the upstream API to judge.
    /// - With neither period nor a full date pair, today is queried.
    ///
    /// # Errors
    /// `QueryError::Date` for any normalization or validation failure.
    pub fn resolve(&self, now: CalendarDate) -> Result<ResolvedQuery, QueryError> {
        if let Some(name) = &self.period {
            let period: RelativePeriod = name.parse::<RelativePeriod>().map_err(QueryError::Date)?;
            return Ok(ResolvedQuery {
                range: period.resolve(now)?,
                period: Some(period),
            });
        }

        if let (Some(start), Some(end)) = (&self.start_date, &self.end_date) {
            let start = validate(&normalize(start, now)?)?;
            let end = validate(&normalize(end, now)?)?;
            return Ok(ResolvedQuery {
                range: DateRange::new(start, end),
                period: None,
            });
        }

        Ok(ResolvedQuery {
            range: DateRange::single(now),
            period: None,
        })
    }
}

/// A fully resolved query: the validated range plus the period it came
/// from, when it came from one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedQuery {
    pub range: DateRange,
    pub period: Option<RelativePeriod>,
}

impl ResolvedQuery {
    /// The report title: the period's label, or the raw date range.
    pub fn title(&self) -> String {
        match self.period {
            Some(period) => period.label().to_owned(),
            None => format!("{} 至 {}", self.range.start(), self.range.end()),
        }
    }
}

/// Wire shape of the upstream response:
/// `{"success": bool, "data": {"morningCount": .., "afternoonCount": ..}}`
/// with an optional `error` message on failure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AttendanceResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<AttendanceData>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AttendanceResponse {
    /// Extracts the counts, turning `success == false` or a missing body
    /// into a [`QueryError::Api`].
    ///
    /// # Errors
    /// `QueryError::Api` carrying the upstream error message when present.
    pub fn into_counts(self) -> Result<AttendanceData, QueryError> {
        if !self.success {
            let message = self.error.unwrap_or_else(|| "unknown error".to_owned());
            return Err(QueryError::Api(message));
        }
        self.data
            .ok_or_else(|| QueryError::Api("response missing data".to_owned()))
    }
}

/// Morning and afternoon head counts for the queried range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceData {
    pub morning_count: i64,
    pub afternoon_count: i64,
}

impl AttendanceData {
    pub const fn total(&self) -> i64 {
        self.morning_count + self.afternoon_count
    }
}

/// Renders the human-readable attendance report for a resolved query.
pub fn render_summary(resolved: &ResolvedQuery, data: &AttendanceData) -> String {
    format!(
        "餐厅就餐人数统计 ({}):\n日期范围: {} 至 {}\n早餐人数: {} 人\n午餐人数: {} 人\n总计: {} 人\n",
        resolved.title(),
        resolved.range.start(),
        resolved.range.end(),
        data.morning_count,
        data.afternoon_count,
        data.total()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2025-04-23 was a Wednesday
    fn now() -> CalendarDate {
        "20250423".parse().unwrap()
    }

    fn config() -> ApiConfig {
        ApiConfig::new("https://canteen.example.com", "secret-token")
    }

    #[test]
    fn test_period_takes_precedence_over_dates() {
        let query = DateQuery {
            start_date: Some("20250101".into()),
            end_date: Some("20250131".into()),
            period: Some("last_week".into()),
        };
        let resolved = query.resolve(now()).unwrap();
        assert_eq!(resolved.range.start().to_string(), "20250414");
        assert_eq!(resolved.range.end().to_string(), "20250420");
        assert_eq!(resolved.period, Some(RelativePeriod::LastWeek));
    }

    #[test]
    fn test_unknown_period_is_a_hard_error() {
        let query = DateQuery {
            period: Some("last_year".into()),
            ..DateQuery::default()
        };
        let result = query.resolve(now());
        assert!(matches!(
            result,
            Err(QueryError::Date(DateError::UnknownPeriod(s))) if s == "last_year"
        ));
    }

    #[test]
    fn test_explicit_dates_are_normalized_and_validated() {
        let query = DateQuery {
            start_date: Some("2025-04-01".into()),
            end_date: Some("4月20号".into()),
            period: None,
        };
        let resolved = query.resolve(now()).unwrap();
        assert_eq!(resolved.range.start().to_string(), "20250401");
        assert_eq!(resolved.range.end().to_string(), "20250420");
        assert_eq!(resolved.period, None);
    }

    #[test]
    fn test_impossible_eight_digit_date_fails_the_gate() {
        let query = DateQuery {
            start_date: Some("20250231".into()),
            end_date: Some("20250423".into()),
            period: None,
        };
        let result = query.resolve(now());
        assert!(matches!(
            result,
            Err(QueryError::Date(DateError::InvalidCalendarDate(s))) if s == "20250231"
        ));
    }

    #[test]
    fn test_unrecognized_date_reports_the_token() {
        let query = DateQuery {
            start_date: Some("soonish".into()),
            end_date: Some("20250423".into()),
            period: None,
        };
        let result = query.resolve(now());
        assert!(matches!(
            result,
            Err(QueryError::Date(DateError::UnrecognizedFormat(s))) if s == "soonish"
        ));
    }

    #[test]
    fn test_missing_fields_default_to_today() {
        let resolved = DateQuery::default().resolve(now()).unwrap();
        assert!(resolved.range.is_single_day());
        assert_eq!(resolved.range.start().to_string(), "20250423");
        assert_eq!(resolved.period, None);

        // One date alone is not enough
        let query = DateQuery {
            start_date: Some("20250401".into()),
            ..DateQuery::default()
        };
        let resolved = query.resolve(now()).unwrap();
        assert_eq!(resolved.range.start().to_string(), "20250423");
    }

    #[test]
    fn test_inverted_range_is_echoed_through() {
        let query = DateQuery {
            start_date: Some("20250423".into()),
            end_date: Some("20250401".into()),
            period: None,
        };
        let resolved = query.resolve(now()).unwrap();
        assert!(!resolved.range.is_ordered());
        assert_eq!(resolved.range.start().to_string(), "20250423");
    }

    #[test]
    fn test_attendance_url() {
        let range = "20250414/20250420".parse::<DateRange>().unwrap();
        assert_eq!(
            config().attendance_url(&range),
            "https://canteen.example.com/rsdata/totalnumberofconsumers?startTime=20250414&endTime=20250420"
        );
    }

    #[test]
    fn test_attendance_url_tolerates_trailing_slash() {
        let config = ApiConfig::new("https://canteen.example.com/", "t");
        let range = DateRange::single(now());
        assert!(config.attendance_url(&range).starts_with(
            "https://canteen.example.com/rsdata/totalnumberofconsumers?"
        ));
    }

    #[test]
    fn test_bearer_header() {
        assert_eq!(config().bearer(), "Bearer secret-token");
    }

    #[test]
    fn test_query_deserialization() {
        let query: DateQuery =
            serde_json::from_str(r#"{"start_date": "2025-04-01", "period": "this_week"}"#).unwrap();
        assert_eq!(query.start_date.as_deref(), Some("2025-04-01"));
        assert_eq!(query.end_date, None);
        assert_eq!(query.period.as_deref(), Some("this_week"));
    }

    #[test]
    fn test_response_success_decoding() {
        let response: AttendanceResponse = serde_json::from_str(
            r#"{"success": true, "data": {"morningCount": 120, "afternoonCount": 180}}"#,
        )
        .unwrap();
        let data = response.into_counts().unwrap();
        assert_eq!(data.morning_count, 120);
        assert_eq!(data.afternoon_count, 180);
        assert_eq!(data.total(), 300);
    }

    #[test]
    fn test_response_failure_carries_upstream_message() {
        let response: AttendanceResponse =
            serde_json::from_str(r#"{"success": false, "error": "invalid token"}"#).unwrap();
        let result = response.into_counts();
        assert!(matches!(result, Err(QueryError::Api(m)) if m == "invalid token"));
    }

    #[test]
    fn test_response_failure_without_message() {
        let response: AttendanceResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        let result = response.into_counts();
        assert!(matches!(result, Err(QueryError::Api(m)) if m == "unknown error"));
    }

    #[test]
    fn test_response_success_with_missing_data() {
        let response: AttendanceResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(matches!(response.into_counts(), Err(QueryError::Api(_))));
    }

    #[test]
    fn test_title_for_period_and_raw_range() {
        let query = DateQuery {
            period: Some("yesterday".into()),
            ..DateQuery::default()
        };
        assert_eq!(query.resolve(now()).unwrap().title(), "昨日");

        let query = DateQuery {
            start_date: Some("20250401".into()),
            end_date: Some("20250420".into()),
            period: None,
        };
        assert_eq!(
            query.resolve(now()).unwrap().title(),
            "20250401 至 20250420"
        );
    }

    #[test]
    fn test_render_summary() {
        let query = DateQuery {
            period: Some("last_week".into()),
            ..DateQuery::default()
        };
        let resolved = query.resolve(now()).unwrap();
        let data = AttendanceData {
            morning_count: 120,
            afternoon_count: 180,
        };
        let summary = render_summary(&resolved, &data);
        assert!(summary.contains("餐厅就餐人数统计 (上周)"));
        assert!(summary.contains("日期范围: 20250414 至 20250420"));
        assert!(summary.contains("早餐人数: 120 人"));
        assert!(summary.contains("午餐人数: 180 人"));
        assert!(summary.contains("总计: 300 人"));
    }
}
