//! Free-form date token normalization.
//!
//! Operators type dates in many shapes: canonical `20240401`, relative
//! period names like `last_week`, numeric forms with `-` `/` `.`
//! separators, and CJK forms like `2024年4月1日` or just `4月1号`. Rather
//! than a general date-language parser, this module runs a fixed, ordered
//! cascade of explicit templates, so the failure mode is a clean
//! [`DateError::UnrecognizedFormat`] instead of a silent misparse.

use crate::consts::{
    CANONICAL_LEN, DAY_MARKER, DAY_MARKER_COLLOQUIAL, MONTH_MARKER, NUMERIC_SEPARATORS, YEAR_MARKER,
};
use crate::{CalendarDate, DateError, RelativePeriod};

/// Normalizes a human-entered date token to the canonical 8-digit string.
///
/// Rules, in order:
/// 1. A token that is already 8 ASCII digits passes through unchanged.
///    No calendar check happens here; [`is_valid`] is the separate gate.
/// 2. A relative-period name (case-insensitive) collapses to the **start**
///    of its range, so multi-day periods fit single-date fields.
/// 3. Anything else goes through the free-form template cascade, with the
///    current year and day 1 filled in for month-day-only and
///    year-month-only tokens.
///
/// `now` is an explicit parameter so a caller can resolve several tokens
/// against one consistent snapshot of the current day.
///
/// # Errors
/// `EmptyInput` for a blank token, `UnrecognizedFormat` when every
/// template fails; the error carries the trimmed original token.
pub fn normalize(token: &str, now: CalendarDate) -> Result<String, DateError> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Err(DateError::EmptyInput);
    }

    if is_canonical_shape(trimmed) {
        return Ok(trimmed.to_owned());
    }

    if let Ok(period) = trimmed.parse::<RelativePeriod>() {
        return Ok(period.resolve(now)?.start().to_string());
    }

    let completed = complete_token(trimmed, now);
    parse_templates(&completed)
        .map(|date| date.to_string())
        .ok_or_else(|| DateError::UnrecognizedFormat(trimmed.to_owned()))
}

/// Whether a canonical 8-digit string names a real Gregorian calendar day.
///
/// This is the final gate after normalization: rule 1 of [`normalize`]
/// passes 8-digit tokens through unchecked, so `20250231` normalizes to
/// itself but fails here.
pub fn is_valid(date: &str) -> bool {
    date.parse::<CalendarDate>().is_ok()
}

/// Validates a canonical string into a typed date, the fallible view of
/// [`is_valid`].
///
/// # Errors
/// `InvalidCalendarDate` carrying the offending value.
pub fn validate(date: &str) -> Result<CalendarDate, DateError> {
    date.parse::<CalendarDate>()
}

fn is_canonical_shape(token: &str) -> bool {
    token.len() == CANONICAL_LEN && token.bytes().all(|b| b.is_ascii_digit())
}

/// Separator style of a free-form token. CJK wins over numeric separators,
/// mirroring the order the completion rules check markers in.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Style {
    Cjk,
    Numeric(char),
}

fn style_of(token: &str) -> Option<Style> {
    if token.contains(MONTH_MARKER) {
        return Some(Style::Cjk);
    }
    NUMERIC_SEPARATORS
        .into_iter()
        .find(|&sep| token.contains(sep))
        .map(Style::Numeric)
}

/// Fills in the pieces a partial token omits: the current year for
/// month-day and month-only tokens, day 1 for year-month tokens. The
/// inserted text follows the token's own separator style.
fn complete_token(token: &str, now: CalendarDate) -> String {
    let mut s = token.replace(DAY_MARKER_COLLOQUIAL, &DAY_MARKER.to_string());

    let Some(style) = style_of(&s) else {
        // No recognizable markers at all; let the cascade reject it.
        return s;
    };

    if !has_year(&s, style) {
        s = match style {
            Style::Cjk => format!("{}{YEAR_MARKER}{s}", now.year()),
            Style::Numeric(sep) => format!("{}{sep}{s}", now.year()),
        };
    }

    if !has_day(&s, style) {
        s = match style {
            Style::Cjk => format!("{s}01{DAY_MARKER}"),
            Style::Numeric(sep) => format!("{s}{sep}01"),
        };
    }

    s
}

fn has_year(token: &str, style: Style) -> bool {
    match style {
        Style::Cjk => token.contains(YEAR_MARKER),
        Style::Numeric(sep) => {
            // Two separators mean a full date; one means year-month only
            // when the leading field is a 4-digit year.
            match token.matches(sep).count() {
                0 => false,
                1 => token
                    .split(sep)
                    .next()
                    .is_some_and(|first| first.len() == 4 && first.bytes().all(|b| b.is_ascii_digit())),
                _ => true,
            }
        }
    }
}

fn has_day(token: &str, style: Style) -> bool {
    match style {
        Style::Cjk => token.contains(DAY_MARKER),
        Style::Numeric(sep) => token.matches(sep).count() >= 2,
    }
}

/// Tries each full-date template in order, returning the first success.
/// Every template must consume the token's entire length.
fn parse_templates(token: &str) -> Option<CalendarDate> {
    NUMERIC_SEPARATORS
        .into_iter()
        .find_map(|sep| parse_numeric(token, sep))
        .or_else(|| parse_cjk(token))
}

/// `YYYY{sep}MM{sep}DD`, with strptime-style lenient field widths
/// (1-4 digit year, 1-2 digit month and day).
fn parse_numeric(token: &str, sep: char) -> Option<CalendarDate> {
    let mut parts = token.split(sep);
    let year = parts.next()?;
    let month = parts.next()?;
    let day = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    date_from_fields(year, month, day)
}

/// `YYYY年MM月DD日` (号 has already been folded into 日).
fn parse_cjk(token: &str) -> Option<CalendarDate> {
    let rest = token.strip_suffix(DAY_MARKER)?;
    let (year, rest) = rest.split_once(YEAR_MARKER)?;
    let (month, day) = rest.split_once(MONTH_MARKER)?;
    date_from_fields(year, month, day)
}

fn date_from_fields(year: &str, month: &str, day: &str) -> Option<CalendarDate> {
    if year.is_empty() || year.len() > 4 || month.is_empty() || month.len() > 2 || day.is_empty() || day.len() > 2 {
        return None;
    }
    let year: u16 = year.parse().ok()?;
    let month: u8 = month.parse().ok()?;
    let day: u8 = day.parse().ok()?;
    CalendarDate::from_ymd(year, month, day).ok()
}
