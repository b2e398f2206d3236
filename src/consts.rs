/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for month starts
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Days in a week, for week-relative period arithmetic
pub(crate) const DAYS_PER_WEEK: i64 = 7;

/// Number of digits in a canonical `YYYYMMDD` date string
pub const CANONICAL_LEN: usize = 8;

/// Numeric date separators accepted by the free-form normalizer,
/// in the order templates are tried
pub const NUMERIC_SEPARATORS: [char; 3] = ['-', '/', '.'];

/// CJK marker following the year component (年, "year")
pub const YEAR_MARKER: char = '年';
/// CJK marker following the month component (月, "month")
pub const MONTH_MARKER: char = '月';
/// CJK marker following the day component (日, "day")
pub const DAY_MARKER: char = '日';
/// Colloquial CJK day marker (号), folded into [`DAY_MARKER`] before matching
pub const DAY_MARKER_COLLOQUIAL: char = '号';
