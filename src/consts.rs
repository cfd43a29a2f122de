/// Days per year used by the approximate span projection
pub const APPROX_DAYS_PER_YEAR: i64 = 365;

/// Days per month used by the approximate span projection
pub const APPROX_DAYS_PER_MONTH: i64 = 30;

/// Months in one quarter
pub const MONTHS_PER_QUARTER: i32 = 3;

/// Months in one year
pub const MONTHS_PER_YEAR: u32 = 12;

/// Days in one week
pub const DAYS_PER_WEEK: i64 = 7;

/// Last valid hour of a day
pub const MAX_HOUR: u32 = 23;
/// Last valid minute of an hour
pub const MAX_MINUTE: u32 = 59;
/// Last valid second of a minute
pub const MAX_SECOND: u32 = 59;
/// Last valid millisecond of a second
pub const MAX_MILLISECOND: u32 = 999;

/// Hour used by `noon`
pub const NOON_HOUR: u32 = 12;

/// Milliseconds at which rounding to the second goes up
pub const ROUND_UP_MILLISECONDS: i64 = 500;
/// Seconds at which rounding to the minute goes up
pub const ROUND_UP_SECONDS: i64 = 30;
/// Minutes at which rounding to the hour goes up
pub const ROUND_UP_MINUTES: i64 = 30;
/// Hours at which rounding to the day goes up
pub const ROUND_UP_HOURS: i64 = 12;

/// Nanoseconds in one tick (the 100 ns unit of legacy duration APIs)
pub const NANOS_PER_TICK: i64 = 100;
/// Ticks in one microsecond
pub const TICKS_PER_MICROSECOND: i64 = 10;

pub(crate) const NANOS_PER_MILLISECOND: i32 = 1_000_000;
pub(crate) const MILLIS_PER_SECOND: f64 = 1_000.0;
pub(crate) const MILLIS_PER_MINUTE: f64 = 60_000.0;
pub(crate) const MILLIS_PER_HOUR: f64 = 3_600_000.0;
pub(crate) const MILLIS_PER_DAY: f64 = 86_400_000.0;
pub(crate) const SECONDS_PER_MINUTE: i64 = 60;
pub(crate) const MINUTES_PER_HOUR: i64 = 60;
pub(crate) const HOURS_PER_DAY: i64 = 24;
pub(crate) const SECONDS_PER_HOUR: i64 = 3_600;
pub(crate) const SECONDS_PER_DAY: i64 = 86_400;

/// Month number for February
pub const FEBRUARY: u32 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u32 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u32; 13] = [
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
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;
