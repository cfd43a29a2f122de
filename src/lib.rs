//! Fluent calendar arithmetic on top of `chrono`.
//!
//! A [`CalendarSpan`] keeps whole years and whole months apart from an exact
//! [`TimeDelta`], so "one month after January 31st" lands on the last day of
//! February instead of thirty days later. [`CalendarExt`] adds period
//! boundaries, month/year stepping, business days and rounding to
//! `NaiveDateTime`, `DateTime<Utc>` and `DateTime<FixedOffset>`.
//!
//! ```
//! use chrono::NaiveDate;
//! use fluent_calendar::{CalendarExt, CalendarUnits, ExactUnits};
//!
//! let jan_31 = NaiveDate::from_ymd_opt(2009, 1, 31)
//!     .and_then(|d| d.and_hms_opt(0, 0, 0))
//!     .ok_or("bad date")?;
//! let feb_28 = NaiveDate::from_ymd_opt(2009, 2, 28)
//!     .and_then(|d| d.and_hms_opt(0, 0, 0))
//!     .ok_or("bad date")?;
//! assert_eq!(jan_31.add_span(1.months()), feb_28);
//! assert_eq!((2.days() + 3.hours()).to_display_string(), "2 days and 3 hours");
//! # Ok::<(), &'static str>(())
//! ```

mod calendar;
mod clock;
mod config;
mod consts;
mod dates;
mod moment;
mod prelude;
mod round;
mod span;
mod types;
mod units;

pub use calendar::CalendarExt;
pub use chrono::{TimeDelta, Weekday};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::CalendarConfig;
pub use consts::*;
pub use dates::{DateAt, MonthDays};
pub use moment::Moment;
pub use round::DeltaExt;
pub use span::CalendarSpan;
pub use types::{Hour, Millisecond, Minute, RoundTo, Second, TimeField, TimeOfDay, days_in_month, is_leap_year};
pub use units::{
    CalendarUnits, ExactUnits, days, hours, milliseconds, minutes, months, quarters, seconds, ticks, weeks,
    years,
};

/// Error type for the few validating calendar operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// A time-of-day field is outside its nominal range.
    #[error("{field} {value} is out of range (must be 0-{max})")]
    FieldOutOfRange { field: TimeField, value: u32, max: u32 },

    /// The requested civil date does not exist.
    #[error("Invalid date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    /// A rounding precision name that is not one of second/minute/hour/day.
    #[error("Invalid rounding precision: {0}")]
    InvalidPrecision(String),

    /// A comparison received something that is neither a span nor a `TimeDelta`.
    #[error("Value must be a CalendarSpan or a TimeDelta")]
    InvalidComparison,
}
