use std::str::FromStr;

use chrono::{NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use crate::CalendarError;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_HOUR, MAX_MILLISECOND, MAX_MINUTE, MAX_SECOND, NANOS_PER_MILLISECOND,
};
use crate::prelude::*;

/// Names a time-of-day field in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TimeField {
    #[display(fmt = "hour")]
    Hour,
    #[display(fmt = "minute")]
    Minute,
    #[display(fmt = "second")]
    Second,
    #[display(fmt = "millisecond")]
    Millisecond,
}

macro_rules! bounded_field {
    ($(#[$doc:meta])* $name:ident, $field:expr, $max:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
        pub struct $name(u32);

        impl $name {
            /// Creates a new value, validating it against the field's nominal range
            ///
            /// # Errors
            /// Returns `CalendarError::FieldOutOfRange` if the value exceeds the range.
            pub fn new(value: u32) -> Result<Self, CalendarError> {
                if value > $max {
                    tracing::debug!(field = %$field, value, max = $max, "rejected time-of-day field");
                    return Err(CalendarError::FieldOutOfRange {
                        field: $field,
                        value,
                        max: $max,
                    });
                }
                Ok(Self(value))
            }

            /// Returns the raw value
            #[inline]
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl TryFrom<u32> for $name {
            type Error = CalendarError;

            fn try_from(value: u32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for u32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

bounded_field!(
    /// An hour of the day in `0..=23`
    Hour,
    TimeField::Hour,
    MAX_HOUR
);
bounded_field!(
    /// A minute of the hour in `0..=59`
    Minute,
    TimeField::Minute,
    MAX_MINUTE
);
bounded_field!(
    /// A second of the minute in `0..=59`
    Second,
    TimeField::Second,
    MAX_SECOND
);
bounded_field!(
    /// A millisecond of the second in `0..=999`
    Millisecond,
    TimeField::Millisecond,
    MAX_MILLISECOND
);

/// A validated wall-clock time with millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:02}:{:02}:{:02}.{:03}", "hour.get()", "minute.get()", "second.get()", "millisecond.get()")]
pub struct TimeOfDay {
    hour:        Hour,
    minute:      Minute,
    second:      Second,
    millisecond: Millisecond,
}

impl TimeOfDay {
    /// Validates every field and bundles them.
    ///
    /// # Errors
    /// Returns `CalendarError::FieldOutOfRange` naming the first field outside its range.
    pub fn new(hour: u32, minute: u32, second: u32, millisecond: u32) -> Result<Self, CalendarError> {
        Ok(Self {
            hour:        Hour::new(hour)?,
            minute:      Minute::new(minute)?,
            second:      Second::new(second)?,
            millisecond: Millisecond::new(millisecond)?,
        })
    }

    /// Reads the fields of an existing time, dropping sub-millisecond precision.
    /// A leap-second reading is pinned to the last millisecond of the second.
    pub fn from_naive(time: NaiveTime) -> Self {
        Self {
            hour:        Hour(time.hour()),
            minute:      Minute(time.minute()),
            second:      Second(time.second()),
            millisecond: Millisecond(millisecond_of(time)),
        }
    }

    pub const fn hour(&self) -> u32 {
        self.hour.get()
    }

    pub const fn minute(&self) -> u32 {
        self.minute.get()
    }

    pub const fn second(&self) -> u32 {
        self.second.get()
    }

    pub const fn millisecond(&self) -> u32 {
        self.millisecond.get()
    }

    /// Offset of this time from midnight
    pub fn since_midnight(&self) -> TimeDelta {
        TimeDelta::hours(i64::from(self.hour()))
            + TimeDelta::minutes(i64::from(self.minute()))
            + TimeDelta::seconds(i64::from(self.second()))
            + TimeDelta::milliseconds(i64::from(self.millisecond()))
    }
}

/// Granularity for rounding points in time and durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RoundTo {
    #[display(fmt = "second")]
    Second,
    #[display(fmt = "minute")]
    Minute,
    #[display(fmt = "hour")]
    Hour,
    #[display(fmt = "day")]
    Day,
}

impl RoundTo {
    pub const ALL: [Self; 4] = [Self::Second, Self::Minute, Self::Hour, Self::Day];
}

impl FromStr for RoundTo {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|precision| precision.to_string().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CalendarError::InvalidPrecision(trimmed.to_owned()))
    }
}

impl TryFrom<String> for RoundTo {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RoundTo> for String {
    fn from(precision: RoundTo) -> Self {
        precision.to_string()
    }
}

// Helper functions

pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: i32, month: u32) -> u32 {
    debug_assert!(month != 0 && month <= 12);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

pub(crate) fn millisecond_of(time: NaiveTime) -> u32 {
    (time.nanosecond() / NANOS_PER_MILLISECOND.unsigned_abs()).min(MAX_MILLISECOND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hour_new_valid() {
        for h in 0..=23 {
            assert!(Hour::new(h).is_ok(), "Hour {h} should be valid");
        }
    }

    #[test]
    fn test_hour_new_invalid() {
        let result = Hour::new(24);
        assert!(matches!(
            result,
            Err(CalendarError::FieldOutOfRange {
                field: TimeField::Hour,
                value: 24,
                max: 23
            })
        ));
    }

    #[test]
    fn test_minute_second_millisecond_bounds() {
        struct TestCase {
            field:    TimeField,
            accepted: u32,
            rejected: u32,
        }

        let cases = [
            TestCase {
                field:    TimeField::Minute,
                accepted: 59,
                rejected: 60,
            },
            TestCase {
                field:    TimeField::Second,
                accepted: 59,
                rejected: 60,
            },
            TestCase {
                field:    TimeField::Millisecond,
                accepted: 999,
                rejected: 1000,
            },
        ];

        for case in &cases {
            let (ok, err) = match case.field {
                TimeField::Minute => (Minute::new(case.accepted).is_ok(), Minute::new(case.rejected).err()),
                TimeField::Second => (Second::new(case.accepted).is_ok(), Second::new(case.rejected).err()),
                TimeField::Millisecond => (
                    Millisecond::new(case.accepted).is_ok(),
                    Millisecond::new(case.rejected).err(),
                ),
                TimeField::Hour => unreachable!("hour is covered separately"),
            };
            assert!(ok, "{} {} should be accepted", case.field, case.accepted);
            assert!(
                matches!(err, Some(CalendarError::FieldOutOfRange { field, value, .. }) if field == case.field && value == case.rejected),
                "{} {} should be rejected",
                case.field,
                case.rejected
            );
        }
    }

    #[test]
    fn test_field_try_from_and_into() {
        let minute: Minute = 42.try_into().expect("42 is a valid minute");
        assert_eq!(minute.get(), 42);
        let raw: u32 = minute.into();
        assert_eq!(raw, 42);

        let result: Result<Second, _> = 61.try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_field_display() {
        let hour = Hour::new(7).expect("7 is a valid hour");
        assert_eq!(hour.to_string(), "7");
        assert_eq!(TimeField::Millisecond.to_string(), "millisecond");
    }

    #[test]
    fn test_time_of_day_reports_first_bad_field() {
        let result = TimeOfDay::new(23, 60, 61, 1000);
        assert!(matches!(
            result,
            Err(CalendarError::FieldOutOfRange {
                field: TimeField::Minute,
                value: 60,
                ..
            })
        ));
    }

    #[test]
    fn test_time_of_day_since_midnight_and_display() {
        let time = TimeOfDay::new(6, 40, 20, 5).expect("valid time of day");
        assert_eq!(
            time.since_midnight(),
            TimeDelta::hours(6) + TimeDelta::minutes(40) + TimeDelta::seconds(20) + TimeDelta::milliseconds(5)
        );
        assert_eq!(time.to_string(), "06:40:20.005");
    }

    #[test]
    fn test_time_of_day_from_naive_drops_sub_millisecond() {
        let naive = NaiveTime::from_hms_nano_opt(1, 2, 3, 4_567_890).expect("valid naive time");
        let time = TimeOfDay::from_naive(naive);
        assert_eq!(
            (time.hour(), time.minute(), time.second(), time.millisecond()),
            (1, 2, 3, 4)
        );
    }

    #[test]
    fn test_round_to_parse() {
        assert_eq!("second".parse::<RoundTo>(), Ok(RoundTo::Second));
        assert_eq!(" Minute ".parse::<RoundTo>(), Ok(RoundTo::Minute));
        assert_eq!("HOUR".parse::<RoundTo>(), Ok(RoundTo::Hour));
        assert_eq!("day".parse::<RoundTo>(), Ok(RoundTo::Day));
        assert_eq!(
            "fortnight".parse::<RoundTo>(),
            Err(CalendarError::InvalidPrecision("fortnight".to_owned()))
        );
    }

    #[test]
    fn test_round_to_serde() {
        let json = serde_json::to_string(&RoundTo::Hour).expect("failed to serialize precision");
        assert_eq!(json, r#""hour""#);

        let parsed: RoundTo = serde_json::from_str(&json).expect("failed to deserialize precision");
        assert_eq!(parsed, RoundTo::Hour);

        let result: Result<RoundTo, _> = serde_json::from_str(r#""week""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year:        i32,
            is_leap:     bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year:        2008,
                is_leap:     true,
                description: "divisible by 4",
            },
            TestCase {
                year:        2009,
                is_leap:     false,
                description: "not divisible by 4",
            },
            TestCase {
                year:        1900,
                is_leap:     false,
                description: "century not divisible by 400",
            },
            TestCase {
                year:        2000,
                is_leap:     true,
                description: "divisible by 400",
            },
            TestCase {
                year:        -4,
                is_leap:     true,
                description: "proleptic year before the common era",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({}): expected {}",
                case.year,
                case.description,
                if case.is_leap { "leap year" } else { "not leap year" }
            );
        }
    }

    #[test]
    fn test_days_in_month() {
        let expected = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for month in 1..=12 {
            assert_eq!(
                days_in_month(2009, month),
                expected[month as usize],
                "Month {month} has incorrect day count"
            );
        }
        assert_eq!(days_in_month(1976, 2), 29);
        assert_eq!(days_in_month(2100, 2), 28, "Century year not divisible by 400");
    }
}
