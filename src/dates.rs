use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tracing::debug;

use crate::moment::at_fixed_offset;
use crate::{CalendarError, TimeOfDay};

/// Builds dates from a year: `2011.january(24)`.
///
/// # Errors
/// Every method returns `CalendarError::InvalidDate` when the month has no
/// such day, e.g. `2009.february(29)`.
pub trait MonthDays: Sized {
    /// `day` of `month` (`1..=12`) in this year
    fn month_day(self, month: u32, day: u32) -> Result<NaiveDate, CalendarError>;

    fn january(self, day: u32) -> Result<NaiveDate, CalendarError> {
        self.month_day(1, day)
    }

    fn february(self, day: u32) -> Result<NaiveDate, CalendarError> {
        self.month_day(2, day)
    }

    fn march(self, day: u32) -> Result<NaiveDate, CalendarError> {
        self.month_day(3, day)
    }

    fn april(self, day: u32) -> Result<NaiveDate, CalendarError> {
        self.month_day(4, day)
    }

    fn may(self, day: u32) -> Result<NaiveDate, CalendarError> {
        self.month_day(5, day)
    }

    fn june(self, day: u32) -> Result<NaiveDate, CalendarError> {
        self.month_day(6, day)
    }

    fn july(self, day: u32) -> Result<NaiveDate, CalendarError> {
        self.month_day(7, day)
    }

    fn august(self, day: u32) -> Result<NaiveDate, CalendarError> {
        self.month_day(8, day)
    }

    fn september(self, day: u32) -> Result<NaiveDate, CalendarError> {
        self.month_day(9, day)
    }

    fn october(self, day: u32) -> Result<NaiveDate, CalendarError> {
        self.month_day(10, day)
    }

    fn november(self, day: u32) -> Result<NaiveDate, CalendarError> {
        self.month_day(11, day)
    }

    fn december(self, day: u32) -> Result<NaiveDate, CalendarError> {
        self.month_day(12, day)
    }
}

impl MonthDays for i32 {
    fn month_day(self, month: u32, day: u32) -> Result<NaiveDate, CalendarError> {
        civil_date(self, month, day)
    }
}

/// Attaches a validated time of day to a civil date.
///
/// # Errors
/// Every method returns `CalendarError::FieldOutOfRange` for an hour outside
/// `0..=23`, a minute or second outside `0..=59` or a millisecond outside
/// `0..=999`.
pub trait DateAt {
    fn at_time(self, hour: u32, minute: u32, second: u32, millisecond: u32) -> Result<NaiveDateTime, CalendarError>;

    fn at_time_utc(self, hour: u32, minute: u32, second: u32, millisecond: u32) -> Result<DateTime<Utc>, CalendarError>;

    /// The instant at which the wall clock at `offset` shows the given time
    fn at_time_offset(
        self,
        offset: FixedOffset,
        hour: u32,
        minute: u32,
        second: u32,
        millisecond: u32,
    ) -> Result<DateTime<FixedOffset>, CalendarError>;
}

impl DateAt for NaiveDate {
    fn at_time(self, hour: u32, minute: u32, second: u32, millisecond: u32) -> Result<NaiveDateTime, CalendarError> {
        let time = TimeOfDay::new(hour, minute, second, millisecond)?;
        Ok(NaiveDateTime::new(self, NaiveTime::MIN) + time.since_midnight())
    }

    fn at_time_utc(self, hour: u32, minute: u32, second: u32, millisecond: u32) -> Result<DateTime<Utc>, CalendarError> {
        Ok(self.at_time(hour, minute, second, millisecond)?.and_utc())
    }

    fn at_time_offset(
        self,
        offset: FixedOffset,
        hour: u32,
        minute: u32,
        second: u32,
        millisecond: u32,
    ) -> Result<DateTime<FixedOffset>, CalendarError> {
        let wall = self.at_time(hour, minute, second, millisecond)?;
        Ok(at_fixed_offset(wall, offset))
    }
}

pub(crate) fn civil_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, CalendarError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        debug!(year, month, day, "rejected civil date");
        CalendarError::InvalidDate { year, month, day }
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Weekday};

    use super::*;
    use crate::test_utils::{naive, naive_day, utc};
    use crate::{CalendarExt, Moment, TimeField};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        naive_day(year, month, day).date()
    }

    #[test]
    fn test_month_builders() {
        struct TestCase {
            built:    Result<NaiveDate, CalendarError>,
            expected: NaiveDate,
        }

        let cases = [
            TestCase {
                built:    2011.january(24),
                expected: date(2011, 1, 24),
            },
            TestCase {
                built:    2008.february(29),
                expected: date(2008, 2, 29),
            },
            TestCase {
                built:    2002.march(22),
                expected: date(2002, 3, 22),
            },
            TestCase {
                built:    1976.april(30),
                expected: date(1976, 4, 30),
            },
            TestCase {
                built:    2010.may(1),
                expected: date(2010, 5, 1),
            },
            TestCase {
                built:    2010.june(30),
                expected: date(2010, 6, 30),
            },
            TestCase {
                built:    2009.july(9),
                expected: date(2009, 7, 9),
            },
            TestCase {
                built:    2010.august(31),
                expected: date(2010, 8, 31),
            },
            TestCase {
                built:    2010.september(15),
                expected: date(2010, 9, 15),
            },
            TestCase {
                built:    2008.october(25),
                expected: date(2008, 10, 25),
            },
            TestCase {
                built:    2002.november(22),
                expected: date(2002, 11, 22),
            },
            TestCase {
                built:    2011.december(24),
                expected: date(2011, 12, 24),
            },
        ];

        for case in &cases {
            assert_eq!(case.built, Ok(case.expected), "building {}", case.expected);
        }
    }

    #[test]
    fn test_month_builders_reject_missing_days() {
        assert_eq!(
            2009.february(29),
            Err(CalendarError::InvalidDate {
                year:  2009,
                month: 2,
                day:   29,
            })
        );
        assert!(2010.april(31).is_err());
        assert!(2010.january(0).is_err());
        assert!(2010.month_day(13, 1).is_err());
    }

    #[test]
    fn test_at_time() {
        let Ok(monday) = 2011.january(24) else {
            panic!("valid date rejected");
        };
        assert_eq!(monday.weekday(), Weekday::Mon);
        assert_eq!(monday.at_time(6, 40, 20, 5), Ok(naive(2011, 1, 24, 6, 40, 20, 5)));
        assert_eq!(monday.at_time_utc(23, 59, 59, 999), Ok(utc(2011, 1, 24, 23, 59, 59, 999)));
        assert!(matches!(
            monday.at_time(12, 0, 0, 1000),
            Err(CalendarError::FieldOutOfRange {
                field: TimeField::Millisecond,
                ..
            })
        ));
    }

    #[test]
    fn test_at_time_offset() {
        let Some(zone) = FixedOffset::west_opt(5 * 3_600) else {
            panic!("valid offset rejected");
        };
        let Ok(local) = date(2009, 7, 9).at_time_offset(zone, 22, 30, 0, 0) else {
            panic!("valid time rejected");
        };
        assert_eq!(local.wall_clock(), naive(2009, 7, 9, 22, 30, 0, 0));
        assert_eq!(local.naive_utc(), naive(2009, 7, 10, 3, 30, 0, 0));
        assert_eq!(local.offset(), &zone);
    }

    #[test]
    fn test_builders_chain_into_calendar_arithmetic() {
        let Ok(start) = 2009.july(9).and_then(|day| day.at_time(0, 0, 0, 0)) else {
            panic!("valid timestamp rejected");
        };
        assert_eq!(start.add_business_days(2), naive_day(2009, 7, 13));
    }
}
