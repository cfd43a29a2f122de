use chrono::TimeDelta;

use crate::CalendarSpan;
use crate::consts::{
    DAYS_PER_WEEK, MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND, MONTHS_PER_QUARTER,
    NANOS_PER_TICK, TICKS_PER_MICROSECOND,
};

/// Calendar-relative spans from a whole count: `3.months()`, `2.quarters()`.
///
/// Quarters are stored as three months each, not as their own component.
pub trait CalendarUnits {
    fn years(self) -> CalendarSpan;
    fn quarters(self) -> CalendarSpan;
    fn months(self) -> CalendarSpan;
}

impl CalendarUnits for i32 {
    fn years(self) -> CalendarSpan {
        CalendarSpan::from_years(self)
    }

    fn quarters(self) -> CalendarSpan {
        CalendarSpan::from_months(self.saturating_mul(MONTHS_PER_QUARTER))
    }

    fn months(self) -> CalendarSpan {
        CalendarSpan::from_months(self)
    }
}

impl CalendarUnits for i64 {
    fn years(self) -> CalendarSpan {
        saturate(self).years()
    }

    fn quarters(self) -> CalendarSpan {
        saturate(self).quarters()
    }

    fn months(self) -> CalendarSpan {
        saturate(self).months()
    }
}

fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

/// Exact spans from a count: `5.days()`, `1.5.hours()`, `30.seconds()`.
///
/// A tick is 100 ns. Fractional counts round to the nearest millisecond,
/// except ticks, which round to the nearest tick.
pub trait ExactUnits {
    fn weeks(self) -> CalendarSpan;
    fn days(self) -> CalendarSpan;
    fn hours(self) -> CalendarSpan;
    fn minutes(self) -> CalendarSpan;
    fn seconds(self) -> CalendarSpan;
    fn milliseconds(self) -> CalendarSpan;
    fn ticks(self) -> CalendarSpan;
}

fn ticks_delta(ticks: i64) -> TimeDelta {
    TimeDelta::microseconds(ticks / TICKS_PER_MICROSECOND)
        + TimeDelta::nanoseconds((ticks % TICKS_PER_MICROSECOND) * NANOS_PER_TICK)
}

impl ExactUnits for i64 {
    fn weeks(self) -> CalendarSpan {
        CalendarSpan::from_exact(TimeDelta::days(self * DAYS_PER_WEEK))
    }

    fn days(self) -> CalendarSpan {
        CalendarSpan::from_exact(TimeDelta::days(self))
    }

    fn hours(self) -> CalendarSpan {
        CalendarSpan::from_exact(TimeDelta::hours(self))
    }

    fn minutes(self) -> CalendarSpan {
        CalendarSpan::from_exact(TimeDelta::minutes(self))
    }

    fn seconds(self) -> CalendarSpan {
        CalendarSpan::from_exact(TimeDelta::seconds(self))
    }

    fn milliseconds(self) -> CalendarSpan {
        CalendarSpan::from_exact(TimeDelta::milliseconds(self))
    }

    fn ticks(self) -> CalendarSpan {
        CalendarSpan::from_exact(ticks_delta(self))
    }
}

impl ExactUnits for i32 {
    fn weeks(self) -> CalendarSpan {
        i64::from(self).weeks()
    }

    fn days(self) -> CalendarSpan {
        i64::from(self).days()
    }

    fn hours(self) -> CalendarSpan {
        i64::from(self).hours()
    }

    fn minutes(self) -> CalendarSpan {
        i64::from(self).minutes()
    }

    fn seconds(self) -> CalendarSpan {
        i64::from(self).seconds()
    }

    fn milliseconds(self) -> CalendarSpan {
        i64::from(self).milliseconds()
    }

    fn ticks(self) -> CalendarSpan {
        i64::from(self).ticks()
    }
}

#[allow(clippy::cast_possible_truncation)]
fn rounded_millis(value: f64, millis_per_unit: f64) -> CalendarSpan {
    CalendarSpan::from_exact(TimeDelta::milliseconds((value * millis_per_unit).round() as i64))
}

impl ExactUnits for f64 {
    fn weeks(self) -> CalendarSpan {
        rounded_millis(self, MILLIS_PER_DAY * 7.0)
    }

    fn days(self) -> CalendarSpan {
        rounded_millis(self, MILLIS_PER_DAY)
    }

    fn hours(self) -> CalendarSpan {
        rounded_millis(self, MILLIS_PER_HOUR)
    }

    fn minutes(self) -> CalendarSpan {
        rounded_millis(self, MILLIS_PER_MINUTE)
    }

    fn seconds(self) -> CalendarSpan {
        rounded_millis(self, MILLIS_PER_SECOND)
    }

    fn milliseconds(self) -> CalendarSpan {
        rounded_millis(self, 1.0)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn ticks(self) -> CalendarSpan {
        CalendarSpan::from_exact(ticks_delta(self.round() as i64))
    }
}

pub fn years<N: CalendarUnits>(n: N) -> CalendarSpan {
    n.years()
}

pub fn quarters<N: CalendarUnits>(n: N) -> CalendarSpan {
    n.quarters()
}

pub fn months<N: CalendarUnits>(n: N) -> CalendarSpan {
    n.months()
}

pub fn weeks<N: ExactUnits>(n: N) -> CalendarSpan {
    n.weeks()
}

pub fn days<N: ExactUnits>(n: N) -> CalendarSpan {
    n.days()
}

pub fn hours<N: ExactUnits>(n: N) -> CalendarSpan {
    n.hours()
}

pub fn minutes<N: ExactUnits>(n: N) -> CalendarSpan {
    n.minutes()
}

pub fn seconds<N: ExactUnits>(n: N) -> CalendarSpan {
    n.seconds()
}

pub fn milliseconds<N: ExactUnits>(n: N) -> CalendarSpan {
    n.milliseconds()
}

pub fn ticks<N: ExactUnits>(n: N) -> CalendarSpan {
    n.ticks()
}
