use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta, Utc};

/// A point in time whose wall-clock fields can be read and replaced without
/// changing its kind or UTC offset.
///
/// Implemented for the naive (unspecified kind), UTC and fixed-offset flavours
/// of `chrono` timestamps. For all three, shifting the wall clock by an exact
/// `TimeDelta` shifts the instant by the same amount, so calendar arithmetic
/// can be written once against the wall clock.
pub trait Moment: Copy + Ord {
    /// The local wall-clock reading (for UTC values, the UTC reading).
    fn wall_clock(&self) -> NaiveDateTime;

    /// A value of the same kind and offset whose wall clock reads `wall`.
    fn with_wall_clock(&self, wall: NaiveDateTime) -> Self;

    /// `instant` expressed in this value's kind and offset.
    /// Naive values take the UTC wall-clock reading.
    fn observe(&self, instant: DateTime<Utc>) -> Self;
}

impl Moment for NaiveDateTime {
    fn wall_clock(&self) -> NaiveDateTime {
        *self
    }

    fn with_wall_clock(&self, wall: NaiveDateTime) -> Self {
        wall
    }

    fn observe(&self, instant: DateTime<Utc>) -> Self {
        instant.naive_utc()
    }
}

impl Moment for DateTime<Utc> {
    fn wall_clock(&self) -> NaiveDateTime {
        self.naive_utc()
    }

    fn with_wall_clock(&self, wall: NaiveDateTime) -> Self {
        wall.and_utc()
    }

    fn observe(&self, instant: DateTime<Utc>) -> Self {
        instant
    }
}

impl Moment for DateTime<FixedOffset> {
    fn wall_clock(&self) -> NaiveDateTime {
        self.naive_local()
    }

    fn with_wall_clock(&self, wall: NaiveDateTime) -> Self {
        at_fixed_offset(wall, *self.offset())
    }

    fn observe(&self, instant: DateTime<Utc>) -> Self {
        instant.with_timezone(self.offset())
    }
}

/// The instant whose wall clock at `offset` reads `wall`
pub(crate) fn at_fixed_offset(wall: NaiveDateTime, offset: FixedOffset) -> DateTime<FixedOffset> {
    let utc = wall - TimeDelta::seconds(i64::from(offset.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{at_offset, naive, utc};

    #[test]
    fn test_naive_wall_clock_is_identity() {
        let wall = naive(2011, 12, 24, 6, 40, 20, 5);
        assert_eq!(wall.wall_clock(), wall);
        let other = naive(2001, 1, 1, 0, 0, 0, 0);
        assert_eq!(wall.with_wall_clock(other), other);
    }

    #[test]
    fn test_utc_wall_clock_round_trip() {
        let instant = utc(2015, 1, 1, 0, 0, 0, 0);
        assert_eq!(instant.wall_clock(), naive(2015, 1, 1, 0, 0, 0, 0));
        assert_eq!(instant.with_wall_clock(instant.wall_clock()), instant);
    }

    #[test]
    fn test_fixed_offset_keeps_offset() {
        let value = at_offset(-5, naive(2009, 7, 9, 22, 30, 0, 0));
        assert_eq!(value.wall_clock(), naive(2009, 7, 9, 22, 30, 0, 0));

        let moved = value.with_wall_clock(naive(2009, 7, 10, 1, 0, 0, 0));
        assert_eq!(moved.offset(), value.offset(), "offset must survive a wall-clock change");
        assert_eq!(moved.wall_clock(), naive(2009, 7, 10, 1, 0, 0, 0));
        assert_eq!(moved.naive_utc(), naive(2009, 7, 10, 6, 0, 0, 0));
    }

    #[test]
    fn test_observe_converts_into_receiver_offset() {
        let instant = utc(2015, 1, 1, 12, 0, 0, 0);

        let fixed = at_offset(3, naive(2000, 1, 1, 0, 0, 0, 0)).observe(instant);
        assert_eq!(fixed.wall_clock(), naive(2015, 1, 1, 15, 0, 0, 0));
        assert_eq!(fixed, instant);

        let wall = naive(2000, 1, 1, 0, 0, 0, 0).observe(instant);
        assert_eq!(wall, naive(2015, 1, 1, 12, 0, 0, 0));
    }
}
