use std::ops::{Add, Sub};

use chrono::{DateTime, Datelike, FixedOffset, Months, NaiveDateTime, NaiveTime, TimeDelta, Utc, Weekday};
use tracing::trace;

use crate::clock::{Clock, SystemClock};
use crate::consts::{DAYS_PER_WEEK, MONTHS_PER_QUARTER, MONTHS_PER_YEAR, NOON_HOUR};
use crate::dates::civil_date;
use crate::round::DeltaExt;
use crate::{CalendarConfig, CalendarError, CalendarSpan, Moment, RoundTo, TimeOfDay, days_in_month};

/// Calendar arithmetic for every [`Moment`].
///
/// All operations work on the wall clock and hand back a value of the same
/// kind and offset as the receiver. Stepping operations follow chrono's
/// operators and panic only when the result leaves chrono's representable
/// range. The setters are the only validating operations.
pub trait CalendarExt: Moment {
    /// Applies `span`: whole months first, then whole years, then the exact part.
    ///
    /// Month and year steps clamp to the last day of a shorter target month,
    /// so January 31st plus one month is the last day of February.
    #[must_use]
    fn add_span(self, span: CalendarSpan) -> Self {
        let wall = shift_months(self.wall_clock(), i64::from(span.months()));
        let wall = shift_months(wall, i64::from(span.years()) * i64::from(MONTHS_PER_YEAR));
        self.with_wall_clock(wall + span.exact())
    }

    /// Applies the negation of `span`, see [`CalendarExt::add_span`].
    #[must_use]
    fn subtract_span(self, span: CalendarSpan) -> Self {
        self.add_span(-span)
    }

    #[must_use]
    fn increase_time(self, delta: TimeDelta) -> Self {
        self.with_wall_clock(self.wall_clock() + delta)
    }

    #[must_use]
    fn decrease_time(self, delta: TimeDelta) -> Self {
        self.with_wall_clock(self.wall_clock() - delta)
    }

    /// `00:00:00.000` of the same day
    #[must_use]
    fn beginning_of_day(self) -> Self {
        self.with_wall_clock(start_of_day(self.wall_clock()))
    }

    /// `23:59:59.999` of the same day
    #[must_use]
    fn end_of_day(self) -> Self {
        self.with_wall_clock(end_of_day(self.wall_clock()))
    }

    /// Start of the day shifted by `hours`.
    ///
    /// Called on UTC midnight with the target zone's offset, this yields that
    /// zone's local midnight as a UTC instant.
    #[must_use]
    fn beginning_of_day_with_offset(self, hours: i32) -> Self {
        self.beginning_of_day().increase_time(TimeDelta::hours(i64::from(hours)))
    }

    /// End of the day shifted by `hours`, see [`CalendarExt::beginning_of_day_with_offset`].
    #[must_use]
    fn end_of_day_with_offset(self, hours: i32) -> Self {
        self.end_of_day().increase_time(TimeDelta::hours(i64::from(hours)))
    }

    #[must_use]
    fn midnight(self) -> Self {
        self.beginning_of_day()
    }

    /// `12:00:00.000` of the same day
    #[must_use]
    fn noon(self) -> Self {
        let noon = start_of_day(self.wall_clock()) + TimeDelta::hours(i64::from(NOON_HOUR));
        self.with_wall_clock(noon)
    }

    /// First day of the week, time of day unchanged, with the default
    /// [`CalendarConfig`] (weeks start on Monday).
    #[must_use]
    fn first_day_of_week(self) -> Self {
        self.first_day_of_week_from(CalendarConfig::default().first_day_of_week)
    }

    /// First day of a week that starts on `first`, time of day unchanged.
    #[must_use]
    fn first_day_of_week_from(self, first: Weekday) -> Self {
        let wall = self.wall_clock();
        self.with_wall_clock(wall - TimeDelta::days(days_between(first, wall.weekday())))
    }

    /// Alias of [`CalendarExt::first_day_of_week`]
    #[must_use]
    fn start_of_week(self) -> Self {
        self.first_day_of_week()
    }

    /// Last day of the week, time of day unchanged (default week start).
    #[must_use]
    fn last_day_of_week(self) -> Self {
        self.last_day_of_week_from(CalendarConfig::default().first_day_of_week)
    }

    #[must_use]
    fn last_day_of_week_from(self, first: Weekday) -> Self {
        self.first_day_of_week_from(first)
            .increase_time(TimeDelta::days(DAYS_PER_WEEK - 1))
    }

    #[must_use]
    fn beginning_of_week(self) -> Self {
        self.first_day_of_week().beginning_of_day()
    }

    #[must_use]
    fn beginning_of_week_from(self, first: Weekday) -> Self {
        self.first_day_of_week_from(first).beginning_of_day()
    }

    #[must_use]
    fn beginning_of_week_with_offset(self, hours: i32) -> Self {
        self.first_day_of_week().beginning_of_day_with_offset(hours)
    }

    /// Start of a week beginning on `first`, shifted by `hours`.
    #[must_use]
    fn beginning_of_week_from_with_offset(self, first: Weekday, hours: i32) -> Self {
        self.first_day_of_week_from(first).beginning_of_day_with_offset(hours)
    }

    #[must_use]
    fn end_of_week(self) -> Self {
        self.last_day_of_week().end_of_day()
    }

    #[must_use]
    fn end_of_week_from(self, first: Weekday) -> Self {
        self.last_day_of_week_from(first).end_of_day()
    }

    #[must_use]
    fn end_of_week_with_offset(self, hours: i32) -> Self {
        self.last_day_of_week().end_of_day_with_offset(hours)
    }

    #[must_use]
    fn end_of_week_from_with_offset(self, first: Weekday, hours: i32) -> Self {
        self.last_day_of_week_from(first).end_of_day_with_offset(hours)
    }

    /// Day 1 of the month, time of day unchanged
    #[must_use]
    fn first_day_of_month(self) -> Self {
        self.with_wall_clock(first_of_month(self.wall_clock()))
    }

    /// Last day of the month, time of day unchanged
    #[must_use]
    fn last_day_of_month(self) -> Self {
        self.with_wall_clock(last_of_month(self.wall_clock()))
    }

    #[must_use]
    fn beginning_of_month(self) -> Self {
        self.first_day_of_month().beginning_of_day()
    }

    #[must_use]
    fn beginning_of_month_with_offset(self, hours: i32) -> Self {
        self.first_day_of_month().beginning_of_day_with_offset(hours)
    }

    #[must_use]
    fn end_of_month(self) -> Self {
        self.last_day_of_month().end_of_day()
    }

    #[must_use]
    fn end_of_month_with_offset(self, hours: i32) -> Self {
        self.last_day_of_month().end_of_day_with_offset(hours)
    }

    /// Quarter of the year, `1..=4`
    fn quarter_of_year(&self) -> u32 {
        self.wall_clock().month0() / MONTHS_PER_QUARTER.unsigned_abs() + 1
    }

    /// First day of the quarter, time of day unchanged
    #[must_use]
    fn first_day_of_quarter(self) -> Self {
        self.with_wall_clock(first_of_quarter(self.wall_clock()))
    }

    /// Last day of the quarter, time of day unchanged
    #[must_use]
    fn last_day_of_quarter(self) -> Self {
        let last_month = first_of_quarter(self.wall_clock()) + Months::new(MONTHS_PER_QUARTER.unsigned_abs() - 1);
        self.with_wall_clock(last_of_month(last_month))
    }

    #[must_use]
    fn beginning_of_quarter(self) -> Self {
        self.first_day_of_quarter().beginning_of_day()
    }

    #[must_use]
    fn beginning_of_quarter_with_offset(self, hours: i32) -> Self {
        self.first_day_of_quarter().beginning_of_day_with_offset(hours)
    }

    #[must_use]
    fn end_of_quarter(self) -> Self {
        self.last_day_of_quarter().end_of_day()
    }

    #[must_use]
    fn end_of_quarter_with_offset(self, hours: i32) -> Self {
        self.last_day_of_quarter().end_of_day_with_offset(hours)
    }

    /// January 1st, time of day unchanged
    #[must_use]
    fn first_day_of_year(self) -> Self {
        self.with_wall_clock(first_of_year(self.wall_clock()))
    }

    /// December 31st, time of day unchanged
    #[must_use]
    fn last_day_of_year(self) -> Self {
        let december = first_of_year(self.wall_clock()) + Months::new(MONTHS_PER_YEAR - 1);
        self.with_wall_clock(last_of_month(december))
    }

    #[must_use]
    fn beginning_of_year(self) -> Self {
        self.first_day_of_year().beginning_of_day()
    }

    #[must_use]
    fn beginning_of_year_with_offset(self, hours: i32) -> Self {
        self.first_day_of_year().beginning_of_day_with_offset(hours)
    }

    #[must_use]
    fn end_of_year(self) -> Self {
        self.last_day_of_year().end_of_day()
    }

    #[must_use]
    fn end_of_year_with_offset(self, hours: i32) -> Self {
        self.last_day_of_year().end_of_day_with_offset(hours)
    }

    /// Same month, day and time one year later.
    ///
    /// February 29th has no counterpart in a common year; the missing day
    /// carries into March, so Feb 29 2008 becomes Mar 1 2009.
    #[must_use]
    fn next_year(self) -> Self {
        self.with_wall_clock(step_years(self.wall_clock(), 1))
    }

    /// Same month, day and time one year earlier, carrying a missing
    /// February 29th into March like [`CalendarExt::next_year`].
    #[must_use]
    fn previous_year(self) -> Self {
        self.with_wall_clock(step_years(self.wall_clock(), -1))
    }

    /// Same day and time next month, clamped to the last day of a shorter
    /// month: Jan 31 becomes Feb 28 (or 29).
    #[must_use]
    fn next_month(self) -> Self {
        self.with_wall_clock(shift_months(self.wall_clock(), 1))
    }

    /// Same day and time last month, clamped like [`CalendarExt::next_month`].
    #[must_use]
    fn previous_month(self) -> Self {
        self.with_wall_clock(shift_months(self.wall_clock(), -1))
    }

    #[must_use]
    fn next_day(self) -> Self {
        self.increase_time(TimeDelta::days(1))
    }

    #[must_use]
    fn previous_day(self) -> Self {
        self.decrease_time(TimeDelta::days(1))
    }

    #[must_use]
    fn week_after(self) -> Self {
        self.increase_time(TimeDelta::days(DAYS_PER_WEEK))
    }

    #[must_use]
    fn week_earlier(self) -> Self {
        self.decrease_time(TimeDelta::days(DAYS_PER_WEEK))
    }

    /// The next `day` strictly after this one; a Saturday's next Saturday is
    /// a week later.
    #[must_use]
    fn next(self, day: Weekday) -> Self {
        let ahead = match days_between(self.wall_clock().weekday(), day) {
            0 => DAYS_PER_WEEK,
            ahead => ahead,
        };
        self.increase_time(TimeDelta::days(ahead))
    }

    /// The last `day` strictly before this one.
    #[must_use]
    fn previous(self, day: Weekday) -> Self {
        let behind = match days_between(day, self.wall_clock().weekday()) {
            0 => DAYS_PER_WEEK,
            behind => behind,
        };
        self.decrease_time(TimeDelta::days(behind))
    }

    /// Steps one day at a time in the direction of `days`, counting only
    /// landings on Monday through Friday, until `|days|` have been counted.
    #[must_use]
    fn add_business_days(self, days: i32) -> Self {
        self.with_wall_clock(step_business_days(self.wall_clock(), days >= 0, days.unsigned_abs()))
    }

    /// Mirror of [`CalendarExt::add_business_days`], exact for every `i32`
    /// including `i32::MIN`.
    #[must_use]
    fn subtract_business_days(self, days: i32) -> Self {
        self.with_wall_clock(step_business_days(self.wall_clock(), days <= 0, days.unsigned_abs()))
    }

    /// Replaces the whole time of day. Sub-millisecond precision is dropped.
    ///
    /// # Errors
    /// Returns `CalendarError::FieldOutOfRange` for an hour outside `0..=23`,
    /// a minute or second outside `0..=59` or a millisecond outside `0..=999`.
    fn set_time(self, hour: u32, minute: u32, second: u32, millisecond: u32) -> Result<Self, CalendarError> {
        let time = TimeOfDay::new(hour, minute, second, millisecond)?;
        Ok(self.with_wall_clock(start_of_day(self.wall_clock()) + time.since_midnight()))
    }

    /// Sets hour and minute, keeping second and millisecond.
    ///
    /// # Errors
    /// See [`CalendarExt::set_time`].
    fn at(self, hour: u32, minute: u32) -> Result<Self, CalendarError> {
        let current = self.time_of_day();
        self.set_time(hour, minute, current.second(), current.millisecond())
    }

    /// Sets hour, minute and second, keeping the millisecond.
    ///
    /// # Errors
    /// See [`CalendarExt::set_time`].
    fn at_hms(self, hour: u32, minute: u32, second: u32) -> Result<Self, CalendarError> {
        self.set_time(hour, minute, second, self.time_of_day().millisecond())
    }

    /// # Errors
    /// See [`CalendarExt::set_time`].
    fn at_hms_milli(self, hour: u32, minute: u32, second: u32, millisecond: u32) -> Result<Self, CalendarError> {
        self.set_time(hour, minute, second, millisecond)
    }

    /// # Errors
    /// Returns `CalendarError::FieldOutOfRange` for an hour outside `0..=23`.
    fn set_hour(self, hour: u32) -> Result<Self, CalendarError> {
        let current = self.time_of_day();
        self.set_time(hour, current.minute(), current.second(), current.millisecond())
    }

    /// # Errors
    /// Returns `CalendarError::FieldOutOfRange` for a minute outside `0..=59`.
    fn set_minute(self, minute: u32) -> Result<Self, CalendarError> {
        let current = self.time_of_day();
        self.set_time(current.hour(), minute, current.second(), current.millisecond())
    }

    /// # Errors
    /// Returns `CalendarError::FieldOutOfRange` for a second outside `0..=59`.
    fn set_second(self, second: u32) -> Result<Self, CalendarError> {
        let current = self.time_of_day();
        self.set_time(current.hour(), current.minute(), second, current.millisecond())
    }

    /// # Errors
    /// Returns `CalendarError::FieldOutOfRange` for a millisecond outside `0..=999`.
    fn set_millisecond(self, millisecond: u32) -> Result<Self, CalendarError> {
        let current = self.time_of_day();
        self.set_time(current.hour(), current.minute(), current.second(), millisecond)
    }

    /// Replaces the civil date, keeping the time of day.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDate` if the date does not exist.
    fn set_date(self, year: i32, month: u32, day: u32) -> Result<Self, CalendarError> {
        let date = civil_date(year, month, day)?;
        Ok(self.with_wall_clock(NaiveDateTime::new(date, self.wall_clock().time())))
    }

    /// # Errors
    /// Returns `CalendarError::InvalidDate` if the day does not exist in `year`
    /// (February 29th moved to a common year).
    fn set_year(self, year: i32) -> Result<Self, CalendarError> {
        let wall = self.wall_clock();
        self.set_date(year, wall.month(), wall.day())
    }

    /// # Errors
    /// Returns `CalendarError::InvalidDate` if the month is not `1..=12` or is
    /// too short for the current day.
    fn set_month(self, month: u32) -> Result<Self, CalendarError> {
        let wall = self.wall_clock();
        self.set_date(wall.year(), month, wall.day())
    }

    /// # Errors
    /// Returns `CalendarError::InvalidDate` if the month has no such day.
    fn set_day(self, day: u32) -> Result<Self, CalendarError> {
        let wall = self.wall_clock();
        self.set_date(wall.year(), wall.month(), day)
    }

    /// Wall-clock time of day at millisecond precision
    fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::from_naive(self.wall_clock().time())
    }

    /// Rounds the wall clock: 500 ms and up rounds the second up, 30 s the
    /// minute, 30 min the hour and noon the day.
    #[must_use]
    fn round(self, precision: RoundTo) -> Self {
        let wall = self.wall_clock();
        let midnight = start_of_day(wall);
        self.with_wall_clock(midnight + (wall - midnight).round_to(precision))
    }

    fn is_before(&self, other: Self) -> bool {
        *self < other
    }

    fn is_after(&self, other: Self) -> bool {
        *self > other
    }

    /// Later than the system clock's current instant.
    /// Naive values are read as UTC wall time.
    fn is_in_future(&self) -> bool {
        self.is_in_future_on(&SystemClock)
    }

    /// Earlier than the system clock's current instant.
    fn is_in_past(&self) -> bool {
        self.is_in_past_on(&SystemClock)
    }

    fn is_in_future_on<C: Clock + ?Sized>(&self, clock: &C) -> bool {
        *self > self.observe(clock.now())
    }

    fn is_in_past_on<C: Clock + ?Sized>(&self, clock: &C) -> bool {
        *self < self.observe(clock.now())
    }

    /// Same civil date on the wall clock
    fn same_day(&self, other: Self) -> bool {
        self.wall_clock().date() == other.wall_clock().date()
    }

    fn same_month(&self, other: Self) -> bool {
        let (this, that) = (self.wall_clock(), other.wall_clock());
        this.year() == that.year() && this.month() == that.month()
    }

    fn same_year(&self, other: Self) -> bool {
        self.wall_clock().year() == other.wall_clock().year()
    }
}

impl<M: Moment> CalendarExt for M {}

macro_rules! span_operators {
    ($($moment:ty),*) => {
        $(
            impl Add<CalendarSpan> for $moment {
                type Output = Self;

                fn add(self, span: CalendarSpan) -> Self::Output {
                    CalendarExt::add_span(self, span)
                }
            }

            impl Sub<CalendarSpan> for $moment {
                type Output = Self;

                fn sub(self, span: CalendarSpan) -> Self::Output {
                    CalendarExt::subtract_span(self, span)
                }
            }
        )*
    };
}

span_operators!(NaiveDateTime, DateTime<Utc>, DateTime<FixedOffset>);

// Wall-clock helpers

fn start_of_day(wall: NaiveDateTime) -> NaiveDateTime {
    NaiveDateTime::new(wall.date(), NaiveTime::MIN)
}

fn end_of_day(wall: NaiveDateTime) -> NaiveDateTime {
    start_of_day(wall) + TimeDelta::days(1) - TimeDelta::milliseconds(1)
}

fn first_of_month(wall: NaiveDateTime) -> NaiveDateTime {
    wall - TimeDelta::days(i64::from(wall.day0()))
}

fn last_of_month(wall: NaiveDateTime) -> NaiveDateTime {
    let length = days_in_month(wall.year(), wall.month());
    first_of_month(wall) + TimeDelta::days(i64::from(length - 1))
}

fn first_of_quarter(wall: NaiveDateTime) -> NaiveDateTime {
    first_of_month(wall) - Months::new(wall.month0() % MONTHS_PER_QUARTER.unsigned_abs())
}

fn first_of_year(wall: NaiveDateTime) -> NaiveDateTime {
    first_of_month(wall) - Months::new(wall.month0())
}

/// Month stepping that clamps the day to the target month's length
fn shift_months(wall: NaiveDateTime, months: i64) -> NaiveDateTime {
    let step = Months::new(u32::try_from(months.unsigned_abs()).unwrap_or(u32::MAX));
    if months < 0 { wall - step } else { wall + step }
}

/// Year stepping that carries days lost to clamping into the next month
fn step_years(wall: NaiveDateTime, years: i64) -> NaiveDateTime {
    let stepped = shift_months(wall, years * i64::from(MONTHS_PER_YEAR));
    stepped + TimeDelta::days(i64::from(wall.day()) - i64::from(stepped.day()))
}

/// Days from `from` forward to `to`, `0..=6`
fn days_between(from: Weekday, to: Weekday) -> i64 {
    (i64::from(to.num_days_from_monday()) - i64::from(from.num_days_from_monday())).rem_euclid(DAYS_PER_WEEK)
}

/// Moves `count` Monday-to-Friday landings forward or backward
fn step_business_days(mut wall: NaiveDateTime, forward: bool, count: u32) -> NaiveDateTime {
    let step = TimeDelta::days(if forward { 1 } else { -1 });
    let mut remaining = count;
    while remaining > 0 {
        wall += step;
        if is_business_day(wall.weekday()) {
            remaining -= 1;
        }
        trace!(date = %wall.date(), remaining, "business day step");
    }
    wall
}

const fn is_business_day(day: Weekday) -> bool {
    !matches!(day, Weekday::Sat | Weekday::Sun)
}
