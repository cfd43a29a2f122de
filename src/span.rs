use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use chrono::{DateTime, TimeDelta, Utc};

use crate::clock::{Clock, SystemClock};
use crate::consts::{
    APPROX_DAYS_PER_MONTH, APPROX_DAYS_PER_YEAR, MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE,
    MILLIS_PER_SECOND, NANOS_PER_TICK,
};
use crate::round::{Components, DeltaExt, format_constant, total_seconds};
use crate::{CalendarError, CalendarExt, Moment};

/// An offset in time made of whole calendar years, whole calendar months and
/// an exact duration.
///
/// The three components are never normalized into each other: fourteen months
/// stay fourteen months. When applied to a point in time, months go first,
/// then years, then the exact part, each with true calendar semantics.
///
/// Equality is component-wise. Ordering compares the approximate projection
/// (see [`CalendarSpan::to_approximate_delta`]) and breaks ties component-wise,
/// so `a == b` exactly when `a.cmp(&b) == Ordering::Equal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarSpan {
    years:  i32,
    months: i32,
    exact:  TimeDelta,
}

impl Default for CalendarSpan {
    fn default() -> Self {
        Self::zero()
    }
}

impl CalendarSpan {
    pub const fn new(years: i32, months: i32, exact: TimeDelta) -> Self {
        Self { years, months, exact }
    }

    pub fn zero() -> Self {
        Self::new(0, 0, TimeDelta::zero())
    }

    pub fn from_years(years: i32) -> Self {
        Self::new(years, 0, TimeDelta::zero())
    }

    pub fn from_months(months: i32) -> Self {
        Self::new(0, months, TimeDelta::zero())
    }

    /// Lossless: the span carries `exact` and no calendar part.
    pub const fn from_exact(exact: TimeDelta) -> Self {
        Self::new(0, 0, exact)
    }

    /// Whole calendar years
    pub const fn years(&self) -> i32 {
        self.years
    }

    /// Whole calendar months, not folded into years
    pub const fn months(&self) -> i32 {
        self.months
    }

    /// The exact (fixed-length) part
    pub const fn exact(&self) -> TimeDelta {
        self.exact
    }

    /// True when every component is zero
    pub fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.exact.is_zero()
    }

    #[must_use]
    pub fn add_span(self, other: Self) -> Self {
        Self::new(self.years + other.years, self.months + other.months, self.exact + other.exact)
    }

    #[must_use]
    pub fn add_delta(self, delta: TimeDelta) -> Self {
        Self::new(self.years, self.months, self.exact + delta)
    }

    #[must_use]
    pub fn subtract_span(self, other: Self) -> Self {
        Self::new(self.years - other.years, self.months - other.months, self.exact - other.exact)
    }

    #[must_use]
    pub fn subtract_delta(self, delta: TimeDelta) -> Self {
        Self::new(self.years, self.months, self.exact - delta)
    }

    #[must_use]
    pub fn negate(self) -> Self {
        Self::new(-self.years, -self.months, -self.exact)
    }

    /// Projects the span onto a fixed length with 365-day years and 30-day
    /// months.
    ///
    /// Lossy. Fine for comparing or displaying spans, wrong for applying them
    /// to dates: use [`CalendarExt::add_span`] for that. Saturates at the
    /// bounds of `TimeDelta`.
    pub fn to_approximate_delta(&self) -> TimeDelta {
        let days = APPROX_DAYS_PER_YEAR * i64::from(self.years) + APPROX_DAYS_PER_MONTH * i64::from(self.months);
        let calendar = TimeDelta::try_days(days).unwrap_or(if days < 0 { TimeDelta::MIN } else { TimeDelta::MAX });
        self.exact.checked_add(&calendar).unwrap_or(if days < 0 { TimeDelta::MIN } else { TimeDelta::MAX })
    }

    /// Orders by the approximate projection alone.
    ///
    /// `1 year` and `12 months` differ under `==` and under [`Ord`], yet this
    /// comparison reports `Less` (365 vs 360 days); `12 months` and `360 days`
    /// compare `Equal` here.
    pub fn cmp_approximate(&self, other: &Self) -> Ordering {
        self.to_approximate_delta().cmp(&other.to_approximate_delta())
    }

    /// Compares against a value of unknown type.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidComparison` unless `other` is a
    /// `CalendarSpan` or a `TimeDelta`.
    pub fn compare_dyn(&self, other: &dyn Any) -> Result<Ordering, CalendarError> {
        if let Some(span) = other.downcast_ref::<Self>() {
            return Ok(self.cmp(span));
        }
        if let Some(delta) = other.downcast_ref::<TimeDelta>() {
            return Ok(self.cmp(&Self::from_exact(*delta)));
        }
        Err(CalendarError::InvalidComparison)
    }

    /// Projection length in 100 ns ticks, saturating
    pub fn ticks(&self) -> i64 {
        let delta = self.to_approximate_delta();
        delta.num_nanoseconds().map_or_else(
            || {
                let bound = if delta < TimeDelta::zero() { i64::MIN } else { i64::MAX };
                delta.num_microseconds().map_or(bound, |micros| micros.saturating_mul(10))
            },
            |nanos| nanos / NANOS_PER_TICK,
        )
    }

    /// Whole days of the projection
    pub fn days(&self) -> i64 {
        Components::of(self.to_approximate_delta()).days
    }

    /// Hour component (`-23..=23`) of the projection
    pub fn hours(&self) -> i64 {
        Components::of(self.to_approximate_delta()).hours
    }

    /// Minute component (`-59..=59`) of the projection
    pub fn minutes(&self) -> i64 {
        Components::of(self.to_approximate_delta()).minutes
    }

    /// Second component (`-59..=59`) of the projection
    pub fn seconds(&self) -> i64 {
        Components::of(self.to_approximate_delta()).seconds
    }

    /// Millisecond component (`-999..=999`) of the projection
    pub fn milliseconds(&self) -> i64 {
        Components::of(self.to_approximate_delta()).milliseconds
    }

    pub fn total_milliseconds(&self) -> f64 {
        total_seconds(self.to_approximate_delta()) * MILLIS_PER_SECOND
    }

    pub fn total_seconds(&self) -> f64 {
        total_seconds(self.to_approximate_delta())
    }

    pub fn total_minutes(&self) -> f64 {
        self.total_milliseconds() / MILLIS_PER_MINUTE
    }

    pub fn total_hours(&self) -> f64 {
        self.total_milliseconds() / MILLIS_PER_HOUR
    }

    pub fn total_days(&self) -> f64 {
        self.total_milliseconds() / MILLIS_PER_DAY
    }

    /// Human-readable rendering of the projection, see [`DeltaExt::to_display_string`].
    pub fn to_display_string(&self) -> String {
        self.to_approximate_delta().to_display_string()
    }

    /// `moment` moved forward by this span
    pub fn after<M: Moment>(self, moment: M) -> M {
        moment.add_span(self)
    }

    /// Same as [`CalendarSpan::after`]
    pub fn since<M: Moment>(self, moment: M) -> M {
        self.after(moment)
    }

    /// `moment` moved back by this span
    pub fn before<M: Moment>(self, moment: M) -> M {
        moment.subtract_span(self)
    }

    /// This span before the system clock's current instant
    pub fn ago(self) -> DateTime<Utc> {
        self.ago_on(&SystemClock)
    }

    /// This span after the system clock's current instant
    pub fn hence(self) -> DateTime<Utc> {
        self.hence_on(&SystemClock)
    }

    pub fn ago_on<C: Clock + ?Sized>(self, clock: &C) -> DateTime<Utc> {
        self.before(clock.now())
    }

    pub fn hence_on<C: Clock + ?Sized>(self, clock: &C) -> DateTime<Utc> {
        self.after(clock.now())
    }
}

impl From<TimeDelta> for CalendarSpan {
    fn from(exact: TimeDelta) -> Self {
        Self::from_exact(exact)
    }
}

impl Ord for CalendarSpan {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_approximate(other)
            .then_with(|| self.years.cmp(&other.years))
            .then_with(|| self.months.cmp(&other.months))
            .then_with(|| self.exact.cmp(&other.exact))
    }
}

impl PartialOrd for CalendarSpan {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq<TimeDelta> for CalendarSpan {
    fn eq(&self, other: &TimeDelta) -> bool {
        *self == Self::from_exact(*other)
    }
}

impl PartialEq<CalendarSpan> for TimeDelta {
    fn eq(&self, other: &CalendarSpan) -> bool {
        CalendarSpan::from_exact(*self) == *other
    }
}

impl PartialOrd<TimeDelta> for CalendarSpan {
    fn partial_cmp(&self, other: &TimeDelta) -> Option<Ordering> {
        Some(self.cmp(&Self::from_exact(*other)))
    }
}

impl PartialOrd<CalendarSpan> for TimeDelta {
    fn partial_cmp(&self, other: &CalendarSpan) -> Option<Ordering> {
        Some(CalendarSpan::from_exact(*self).cmp(other))
    }
}

impl Add for CalendarSpan {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.add_span(rhs)
    }
}

impl Add<TimeDelta> for CalendarSpan {
    type Output = Self;

    fn add(self, rhs: TimeDelta) -> Self::Output {
        self.add_delta(rhs)
    }
}

impl Add<CalendarSpan> for TimeDelta {
    type Output = CalendarSpan;

    fn add(self, rhs: CalendarSpan) -> Self::Output {
        rhs.add_delta(self)
    }
}

impl Sub for CalendarSpan {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.subtract_span(rhs)
    }
}

impl Sub<TimeDelta> for CalendarSpan {
    type Output = Self;

    fn sub(self, rhs: TimeDelta) -> Self::Output {
        self.subtract_delta(rhs)
    }
}

impl Sub<CalendarSpan> for TimeDelta {
    type Output = CalendarSpan;

    fn sub(self, rhs: CalendarSpan) -> Self::Output {
        CalendarSpan::from_exact(self).subtract_span(rhs)
    }
}

impl Neg for CalendarSpan {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl AddAssign for CalendarSpan {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.add_span(rhs);
    }
}

impl AddAssign<TimeDelta> for CalendarSpan {
    fn add_assign(&mut self, rhs: TimeDelta) {
        *self = self.add_delta(rhs);
    }
}

impl SubAssign for CalendarSpan {
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.subtract_span(rhs);
    }
}

impl SubAssign<TimeDelta> for CalendarSpan {
    fn sub_assign(&mut self, rhs: TimeDelta) {
        *self = self.subtract_delta(rhs);
    }
}

impl fmt::Display for CalendarSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_constant(self.to_approximate_delta()))
    }
}
