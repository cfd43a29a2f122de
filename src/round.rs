use chrono::TimeDelta;

use crate::RoundTo;
use crate::consts::{
    HOURS_PER_DAY, MINUTES_PER_HOUR, NANOS_PER_MILLISECOND, NANOS_PER_TICK, ROUND_UP_HOURS, ROUND_UP_MILLISECONDS,
    ROUND_UP_MINUTES, ROUND_UP_SECONDS, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};

/// Rounding and human-readable rendering for exact durations.
pub trait DeltaExt {
    /// Rounds to the given precision.
    ///
    /// The next-finer component decides: 500 ms and up rounds the second up,
    /// 30 s the minute, 30 min the hour and 12 h the day. Anything below the
    /// threshold is truncated toward zero.
    #[must_use]
    fn round_to(self, precision: RoundTo) -> TimeDelta;

    /// Renders e.g. `"2 days and 3 hours"`, `"5 minutes and 2 seconds"` or
    /// `"9 milliseconds"`, choosing the template from the unrounded length.
    fn to_display_string(self) -> String;
}

impl DeltaExt for TimeDelta {
    fn round_to(self, precision: RoundTo) -> TimeDelta {
        let parts = Components::of(self);
        let total = self.num_seconds();
        match precision {
            RoundTo::Second => {
                bump(TimeDelta::seconds(total), parts.milliseconds >= ROUND_UP_MILLISECONDS, TimeDelta::seconds(1))
            },
            RoundTo::Minute => bump(
                TimeDelta::minutes(total / SECONDS_PER_MINUTE),
                parts.seconds >= ROUND_UP_SECONDS,
                TimeDelta::minutes(1),
            ),
            RoundTo::Hour => bump(
                TimeDelta::hours(total / SECONDS_PER_HOUR),
                parts.minutes >= ROUND_UP_MINUTES,
                TimeDelta::hours(1),
            ),
            RoundTo::Day => bump(
                TimeDelta::days(total / SECONDS_PER_DAY),
                parts.hours >= ROUND_UP_HOURS,
                TimeDelta::days(1),
            ),
        }
    }

    fn to_display_string(self) -> String {
        // Branches compare the unrounded value; rounding only feeds the numbers.
        if self > TimeDelta::days(1) {
            let rounded = Components::of(self.round_to(RoundTo::Hour));
            format!("{} days and {} hours", rounded.days, rounded.hours)
        } else if self > TimeDelta::hours(1) {
            let rounded = Components::of(self.round_to(RoundTo::Minute));
            format!("{} hours and {} minutes", rounded.hours, rounded.minutes)
        } else if self > TimeDelta::minutes(1) {
            let rounded = Components::of(self.round_to(RoundTo::Second));
            format!("{} minutes and {} seconds", rounded.minutes, rounded.seconds)
        } else if self > TimeDelta::seconds(1) {
            format!("{} seconds", total_seconds(self))
        } else {
            format!("{} milliseconds", Components::of(self).milliseconds)
        }
    }
}

/// Day/hour/minute/second/millisecond fields of a duration, each truncated
/// toward zero and carrying the duration's sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Components {
    pub days:         i64,
    pub hours:        i64,
    pub minutes:      i64,
    pub seconds:      i64,
    pub milliseconds: i64,
}

impl Components {
    pub fn of(delta: TimeDelta) -> Self {
        let total = delta.num_seconds();
        Self {
            days:         total / SECONDS_PER_DAY,
            hours:        (total / SECONDS_PER_HOUR) % HOURS_PER_DAY,
            minutes:      (total / SECONDS_PER_MINUTE) % MINUTES_PER_HOUR,
            seconds:      total % SECONDS_PER_MINUTE,
            milliseconds: i64::from(delta.subsec_nanos() / NANOS_PER_MILLISECOND),
        }
    }
}

fn bump(truncated: TimeDelta, round_up: bool, unit: TimeDelta) -> TimeDelta {
    if round_up { truncated + unit } else { truncated }
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn total_seconds(delta: TimeDelta) -> f64 {
    delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / 1e9
}

/// `[-][d.]hh:mm:ss[.fffffff]`, the fraction in 100 ns ticks.
pub(crate) fn format_constant(delta: TimeDelta) -> String {
    let sign = if delta < TimeDelta::zero() { "-" } else { "" };
    let magnitude = delta.abs();
    let parts = Components::of(magnitude);
    let ticks = i64::from(magnitude.subsec_nanos()) / NANOS_PER_TICK;

    let mut out = String::from(sign);
    if parts.days != 0 {
        out.push_str(&format!("{}.", parts.days));
    }
    out.push_str(&format!("{:02}:{:02}:{:02}", parts.hours, parts.minutes, parts.seconds));
    if ticks != 0 {
        out.push_str(&format!(".{ticks:07}"));
    }
    out
}
