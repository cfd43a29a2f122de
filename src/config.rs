use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Calendar conventions that vary between locales.
///
/// Weeks start on Monday unless configured otherwise. Applications that load
/// this from their own settings pass `first_day_of_week` to the `*_from` week
/// operations of [`crate::CalendarExt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub first_day_of_week: Weekday,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            first_day_of_week: Weekday::Mon,
        }
    }
}

impl CalendarConfig {
    #[must_use]
    pub const fn with_first_day_of_week(mut self, first_day_of_week: Weekday) -> Self {
        self.first_day_of_week = first_day_of_week;
        self
    }
}
