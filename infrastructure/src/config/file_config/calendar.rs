//! Calendar configuration from TOML (`[calendar]` section)

use chrono::Weekday;
use roster_domain::TeamCalendar;
use serde::{Deserialize, Serialize};

/// Largest offset accepted, in minutes (±18h).
pub const MAX_UTC_OFFSET_MINUTES: i32 = 18 * 60;

/// Raw calendar configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCalendarConfig {
    /// Team's offset from UTC in minutes (e.g. 60 for UTC+1)
    pub utc_offset_minutes: i32,
    /// First day of the week ("monday", "sunday", ...)
    pub week_start: String,
}

impl Default for FileCalendarConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            week_start: "monday".to_string(),
        }
    }
}

impl FileCalendarConfig {
    /// Full or three-letter day name, any case.
    pub fn parse_week_start(&self) -> Option<Weekday> {
        self.week_start.trim().parse().ok()
    }

    /// Whether the offset lies within +/-18 hours.
    pub fn offset_in_range(&self) -> bool {
        self.utc_offset_minutes.unsigned_abs() <= MAX_UTC_OFFSET_MINUTES as u32
    }

    /// `None` when the offset or week start is invalid; `validate` says which.
    pub fn to_calendar(&self) -> Option<TeamCalendar> {
        if !self.offset_in_range() {
            return None;
        }
        let week_start = self.parse_week_start()?;
        TeamCalendar::from_offset_minutes(self.utc_offset_minutes, week_start)
    }
}
