//! Team calendar: maps absolute timestamps onto the team's calendar days.

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc, Weekday,
};

/// Local calendar used for day grouping and date moves.
///
/// Sessions are stored as absolute UTC timestamps; "which day is this on"
/// depends on where the team trains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamCalendar {
    offset: FixedOffset,
    week_start: Weekday,
}

impl Default for TeamCalendar {
    fn default() -> Self {
        Self {
            offset: Utc.fix(),
            week_start: Weekday::Mon,
        }
    }
}

impl TeamCalendar {
    pub fn new(offset: FixedOffset, week_start: Weekday) -> Self {
        Self { offset, week_start }
    }

    /// Build from an offset in minutes east of UTC.
    ///
    /// Returns `None` outside the ±24h range chrono accepts.
    pub fn from_offset_minutes(minutes: i32, week_start: Weekday) -> Option<Self> {
        let offset = FixedOffset::east_opt(minutes.checked_mul(60)?)?;
        Some(Self::new(offset, week_start))
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Calendar day the timestamp falls on.
    pub fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.offset).date_naive()
    }

    /// Local wall-clock time of the timestamp.
    pub fn local_time(&self, at: DateTime<Utc>) -> NaiveTime {
        at.with_timezone(&self.offset).time()
    }

    /// Absolute timestamp of a local date and time.
    pub fn at(&self, date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
        // A fixed offset has no gaps or folds, so the mapping is always single.
        self.offset
            .from_local_datetime(&date.and_time(time))
            .single()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&date.and_time(time)))
    }

    /// First day of the week containing `date`.
    pub fn start_of_week(&self, date: NaiveDate) -> NaiveDate {
        date.week(self.week_start).first_day()
    }

    /// Number of blank cells before a day in a week-aligned grid.
    pub fn leading_blanks(&self, date: NaiveDate) -> u32 {
        let day = date.weekday().num_days_from_monday();
        let start = self.week_start.num_days_from_monday();
        (day + 7 - start) % 7
    }
}
