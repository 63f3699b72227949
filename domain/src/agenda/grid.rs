//! Week, month and range projections of a team's sessions.

use super::bucket::{AgendaEntry, CalendarMonth, DayBucket};
use crate::focus::validate_focus;
use crate::schedule::calendar::TeamCalendar;
use crate::schedule::conflict::detect_all;
use crate::session::entities::TrainingSession;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

/// Groups sessions into calendar-day buckets.
///
/// Read-side only: the builder derives everything it shows from the
/// conflict detector, the focus validator and each session's status.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgendaGridBuilder {
    calendar: TeamCalendar,
}

impl AgendaGridBuilder {
    pub fn new(calendar: TeamCalendar) -> Self {
        Self { calendar }
    }

    pub fn calendar(&self) -> &TeamCalendar {
        &self.calendar
    }

    /// Seven buckets starting at `week_start`, whatever weekday it is.
    pub fn build_week_grid(
        &self,
        week_start: NaiveDate,
        sessions: &[TrainingSession],
    ) -> [DayBucket; 7] {
        let mut by_day = self.group_by_day(sessions);
        std::array::from_fn(|i| {
            let date = week_start + Duration::days(i as i64);
            self.bucket(date, &mut by_day)
        })
    }

    /// Month view padded to whole weeks; padding cells have no date.
    pub fn build_month_grid(
        &self,
        month: &CalendarMonth,
        sessions: &[TrainingSession],
    ) -> Vec<DayBucket> {
        let mut by_day = self.group_by_day(sessions);
        let leading = self.calendar.leading_blanks(month.first_day()) as usize;

        let mut grid: Vec<DayBucket> = std::iter::repeat_with(DayBucket::blank)
            .take(leading)
            .collect();
        grid.extend(month.days().map(|date| self.bucket(date, &mut by_day)));

        let trailing = (7 - grid.len() % 7) % 7;
        grid.extend(std::iter::repeat_with(DayBucket::blank).take(trailing));
        grid
    }

    /// Non-empty days in `from..=to`, for a list view.
    ///
    /// A reversed range is empty.
    pub fn build_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        sessions: &[TrainingSession],
    ) -> Vec<DayBucket> {
        if from > to {
            return Vec::new();
        }
        let mut by_day = self.group_by_day(sessions);
        let dates: Vec<NaiveDate> = by_day.range(from..=to).map(|(d, _)| *d).collect();
        dates
            .into_iter()
            .map(|date| self.bucket(date, &mut by_day))
            .collect()
    }

    fn bucket(
        &self,
        date: NaiveDate,
        by_day: &mut BTreeMap<NaiveDate, Vec<AgendaEntry>>,
    ) -> DayBucket {
        let mut bucket = DayBucket::for_date(date);
        bucket.entries = by_day.remove(&date).unwrap_or_default();
        bucket.finish();
        bucket
    }

    fn group_by_day(&self, sessions: &[TrainingSession]) -> BTreeMap<NaiveDate, Vec<AgendaEntry>> {
        let conflicts = detect_all(sessions);
        let mut by_day: BTreeMap<NaiveDate, Vec<AgendaEntry>> = BTreeMap::new();

        for session in sessions.iter().filter(|s| !s.is_deleted()) {
            let has_conflict = conflicts.get(&session.id).copied().unwrap_or(false);
            let focus_total = validate_focus(&session.focus_allocation).total;
            if let Some(entry) = AgendaEntry::from_session(session, focus_total, has_conflict) {
                by_day
                    .entry(self.calendar.local_date(entry.start_at))
                    .or_default()
                    .push(entry);
            }
        }

        by_day
    }
}
