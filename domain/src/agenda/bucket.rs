//! Day buckets and the entries they hold.

use crate::core::error::TransitionError;
use crate::core::ids::SessionId;
use crate::session::entities::{SessionStatus, SessionType, TrainingSession};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A validated calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, TransitionError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|_| Self { year, month })
            .ok_or_else(|| {
                TransitionError::invalid_input(format!("invalid month {}-{:02}", year, month))
            })
    }

    /// Month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // Checked in `new`; `of` copies from a real date.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Every day of the month in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.first_day()
            .iter_days()
            .take_while(move |d| d.month() == self.month)
    }
}

impl std::fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// One session as shown in a grid cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgendaEntry {
    pub session_id: SessionId,
    pub session_type: SessionType,
    pub status: SessionStatus,
    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,
    pub focus_total: u64,
    pub has_conflict: bool,
    pub main_objective: String,
}

impl AgendaEntry {
    /// `None` for sessions that cannot be placed on a day.
    pub fn from_session(
        session: &TrainingSession,
        focus_total: u64,
        has_conflict: bool,
    ) -> Option<Self> {
        let start_at = session.start_at?;
        Some(Self {
            session_id: session.id.clone(),
            session_type: session.session_type,
            status: session.status,
            start_at,
            end_at: session.end_at(),
            focus_total,
            has_conflict,
            main_objective: session.main_objective.clone(),
        })
    }
}

/// A grid cell. Padding cells in a month grid have no date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayBucket {
    pub date: Option<NaiveDate>,
    pub entries: Vec<AgendaEntry>,
    pub pending_review_count: usize,
    pub in_progress: bool,
}

impl DayBucket {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Self::default()
        }
    }

    pub fn is_blank(&self) -> bool {
        self.date.is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn conflict_count(&self) -> usize {
        self.entries.iter().filter(|e| e.has_conflict).count()
    }

    /// Sort entries and recompute the day summary.
    pub(crate) fn finish(&mut self) {
        self.entries.sort_by(|a, b| {
            a.start_at
                .cmp(&b.start_at)
                .then_with(|| a.session_id.cmp(&b.session_id))
        });
        self.pending_review_count = self
            .entries
            .iter()
            .filter(|e| e.status == SessionStatus::PendingReview)
            .count();
        self.in_progress = self
            .entries
            .iter()
            .any(|e| e.status == SessionStatus::InProgress);
    }
}
