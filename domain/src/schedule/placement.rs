//! A session's position in time.

use crate::core::error::TransitionError;
use crate::core::ids::{SessionId, TeamId};
use crate::session::entities::TrainingSession;
use chrono::{DateTime, Duration, Utc};

/// Half-open time window `[start, start + duration)` owned by a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Session being placed; `None` for a session not yet persisted.
    pub session_id: Option<SessionId>,
    pub team_id: TeamId,
    pub start_at: DateTime<Utc>,
    pub duration_minutes: u32,
}

impl Placement {
    pub fn new(
        session_id: Option<SessionId>,
        team_id: TeamId,
        start_at: DateTime<Utc>,
        duration_minutes: u32,
    ) -> Result<Self, TransitionError> {
        if duration_minutes == 0 {
            return Err(TransitionError::invalid_input(
                "planned duration must be a positive number of minutes",
            ));
        }
        Ok(Self {
            session_id,
            team_id,
            start_at,
            duration_minutes,
        })
    }

    /// Placement of a stored session, `None` when it has no start or duration.
    pub fn of(session: &TrainingSession) -> Option<Self> {
        Some(Self {
            session_id: Some(session.id.clone()),
            team_id: session.team_id.clone(),
            start_at: session.start_at?,
            duration_minutes: session.duration_minutes()?,
        })
    }

    pub fn end_at(&self) -> DateTime<Utc> {
        self.start_at + Duration::minutes(i64::from(self.duration_minutes))
    }

    /// `startA < endB && startB < endA`. Windows that only touch do not overlap.
    pub fn overlaps(&self, other: &Placement) -> bool {
        self.start_at < other.end_at() && other.start_at < self.end_at()
    }
}
