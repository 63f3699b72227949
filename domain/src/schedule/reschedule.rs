//! Moving a draft session to another day or time.

use super::calendar::TeamCalendar;
use super::conflict::check_conflicts;
use super::placement::Placement;
use crate::core::error::TransitionError;
use crate::core::ids::SessionId;
use crate::lifecycle::machine::ensure_movable;
use crate::session::entities::TrainingSession;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Where the caller wants the session to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub target_date: NaiveDate,
    /// New local start time; `None` keeps the current time of day.
    pub time: Option<NaiveTime>,
}

impl MoveRequest {
    pub fn to_date(target_date: NaiveDate) -> Self {
        Self {
            target_date,
            time: None,
        }
    }

    pub fn at_time(mut self, time: NaiveTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// Same date and time as now; nothing to save.
    Unchanged,
    Moved { start_at: DateTime<Utc> },
}

/// Accepted move plus the advisory conflicts of the resulting placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePlan {
    pub outcome: MoveOutcome,
    pub conflicts: BTreeSet<SessionId>,
}

impl MovePlan {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self.outcome, MoveOutcome::Unchanged)
    }

    /// Copy of the session with the new start applied.
    pub fn apply(&self, session: &TrainingSession) -> TrainingSession {
        let mut moved = session.clone();
        if let MoveOutcome::Moved { start_at } = self.outcome {
            moved.start_at = Some(start_at);
            if moved.duration_minutes().is_none() {
                moved.planned_duration_minutes =
                    Some(moved.session_type.default_duration_minutes());
            }
        }
        moved
    }
}

/// Plan a move of `session` and check it against the team's other sessions.
///
/// Only drafts may move; anything else is `ImmutableSchedule`. A move to
/// the date (and time) the session already occupies is a no-op success.
pub fn plan_move(
    session: &TrainingSession,
    request: &MoveRequest,
    calendar: &TeamCalendar,
    team_sessions: &[TrainingSession],
) -> Result<MovePlan, TransitionError> {
    ensure_movable(session)?;

    let current_time = session.start_at.map(|at| calendar.local_time(at));
    let time = request.time.or(current_time).ok_or_else(|| {
        TransitionError::invalid_input("a start time is required to place an unscheduled draft")
    })?;

    let duration = session
        .duration_minutes()
        .unwrap_or_else(|| session.session_type.default_duration_minutes());

    if let Some(start_at) = session.start_at
        && calendar.local_date(start_at) == request.target_date
        && current_time == Some(time)
    {
        let current = Placement::new(
            Some(session.id.clone()),
            session.team_id.clone(),
            start_at,
            duration,
        )?;
        return Ok(MovePlan {
            outcome: MoveOutcome::Unchanged,
            conflicts: check_conflicts(&current, team_sessions),
        });
    }

    let start_at = calendar.at(request.target_date, time);
    let placement = Placement::new(
        Some(session.id.clone()),
        session.team_id.clone(),
        start_at,
        duration,
    )?;

    Ok(MovePlan {
        outcome: MoveOutcome::Moved { start_at },
        conflicts: check_conflicts(&placement, team_sessions),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::entities::{SessionStatus, SessionType};
    use chrono::{TimeZone, Weekday};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, d).unwrap()
    }

    fn time(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn draft_at(id: &str, d: u32, h: u32) -> TrainingSession {
        TrainingSession::new_draft(id, "team", SessionType::Court)
            .with_start(Utc.with_ymd_and_hms(2026, 9, d, h, 0, 0).unwrap())
    }

    #[test]
    fn test_scheduled_session_is_immutable() {
        let session = draft_at("s1", 14, 18).with_status(SessionStatus::Scheduled);
        let err = plan_move(
            &session,
            &MoveRequest::to_date(date(15)),
            &TeamCalendar::default(),
            &[],
        )
        .unwrap_err();
        assert_eq!(
            err,
            TransitionError::ImmutableSchedule {
                status: SessionStatus::Scheduled
            }
        );
    }

    #[test]
    fn test_draft_moves_keeping_time_of_day() {
        let session = draft_at("s1", 14, 18);
        let plan = plan_move(
            &session,
            &MoveRequest::to_date(date(16)),
            &TeamCalendar::default(),
            &[],
        )
        .unwrap();
        let expected = Utc.with_ymd_and_hms(2026, 9, 16, 18, 0, 0).unwrap();
        assert_eq!(plan.outcome, MoveOutcome::Moved { start_at: expected });
        assert_eq!(plan.apply(&session).start_at, Some(expected));
    }

    #[test]
    fn test_same_day_move_is_noop() {
        let session = draft_at("s1", 14, 18);
        let plan = plan_move(
            &session,
            &MoveRequest::to_date(date(14)),
            &TeamCalendar::default(),
            &[],
        )
        .unwrap();
        assert!(plan.is_unchanged());
        assert_eq!(plan.apply(&session), session);
    }

    #[test]
    fn test_same_day_new_time_is_a_move() {
        let session = draft_at("s1", 14, 18);
        let plan = plan_move(
            &session,
            &MoveRequest::to_date(date(14)).at_time(time(9)),
            &TeamCalendar::default(),
            &[],
        )
        .unwrap();
        assert!(!plan.is_unchanged());
    }

    #[test]
    fn test_move_reports_conflicts_at_target() {
        let session = draft_at("s1", 14, 18);
        let blocker = draft_at("s2", 16, 17);
        let team = vec![session.clone(), blocker];
        let plan = plan_move(
            &session,
            &MoveRequest::to_date(date(16)),
            &TeamCalendar::default(),
            &team,
        )
        .unwrap();
        assert!(plan.has_conflicts());
        assert!(plan.conflicts.contains(&SessionId::from("s2")));
    }

    #[test]
    fn test_unplaced_draft_needs_a_time() {
        let session = TrainingSession::new_draft("s1", "team", SessionType::Video);
        let calendar = TeamCalendar::default();
        let err = plan_move(&session, &MoveRequest::to_date(date(3)), &calendar, &[]).unwrap_err();
        assert_eq!(err.code(), "invalid_input");

        let plan = plan_move(
            &session,
            &MoveRequest::to_date(date(3)).at_time(time(7)),
            &calendar,
            &[],
        )
        .unwrap();
        let moved = plan.apply(&session);
        assert_eq!(
            moved.start_at,
            Some(Utc.with_ymd_and_hms(2026, 9, 3, 7, 0, 0).unwrap())
        );
        assert_eq!(moved.planned_duration_minutes, Some(60));
    }

    #[test]
    fn test_same_day_is_judged_in_team_time() {
        // 22:00 UTC on the 14th is 00:00 on the 15th at UTC+2.
        let session = draft_at("s1", 14, 22);
        let calendar = TeamCalendar::from_offset_minutes(120, Weekday::Mon).unwrap();
        let plan = plan_move(&session, &MoveRequest::to_date(date(15)), &calendar, &[]).unwrap();
        assert!(plan.is_unchanged());
    }
}
