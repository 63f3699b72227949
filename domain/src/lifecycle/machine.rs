//! Session lifecycle state machine.
//!
//! # State Transitions
//!
//! ```text
//! Draft ──> Scheduled ──> InProgress ──> PendingReview ──> Readonly
//!   │           │
//!   └───────────┴──> Deleted
//! ```
//!
//! Every function here is pure: it judges a transition and returns the
//! resulting status. Callers persist it themselves.

use super::action::{TransitionAction, TransitionContext};
use super::policy::LifecyclePolicy;
use crate::core::error::{DraftField, TransitionError};
use crate::session::entities::{SessionStatus, TrainingSession};
use chrono::{DateTime, Utc};

/// Judge `action` against the default policy.
pub fn transition(
    session: &TrainingSession,
    action: TransitionAction,
    context: &TransitionContext,
) -> Result<SessionStatus, TransitionError> {
    transition_with_policy(session, action, context, &LifecyclePolicy::default())
}

pub fn transition_with_policy(
    session: &TrainingSession,
    action: TransitionAction,
    context: &TransitionContext,
    policy: &LifecyclePolicy,
) -> Result<SessionStatus, TransitionError> {
    let from = session.status;
    if from.is_terminal() {
        return Err(TransitionError::TerminalState { status: from });
    }

    let to = action.target();

    // A scheduler may fire the same time-driven step twice.
    if is_repeated_step(from, action) {
        return Ok(from);
    }

    match (from, action) {
        (SessionStatus::Draft, TransitionAction::Schedule) => {
            let missing_fields = missing_draft_fields(session, context.has_content);
            if !missing_fields.is_empty() {
                return Err(TransitionError::IncompleteDraft { missing_fields });
            }
            Ok(to)
        }
        (SessionStatus::Scheduled, TransitionAction::Start) => {
            let start_at = session.start_at.ok_or_else(|| {
                TransitionError::invalid_input("scheduled session has no start time")
            })?;
            if context.now < start_at {
                return Err(TransitionError::NotYetDue { start_at });
            }
            Ok(to)
        }
        (SessionStatus::InProgress, TransitionAction::End) => Ok(to),
        (SessionStatus::PendingReview, TransitionAction::Close) => {
            let missing_attendance = session.attendance_summary.is_none();
            let missing_outcome = session.execution_outcome.is_none();
            if missing_attendance || missing_outcome {
                return Err(TransitionError::ReviewIncomplete {
                    missing_attendance,
                    missing_outcome,
                });
            }
            Ok(to)
        }
        (status, TransitionAction::Delete) if status.is_deletable() => {
            check_reason(context.reason.as_deref(), policy)?;
            Ok(to)
        }
        _ => Err(TransitionError::InvalidTransition { from, to }),
    }
}

/// Whether an automatic `action` is already behind a session at `status`.
pub fn is_repeated_step(status: SessionStatus, action: TransitionAction) -> bool {
    if !action.is_automatic() {
        return false;
    }
    match (status.rank(), action.target().rank()) {
        (Some(current), Some(target)) => current >= target,
        _ => false,
    }
}

/// Judge a move to `target` and return the updated session.
///
/// The stored version is left untouched; the persistence layer owns it.
pub fn propose_transition(
    session: &TrainingSession,
    target: SessionStatus,
    context: &TransitionContext,
) -> Result<TrainingSession, TransitionError> {
    propose_transition_with_policy(session, target, context, &LifecyclePolicy::default())
}

pub fn propose_transition_with_policy(
    session: &TrainingSession,
    target: SessionStatus,
    context: &TransitionContext,
    policy: &LifecyclePolicy,
) -> Result<TrainingSession, TransitionError> {
    if session.status.is_terminal() {
        return Err(TransitionError::TerminalState {
            status: session.status,
        });
    }

    let action = TransitionAction::for_target(target).ok_or(TransitionError::InvalidTransition {
        from: session.status,
        to: target,
    })?;

    let status = transition_with_policy(session, action, context, policy)?;
    Ok(apply_status(session, status, context))
}

/// Copy of `session` with `status` applied.
pub fn apply_status(
    session: &TrainingSession,
    status: SessionStatus,
    context: &TransitionContext,
) -> TrainingSession {
    let mut next = session.clone();
    if status == SessionStatus::Deleted && session.status != SessionStatus::Deleted {
        next.deletion_reason = context.reason.as_ref().map(|r| r.trim().to_string());
    }
    next.status = status;
    next
}

/// Every field still missing before a draft may be scheduled.
pub fn missing_draft_fields(session: &TrainingSession, has_content: bool) -> Vec<DraftField> {
    let mut missing = Vec::new();
    if session.start_at.is_none() {
        missing.push(DraftField::StartAt);
    }
    if session.duration_minutes().is_none() {
        missing.push(DraftField::PlannedDuration);
    }
    if !session.has_objective() {
        missing.push(DraftField::MainObjective);
    }
    if !has_content {
        missing.push(DraftField::Content);
    }
    missing
}

fn check_reason(reason: Option<&str>, policy: &LifecyclePolicy) -> Result<(), TransitionError> {
    let actual_chars = reason.map(|r| r.trim().chars().count()).unwrap_or(0);
    if actual_chars < policy.min_reason_chars {
        return Err(TransitionError::InvalidReason {
            min_chars: policy.min_reason_chars,
            actual_chars,
        });
    }
    Ok(())
}

/// Scheduled and the start time has been reached.
pub fn is_due(session: &TrainingSession, now: DateTime<Utc>) -> bool {
    session.status == SessionStatus::Scheduled && session.start_at.is_some_and(|start| now >= start)
}

/// In progress and the planned end has been reached.
pub fn is_overdue(session: &TrainingSession, now: DateTime<Utc>) -> bool {
    session.status == SessionStatus::InProgress && session.end_at().is_some_and(|end| now >= end)
}

/// Next time-driven step for a scheduler, one edge at a time.
pub fn next_automatic_transition(
    session: &TrainingSession,
    now: DateTime<Utc>,
) -> Option<TransitionAction> {
    if is_due(session, now) {
        Some(TransitionAction::Start)
    } else if is_overdue(session, now) {
        Some(TransitionAction::End)
    } else {
        None
    }
}

/// Only drafts may be moved in time.
pub fn ensure_movable(session: &TrainingSession) -> Result<(), TransitionError> {
    if session.status != SessionStatus::Draft {
        return Err(TransitionError::ImmutableSchedule {
            status: session.status,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::entities::{AttendanceSummary, ExecutionOutcome, SessionType};
    use chrono::TimeZone;

    // ==================== Helpers ====================

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 10, h, m, 0).unwrap()
    }

    fn ready_draft() -> TrainingSession {
        TrainingSession::new_draft("s1", "team", SessionType::Court)
            .with_start(at(18, 0))
            .with_duration(90)
            .with_objective("Pick-and-roll defense")
    }

    fn ctx(h: u32, m: u32) -> TransitionContext {
        TransitionContext::at(at(h, m)).with_content(true)
    }

    const ALL_STATUSES: [SessionStatus; 6] = [
        SessionStatus::Draft,
        SessionStatus::Scheduled,
        SessionStatus::InProgress,
        SessionStatus::PendingReview,
        SessionStatus::Readonly,
        SessionStatus::Deleted,
    ];

    const ALL_ACTIONS: [TransitionAction; 5] = [
        TransitionAction::Schedule,
        TransitionAction::Start,
        TransitionAction::End,
        TransitionAction::Close,
        TransitionAction::Delete,
    ];

    // ==================== Draft → Scheduled ====================

    #[test]
    fn test_schedule_complete_draft() {
        let status = transition(&ready_draft(), TransitionAction::Schedule, &ctx(12, 0)).unwrap();
        assert_eq!(status, SessionStatus::Scheduled);
    }

    #[test]
    fn test_schedule_reports_every_missing_field() {
        let empty = TrainingSession::new_draft("s1", "team", SessionType::Court).with_duration(0);
        let err = transition(
            &empty,
            TransitionAction::Schedule,
            &TransitionContext::at(at(12, 0)),
        )
        .unwrap_err();
        assert_eq!(
            err,
            TransitionError::IncompleteDraft {
                missing_fields: vec![
                    DraftField::StartAt,
                    DraftField::PlannedDuration,
                    DraftField::MainObjective,
                    DraftField::Content,
                ]
            }
        );
    }

    #[test]
    fn test_schedule_requires_content() {
        let err = transition(
            &ready_draft(),
            TransitionAction::Schedule,
            &TransitionContext::at(at(12, 0)),
        )
        .unwrap_err();
        assert_eq!(
            err,
            TransitionError::IncompleteDraft {
                missing_fields: vec![DraftField::Content]
            }
        );
    }

    #[test]
    fn test_schedule_ignores_unplanned_focus() {
        let session = ready_draft();
        assert!(session.focus_allocation.is_zero());
        assert!(transition(&session, TransitionAction::Schedule, &ctx(12, 0)).is_ok());
    }

    // ==================== Scheduled → InProgress ====================

    #[test]
    fn test_is_due() {
        let scheduled = ready_draft().with_status(SessionStatus::Scheduled);
        assert!(!is_due(&scheduled, at(17, 59)));
        assert!(is_due(&scheduled, at(18, 0)));
        assert!(!is_due(&ready_draft(), at(19, 0)));
    }

    #[test]
    fn test_start_before_due_is_rejected() {
        let scheduled = ready_draft().with_status(SessionStatus::Scheduled);
        let err = transition(&scheduled, TransitionAction::Start, &ctx(17, 0)).unwrap_err();
        assert_eq!(err, TransitionError::NotYetDue { start_at: at(18, 0) });
        assert_eq!(
            transition(&scheduled, TransitionAction::Start, &ctx(18, 0)).unwrap(),
            SessionStatus::InProgress
        );
    }

    // ==================== InProgress → PendingReview ====================

    #[test]
    fn test_is_overdue() {
        let running = ready_draft().with_status(SessionStatus::InProgress);
        assert!(!is_overdue(&running, at(19, 29)));
        assert!(is_overdue(&running, at(19, 30)));
    }

    #[test]
    fn test_end_early_has_no_guard() {
        let running = ready_draft().with_status(SessionStatus::InProgress);
        assert_eq!(
            transition(&running, TransitionAction::End, &ctx(18, 10)).unwrap(),
            SessionStatus::PendingReview
        );
    }

    #[test]
    fn test_automatic_transitions_are_idempotent() {
        let running = ready_draft().with_status(SessionStatus::InProgress);
        assert_eq!(
            transition(&running, TransitionAction::Start, &ctx(18, 5)).unwrap(),
            SessionStatus::InProgress
        );
        let review = ready_draft().with_status(SessionStatus::PendingReview);
        assert_eq!(
            transition(&review, TransitionAction::End, &ctx(20, 0)).unwrap(),
            SessionStatus::PendingReview
        );
    }

    #[test]
    fn test_late_start_after_session_moved_on_is_noop() {
        let review = ready_draft().with_status(SessionStatus::PendingReview);
        assert_eq!(
            transition(&review, TransitionAction::Start, &ctx(20, 0)).unwrap(),
            SessionStatus::PendingReview
        );
        assert!(is_repeated_step(SessionStatus::PendingReview, TransitionAction::Start));
        assert!(!is_repeated_step(SessionStatus::Draft, TransitionAction::Start));
        assert!(!is_repeated_step(SessionStatus::Scheduled, TransitionAction::End));
        assert!(!is_repeated_step(SessionStatus::PendingReview, TransitionAction::Close));

        // Automatic steps never reach into the manual part of the graph.
        let draft = ready_draft();
        assert!(matches!(
            transition(&draft, TransitionAction::Start, &ctx(20, 0)),
            Err(TransitionError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_next_automatic_transition_walks_one_edge_at_a_time() {
        let mut session = ready_draft().with_status(SessionStatus::Scheduled);
        let now = at(21, 0);
        let mut steps = Vec::new();
        while let Some(action) = next_automatic_transition(&session, now) {
            steps.push(action);
            session.status = transition(&session, action, &TransitionContext::at(now)).unwrap();
        }
        assert_eq!(steps, vec![TransitionAction::Start, TransitionAction::End]);
        assert_eq!(session.status, SessionStatus::PendingReview);
        assert_eq!(next_automatic_transition(&session, now), None);
    }

    // ==================== PendingReview → Readonly ====================

    fn review() -> TrainingSession {
        ready_draft().with_status(SessionStatus::PendingReview)
    }

    #[test]
    fn test_close_requires_attendance_and_outcome() {
        let both = review()
            .with_attendance(AttendanceSummary::new(12, 11))
            .with_outcome(ExecutionOutcome::new(at(21, 0)));
        assert_eq!(
            transition(&both, TransitionAction::Close, &ctx(21, 0)).unwrap(),
            SessionStatus::Readonly
        );

        let mut no_attendance = both.clone();
        no_attendance.attendance_summary = None;
        assert_eq!(
            transition(&no_attendance, TransitionAction::Close, &ctx(21, 0)).unwrap_err(),
            TransitionError::ReviewIncomplete {
                missing_attendance: true,
                missing_outcome: false
            }
        );

        let mut no_outcome = both.clone();
        no_outcome.execution_outcome = None;
        assert_eq!(
            transition(&no_outcome, TransitionAction::Close, &ctx(21, 0)).unwrap_err(),
            TransitionError::ReviewIncomplete {
                missing_attendance: false,
                missing_outcome: true
            }
        );
    }

    #[test]
    fn test_close_reports_both_flags_together() {
        assert_eq!(
            transition(&review(), TransitionAction::Close, &ctx(21, 0)).unwrap_err(),
            TransitionError::ReviewIncomplete {
                missing_attendance: true,
                missing_outcome: true
            }
        );
    }

    // ==================== Terminal states ====================

    #[test]
    fn test_readonly_rejects_everything() {
        let closed = ready_draft().with_status(SessionStatus::Readonly);
        for action in ALL_ACTIONS {
            assert_eq!(
                transition(&closed, action, &ctx(12, 0).with_reason("long enough")).unwrap_err(),
                TransitionError::TerminalState {
                    status: SessionStatus::Readonly
                }
            );
        }
    }

    #[test]
    fn test_deleted_rejects_everything() {
        let gone = ready_draft().with_status(SessionStatus::Deleted);
        for action in ALL_ACTIONS {
            assert!(matches!(
                transition(&gone, action, &ctx(12, 0)),
                Err(TransitionError::TerminalState { .. })
            ));
        }
    }

    // ==================== Deletion ====================

    #[test]
    fn test_delete_with_short_reason_fails() {
        let err = propose_transition(
            &ready_draft(),
            SessionStatus::Deleted,
            &ctx(12, 0).with_reason("ok"),
        )
        .unwrap_err();
        assert_eq!(
            err,
            TransitionError::InvalidReason {
                min_chars: 5,
                actual_chars: 2
            }
        );
    }

    #[test]
    fn test_delete_with_reason_succeeds() {
        let deleted = propose_transition(
            &ready_draft(),
            SessionStatus::Deleted,
            &ctx(12, 0).with_reason("rescheduled"),
        )
        .unwrap();
        assert_eq!(deleted.status, SessionStatus::Deleted);
        assert_eq!(deleted.deletion_reason.as_deref(), Some("rescheduled"));
    }

    #[test]
    fn test_delete_without_reason_fails() {
        let scheduled = ready_draft().with_status(SessionStatus::Scheduled);
        assert!(matches!(
            transition(&scheduled, TransitionAction::Delete, &ctx(12, 0)),
            Err(TransitionError::InvalidReason {
                actual_chars: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_delete_reason_is_trimmed_and_counted_in_chars() {
        let policy = LifecyclePolicy::default();
        assert!(check_reason(Some("   ok    "), &policy).is_err());
        assert!(check_reason(Some("ñandú"), &policy).is_ok());
    }

    #[test]
    fn test_cannot_delete_once_started() {
        for status in [SessionStatus::InProgress, SessionStatus::PendingReview] {
            let session = ready_draft().with_status(status);
            assert_eq!(
                transition(
                    &session,
                    TransitionAction::Delete,
                    &ctx(12, 0).with_reason("rescheduled")
                )
                .unwrap_err(),
                TransitionError::InvalidTransition {
                    from: status,
                    to: SessionStatus::Deleted
                }
            );
        }
    }

    #[test]
    fn test_custom_reason_length() {
        let policy = LifecyclePolicy::default().with_min_reason_chars(12);
        let result = transition_with_policy(
            &ready_draft(),
            TransitionAction::Delete,
            &ctx(12, 0).with_reason("rescheduled"),
            &policy,
        );
        assert!(matches!(result, Err(TransitionError::InvalidReason { .. })));
    }

    // ==================== Graph shape ====================

    #[test]
    fn test_only_graph_edges_are_accepted() {
        let allowed = [
            (SessionStatus::Draft, SessionStatus::Scheduled),
            (SessionStatus::Draft, SessionStatus::Deleted),
            (SessionStatus::Scheduled, SessionStatus::InProgress),
            (SessionStatus::Scheduled, SessionStatus::Deleted),
            (SessionStatus::InProgress, SessionStatus::PendingReview),
            (SessionStatus::PendingReview, SessionStatus::Readonly),
        ];

        for from in ALL_STATUSES {
            let session = ready_draft()
                .with_status(from)
                .with_attendance(AttendanceSummary::new(10, 10))
                .with_outcome(ExecutionOutcome::new(at(21, 0)));
            for action in ALL_ACTIONS {
                let context = ctx(23, 0).with_reason("rescheduled");
                let result = transition(&session, action, &context);
                let to = action.target();
                let is_noop = is_repeated_step(from, action);
                match result {
                    Ok(status) if is_noop => assert_eq!(status, from),
                    Ok(status) => {
                        assert_eq!(status, to);
                        assert!(
                            allowed.contains(&(from, to)),
                            "unexpected edge {} -> {}",
                            from,
                            to
                        );
                    }
                    Err(_) => assert!(
                        !allowed.contains(&(from, to)),
                        "edge {} -> {} should be accepted",
                        from,
                        to
                    ),
                }
            }
        }
    }

    #[test]
    fn test_skipping_a_state_is_rejected() {
        let err = propose_transition(&ready_draft(), SessionStatus::InProgress, &ctx(19, 0))
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError::InvalidTransition {
                from: SessionStatus::Draft,
                to: SessionStatus::InProgress
            }
        );
    }

    #[test]
    fn test_propose_back_to_draft_is_rejected() {
        let scheduled = ready_draft().with_status(SessionStatus::Scheduled);
        assert_eq!(
            propose_transition(&scheduled, SessionStatus::Draft, &ctx(12, 0)).unwrap_err(),
            TransitionError::InvalidTransition {
                from: SessionStatus::Scheduled,
                to: SessionStatus::Draft
            }
        );
    }

    #[test]
    fn test_propose_does_not_touch_version() {
        let mut session = ready_draft();
        session.version = 7;
        let next = propose_transition(&session, SessionStatus::Scheduled, &ctx(12, 0)).unwrap();
        assert_eq!(next.status, SessionStatus::Scheduled);
        assert_eq!(next.version, 7);
        assert_eq!(session.status, SessionStatus::Draft);
    }

    // ==================== Moves ====================

    #[test]
    fn test_ensure_movable() {
        assert!(ensure_movable(&ready_draft()).is_ok());
        for status in &ALL_STATUSES[1..] {
            assert_eq!(
                ensure_movable(&ready_draft().with_status(*status)).unwrap_err(),
                TransitionError::ImmutableSchedule { status: *status }
            );
        }
    }
}
