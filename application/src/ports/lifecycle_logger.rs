//! Port for structured lifecycle event logging.
//!
//! Defines the [`LifecycleEventLogger`] trait for recording what the engine
//! decided (transitions applied or rejected, moves, scheduler advances) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures an audit
//! trail in a machine-readable format (JSONL).

use roster_domain::{SessionId, SessionStatus, TransitionAction, TransitionError};
use serde_json::{Value, json};
use std::collections::BTreeSet;

/// A structured lifecycle event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. The adapter adds the timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct LifecycleEvent {
    /// Event type identifier (e.g., "transition_applied", "session_moved").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl LifecycleEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    pub fn transition_applied(
        session_id: &SessionId,
        from: SessionStatus,
        to: SessionStatus,
        version: u64,
    ) -> Self {
        Self::new(
            "transition_applied",
            json!({
                "session_id": session_id,
                "from": from,
                "to": to,
                "version": version,
            }),
        )
    }

    pub fn transition_rejected(
        session_id: &SessionId,
        from: SessionStatus,
        target: Option<SessionStatus>,
        error: &TransitionError,
    ) -> Self {
        Self::new(
            "transition_rejected",
            json!({
                "session_id": session_id,
                "from": from,
                "target": target,
                "error": error,
            }),
        )
    }

    pub fn session_moved(
        session_id: &SessionId,
        start_at: Option<chrono::DateTime<chrono::Utc>>,
        conflicts: &BTreeSet<SessionId>,
        forced: bool,
    ) -> Self {
        Self::new(
            "session_moved",
            json!({
                "session_id": session_id,
                "start_at": start_at,
                "conflicts": conflicts,
                "forced": forced,
            }),
        )
    }

    pub fn auto_advanced(
        session_id: &SessionId,
        from: SessionStatus,
        to: SessionStatus,
        steps: &[TransitionAction],
    ) -> Self {
        Self::new(
            "auto_advanced",
            json!({
                "session_id": session_id,
                "from": from,
                "to": to,
                "steps": steps,
            }),
        )
    }
}

/// Port for logging lifecycle events to a structured log.
///
/// Implementations write each event as a single record (e.g., one JSONL line).
/// The `log` method is synchronous and non-fallible so that a failing log
/// never changes the outcome of a transition.
pub trait LifecycleEventLogger: Send + Sync {
    /// Record a lifecycle event.
    fn log(&self, event: LifecycleEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoLifecycleLogger;

impl LifecycleEventLogger for NoLifecycleLogger {
    fn log(&self, _event: LifecycleEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_event_carries_error_kind() {
        let error = TransitionError::ReviewIncomplete {
            missing_attendance: true,
            missing_outcome: false,
        };
        let event = LifecycleEvent::transition_rejected(
            &SessionId::from("s1"),
            SessionStatus::PendingReview,
            Some(SessionStatus::Readonly),
            &error,
        );
        assert_eq!(event.event_type, "transition_rejected");
        assert_eq!(event.payload["error"]["kind"], "review_incomplete");
        assert_eq!(event.payload["error"]["missing_attendance"], true);
        assert_eq!(event.payload["from"], "pending_review");
        assert_eq!(event.payload["target"], "readonly");
    }

    #[test]
    fn test_auto_advanced_lists_steps() {
        let event = LifecycleEvent::auto_advanced(
            &SessionId::from("s1"),
            SessionStatus::Scheduled,
            SessionStatus::PendingReview,
            &[TransitionAction::Start, TransitionAction::End],
        );
        assert_eq!(event.payload["steps"], json!(["start", "end"]));
        assert_eq!(event.payload["session_id"], "s1");
    }
}
