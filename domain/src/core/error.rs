//! Domain error types

use crate::session::entities::SessionStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A draft field required before a session can be scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    StartAt,
    PlannedDuration,
    MainObjective,
    /// At least one exercise/content item must be attached.
    Content,
}

impl DraftField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::StartAt => "start_at",
            DraftField::PlannedDuration => "planned_duration_minutes",
            DraftField::MainObjective => "main_objective",
            DraftField::Content => "content",
        }
    }
}

impl std::fmt::Display for DraftField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn join_fields(fields: &[DraftField]) -> String {
    fields
        .iter()
        .map(DraftField::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Rejection returned by the lifecycle machine and the move planner.
///
/// Every variant is recoverable: the engine is pure, so a rejection only
/// tells the caller what to fix before trying again.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransitionError {
    #[error("Draft is incomplete: missing {}", join_fields(.missing_fields))]
    IncompleteDraft { missing_fields: Vec<DraftField> },

    #[error("Schedule is immutable once a session is {status}")]
    ImmutableSchedule { status: SessionStatus },

    #[error(
        "Review is incomplete (attendance missing: {missing_attendance}, outcome missing: {missing_outcome})"
    )]
    ReviewIncomplete {
        missing_attendance: bool,
        missing_outcome: bool,
    },

    #[error("Session is {status} and cannot change")]
    TerminalState { status: SessionStatus },

    #[error("Reason must be at least {min_chars} characters (got {actual_chars})")]
    InvalidReason { min_chars: usize, actual_chars: usize },

    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition {
        from: SessionStatus,
        to: SessionStatus,
    },

    #[error("Session is not due until {start_at}")]
    NotYetDue { start_at: DateTime<Utc> },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl TransitionError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        TransitionError::InvalidInput {
            message: message.into(),
        }
    }

    /// Whether this rejection points at a caller bug rather than user input.
    ///
    /// Callers log these as warnings.
    pub fn is_caller_bug(&self) -> bool {
        matches!(
            self,
            TransitionError::TerminalState { .. } | TransitionError::InvalidTransition { .. }
        )
    }

    /// Stable machine-readable code for this rejection.
    pub fn code(&self) -> &'static str {
        match self {
            TransitionError::IncompleteDraft { .. } => "incomplete_draft",
            TransitionError::ImmutableSchedule { .. } => "immutable_schedule",
            TransitionError::ReviewIncomplete { .. } => "review_incomplete",
            TransitionError::TerminalState { .. } => "terminal_state",
            TransitionError::InvalidReason { .. } => "invalid_reason",
            TransitionError::InvalidTransition { .. } => "invalid_transition",
            TransitionError::NotYetDue { .. } => "not_yet_due",
            TransitionError::InvalidInput { .. } => "invalid_input",
        }
    }
}
