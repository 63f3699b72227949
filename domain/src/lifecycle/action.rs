//! Transition requests and the externally owned facts they are judged with.

use crate::session::entities::SessionStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A requested lifecycle step. Each action leads to exactly one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionAction {
    /// `draft → scheduled`
    Schedule,
    /// `scheduled → in_progress`; normally fired by the scheduler once due.
    Start,
    /// `in_progress → pending_review`; fired once overdue, or "end early".
    End,
    /// `pending_review → readonly`
    Close,
    /// `draft | scheduled → deleted`; requires a reason.
    Delete,
}

impl TransitionAction {
    pub fn target(&self) -> SessionStatus {
        match self {
            TransitionAction::Schedule => SessionStatus::Scheduled,
            TransitionAction::Start => SessionStatus::InProgress,
            TransitionAction::End => SessionStatus::PendingReview,
            TransitionAction::Close => SessionStatus::Readonly,
            TransitionAction::Delete => SessionStatus::Deleted,
        }
    }

    /// Action that leads to `target`. `Draft` is never a target.
    pub fn for_target(target: SessionStatus) -> Option<Self> {
        match target {
            SessionStatus::Draft => None,
            SessionStatus::Scheduled => Some(TransitionAction::Schedule),
            SessionStatus::InProgress => Some(TransitionAction::Start),
            SessionStatus::PendingReview => Some(TransitionAction::End),
            SessionStatus::Readonly => Some(TransitionAction::Close),
            SessionStatus::Deleted => Some(TransitionAction::Delete),
        }
    }

    /// Time-driven steps a scheduler may repeat safely.
    pub fn is_automatic(&self) -> bool {
        matches!(self, TransitionAction::Start | TransitionAction::End)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionAction::Schedule => "schedule",
            TransitionAction::Start => "start",
            TransitionAction::End => "end",
            TransitionAction::Close => "close",
            TransitionAction::Delete => "delete",
        }
    }
}

impl std::fmt::Display for TransitionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Facts owned outside the engine that a transition is judged against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionContext {
    /// At least one exercise/content item is attached to the session.
    pub has_content: bool,
    /// Free-text reason, required for deletion.
    pub reason: Option<String>,
    pub now: DateTime<Utc>,
}

impl TransitionContext {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            has_content: false,
            reason: None,
            now,
        }
    }

    pub fn with_content(mut self, has_content: bool) -> Self {
        self.has_content = has_content;
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}
