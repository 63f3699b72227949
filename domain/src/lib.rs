//! Domain layer for team-roster
//!
//! This crate contains the training session lifecycle and scheduling engine.
//! It has no dependencies on infrastructure or presentation concerns, and
//! every operation is a synchronous pure function: "now" is always passed in.
//!
//! # Components
//!
//! - **Focus** ([`focus`]): validates a session's seven-category training-load split
//! - **Schedule** ([`schedule`]): detects overlapping sessions and plans date moves
//! - **Lifecycle** ([`lifecycle`]): the `draft → scheduled → in_progress →
//!   pending_review → readonly` state machine and its guards
//! - **Agenda** ([`agenda`]): read-only day/week/month projections for display

pub mod agenda;
pub mod core;
pub mod focus;
pub mod lifecycle;
pub mod schedule;
pub mod session;

// Re-export commonly used types
pub use agenda::{AgendaEntry, AgendaGridBuilder, CalendarMonth, DayBucket};
pub use core::{
    error::{DraftField, TransitionError},
    ids::{SessionId, TeamId},
};
pub use focus::{FocusAllocation, FocusCategory, FocusReport, validate_focus};
pub use lifecycle::{
    DraftReadiness, LifecyclePolicy, TransitionAction, TransitionContext, propose_transition,
    transition,
};
pub use schedule::{
    MoveOutcome, MovePlan, MoveRequest, Placement, TeamCalendar, check_conflicts, detect_all,
    plan_move,
};
pub use session::entities::{
    AttendanceSummary, ExecutionOutcome, SessionStatus, SessionType, TrainingSession,
};
