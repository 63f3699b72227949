//! Session lifecycle machine.
//!
//! - [`machine`]: transition guards, the pure `transition`/`propose_transition` pair
//!   and the time-driven `is_due`/`is_overdue` checks
//! - [`action::TransitionAction`]: the five requested steps
//! - [`policy::LifecyclePolicy`]: tunable thresholds
//! - [`readiness::DraftReadiness`]: advisory completeness indicator
//! - [`clock`]: countdown helpers

pub mod action;
pub mod clock;
pub mod machine;
pub mod policy;
pub mod readiness;

pub use action::{TransitionAction, TransitionContext};
pub use machine::{
    ensure_movable, is_due, is_overdue, is_repeated_step, missing_draft_fields,
    next_automatic_transition, propose_transition, propose_transition_with_policy, transition,
    transition_with_policy,
};
pub use policy::{LifecyclePolicy, MIN_REASON_CHARS};
pub use readiness::{DraftReadiness, ReadinessCheck, ReadinessWarning};
