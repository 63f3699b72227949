//! Schedule conflict detector and move planning.
//!
//! - [`placement::Placement`]: a half-open `[start, start + duration)` window
//! - [`conflict`]: live (`check_conflicts`) and batch (`detect_all`) overlap detection
//! - [`reschedule`]: moving a draft to another day, with advisory conflicts
//! - [`calendar::TeamCalendar`]: the team's zone and week start

pub mod calendar;
pub mod conflict;
pub mod placement;
pub mod reschedule;

pub use calendar::TeamCalendar;
pub use conflict::{check_conflicts, conflict_map, detect_all};
pub use placement::Placement;
pub use reschedule::{MoveOutcome, MovePlan, MoveRequest, plan_move};
