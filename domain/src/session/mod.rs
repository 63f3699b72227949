//! Training session domain.
//!
//! - [`entities::TrainingSession`]: the central entity
//! - [`entities::SessionStatus`]: the closed set of lifecycle states
//! - [`entities::AttendanceSummary`] / [`entities::ExecutionOutcome`]: read-only facts
//!   recorded by other subsystems

pub mod entities;
