//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod auto_advance;
pub mod build_agenda;
pub mod inspect_session;
pub mod propose_transition;
pub mod reschedule_session;
pub(crate) mod shared;
