//! Focus allocation validator.
//!
//! A session distributes its intended training load over seven fixed
//! categories. Validation is advisory: an over-allocated session is
//! flagged, never rejected.

pub mod allocation;
pub mod report;

pub use allocation::{FocusAllocation, FocusCategory};
pub use report::{FOCUS_CEILING, FocusReport, validate_focus, validate_focus_with_ceiling};
