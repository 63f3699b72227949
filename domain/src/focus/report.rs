//! Focus allocation validation.

use super::allocation::{FocusAllocation, FocusCategory};
use serde::{Deserialize, Serialize};

/// Soft ceiling on the summed focus percentages.
///
/// Categories may overlap in intent, so a sum above 100 is normal and
/// only a sum above this value is worth a warning.
pub const FOCUS_CEILING: u64 = 120;

/// Result of validating a focus allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusReport {
    pub total: u64,
    /// Warning only; never blocks a transition.
    pub exceeds_ceiling: bool,
    /// Every category is zero: "not yet planned".
    pub is_empty: bool,
    /// Category with the largest share (first in order on ties).
    pub dominant: Option<FocusCategory>,
}

impl FocusReport {
    pub fn is_planned(&self) -> bool {
        !self.is_empty
    }
}

/// Validate against the default ceiling of [`FOCUS_CEILING`].
///
/// ```
/// use roster_domain::focus::{FocusAllocation, validate_focus};
///
/// let report = validate_focus(&FocusAllocation::new([20; 7]));
/// assert_eq!(report.total, 140);
/// assert!(report.exceeds_ceiling);
///
/// let empty = validate_focus(&FocusAllocation::default());
/// assert!(empty.is_empty);
/// ```
pub fn validate_focus(allocation: &FocusAllocation) -> FocusReport {
    validate_focus_with_ceiling(allocation, FOCUS_CEILING)
}

pub fn validate_focus_with_ceiling(allocation: &FocusAllocation, ceiling: u64) -> FocusReport {
    let total = allocation.total();
    let is_empty = allocation.is_zero();

    let dominant = if is_empty {
        None
    } else {
        // max_by_key keeps the last maximum, so scan in reverse to keep the first.
        allocation
            .iter()
            .rev()
            .max_by_key(|(_, value)| *value)
            .map(|(category, _)| category)
    };

    FocusReport {
        total,
        exceeds_ceiling: total > ceiling,
        is_empty,
        dominant,
    }
}
