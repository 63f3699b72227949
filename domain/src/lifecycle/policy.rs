//! Tunable thresholds used by the lifecycle machine.

use crate::focus::FOCUS_CEILING;
use serde::{Deserialize, Serialize};

/// Minimum characters in a deletion reason.
pub const MIN_REASON_CHARS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecyclePolicy {
    /// Minimum characters (after trimming) in a deletion reason.
    pub min_reason_chars: usize,
    /// Soft ceiling on summed focus percentages; above it readiness warns.
    pub focus_ceiling: u64,
}

impl Default for LifecyclePolicy {
    fn default() -> Self {
        Self {
            min_reason_chars: MIN_REASON_CHARS,
            focus_ceiling: FOCUS_CEILING,
        }
    }
}

impl LifecyclePolicy {
    pub fn with_min_reason_chars(mut self, chars: usize) -> Self {
        self.min_reason_chars = chars;
        self
    }

    pub fn with_focus_ceiling(mut self, ceiling: u64) -> Self {
        self.focus_ceiling = ceiling;
        self
    }
}
