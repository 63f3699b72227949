//! Engine configuration from TOML (`[engine]` section)

use roster_domain::LifecyclePolicy;
use roster_domain::focus::FOCUS_CEILING;
use roster_domain::lifecycle::MIN_REASON_CHARS;
use serde::{Deserialize, Serialize};

/// Raw engine configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEngineConfig {
    /// Soft ceiling on summed focus percentages
    pub focus_ceiling: u64,
    /// Minimum characters in a deletion reason
    pub min_deletion_reason_chars: usize,
    /// Re-fetch attempts after a lost compare-and-swap
    pub max_version_retries: usize,
}

impl Default for FileEngineConfig {
    fn default() -> Self {
        Self {
            focus_ceiling: FOCUS_CEILING,
            min_deletion_reason_chars: MIN_REASON_CHARS,
            max_version_retries: 3,
        }
    }
}

impl FileEngineConfig {
    pub fn to_policy(&self) -> LifecyclePolicy {
        LifecyclePolicy::default()
            .with_focus_ceiling(self.focus_ceiling)
            .with_min_reason_chars(self.min_deletion_reason_chars)
    }
}
