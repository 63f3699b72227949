//! Engine parameters: use case control.
//!
//! [`EngineConfig`] groups the static parameters every use case reads.
//! The lifecycle thresholds themselves live in the domain's
//! [`LifecyclePolicy`]; this adds the application-layer concerns around it.

use roster_domain::{LifecyclePolicy, TeamCalendar};

/// Default number of re-fetch attempts after a version conflict.
pub const DEFAULT_MAX_VERSION_RETRIES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Deletion reason length and focus ceiling.
    pub policy: LifecyclePolicy,
    /// Zone and week start used for day grouping and date moves.
    pub calendar: TeamCalendar,
    /// Retries after a lost compare-and-swap before giving up.
    pub max_version_retries: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            policy: LifecyclePolicy::default(),
            calendar: TeamCalendar::default(),
            max_version_retries: DEFAULT_MAX_VERSION_RETRIES,
        }
    }
}

impl EngineConfig {
    // ==================== Builder Methods ====================

    pub fn with_policy(mut self, policy: LifecyclePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_calendar(mut self, calendar: TeamCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn with_max_version_retries(mut self, retries: usize) -> Self {
        self.max_version_retries = retries;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = EngineConfig::default();
        assert_eq!(config.max_version_retries, 3);
        assert_eq!(config.policy.min_reason_chars, 5);
        assert_eq!(config.calendar, TeamCalendar::default());
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::default()
            .with_max_version_retries(0)
            .with_policy(LifecyclePolicy::default().with_focus_ceiling(100));
        assert_eq!(config.max_version_retries, 0);
        assert_eq!(config.policy.focus_ceiling, 100);
    }
}
