//! Draft completeness indicator.
//!
//! Advisory only. Whether a draft may actually be scheduled is decided by
//! [`missing_draft_fields`](super::machine::missing_draft_fields); this
//! report adds the softer signals (location, focus) on top.

use super::machine::missing_draft_fields;
use super::policy::LifecyclePolicy;
use crate::core::error::DraftField;
use crate::focus::{FocusReport, validate_focus_with_ceiling};
use crate::session::entities::TrainingSession;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessCheck {
    Schedule,
    Objective,
    Location,
    Content,
    Focus,
}

impl ReadinessCheck {
    pub const ALL: [ReadinessCheck; 5] = [
        ReadinessCheck::Schedule,
        ReadinessCheck::Objective,
        ReadinessCheck::Location,
        ReadinessCheck::Content,
        ReadinessCheck::Focus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadinessCheck::Schedule => "schedule",
            ReadinessCheck::Objective => "objective",
            ReadinessCheck::Location => "location",
            ReadinessCheck::Content => "content",
            ReadinessCheck::Focus => "focus",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessWarning {
    /// Focus total is above the policy ceiling.
    FocusOverCeiling { total: u64, ceiling: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftReadiness {
    pub passed: Vec<ReadinessCheck>,
    pub pending: Vec<ReadinessCheck>,
    /// 0..=100, rounded down.
    pub percent: u8,
    pub focus: FocusReport,
    pub warnings: Vec<ReadinessWarning>,
    /// Fields still blocking `draft → scheduled`.
    pub blocking: Vec<DraftField>,
}

impl DraftReadiness {
    pub fn assess(
        session: &TrainingSession,
        has_content: bool,
        policy: &LifecyclePolicy,
    ) -> Self {
        let focus = validate_focus_with_ceiling(&session.focus_allocation, policy.focus_ceiling);

        let (passed, pending): (Vec<_>, Vec<_>) =
            ReadinessCheck::ALL.into_iter().partition(|check| match check {
                ReadinessCheck::Schedule => {
                    session.start_at.is_some() && session.duration_minutes().is_some()
                }
                ReadinessCheck::Objective => session.has_objective(),
                ReadinessCheck::Location => session.has_location(),
                ReadinessCheck::Content => has_content,
                ReadinessCheck::Focus => focus.is_planned(),
            });

        let percent = (passed.len() * 100 / ReadinessCheck::ALL.len()) as u8;

        let mut warnings = Vec::new();
        if focus.exceeds_ceiling {
            warnings.push(ReadinessWarning::FocusOverCeiling {
                total: focus.total,
                ceiling: policy.focus_ceiling,
            });
        }

        Self {
            passed,
            pending,
            percent,
            focus,
            warnings,
            blocking: missing_draft_fields(session, has_content),
        }
    }

    pub fn can_schedule(&self) -> bool {
        self.blocking.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::FocusAllocation;
    use crate::session::entities::SessionType;
    use chrono::{TimeZone, Utc};

    fn draft() -> TrainingSession {
        TrainingSession::new_draft("s1", "team", SessionType::Court)
            .with_start(Utc.with_ymd_and_hms(2026, 5, 4, 18, 0, 0).unwrap())
            .with_duration(90)
            .with_objective("Zone press")
    }

    #[test]
    fn test_empty_draft() {
        let readiness = DraftReadiness::assess(
            &TrainingSession::new_draft("s1", "team", SessionType::Court),
            false,
            &LifecyclePolicy::default(),
        );
        assert_eq!(readiness.percent, 0);
        assert!(!readiness.can_schedule());
        assert_eq!(readiness.pending.len(), 5);
    }

    #[test]
    fn test_unplanned_focus_lowers_indicator_only() {
        let readiness = DraftReadiness::assess(&draft(), true, &LifecyclePolicy::default());
        assert!(readiness.can_schedule());
        assert_eq!(
            readiness.pending,
            vec![ReadinessCheck::Location, ReadinessCheck::Focus]
        );
        assert_eq!(readiness.percent, 60);
    }

    #[test]
    fn test_complete_draft_with_focus_warning() {
        let session = draft()
            .with_location("Main court")
            .with_focus(FocusAllocation::new([20; 7]));
        let readiness = DraftReadiness::assess(&session, true, &LifecyclePolicy::default());
        assert!(readiness.is_complete());
        assert_eq!(readiness.percent, 100);
        assert_eq!(
            readiness.warnings,
            vec![ReadinessWarning::FocusOverCeiling {
                total: 140,
                ceiling: 120
            }]
        );
    }

    #[test]
    fn test_policy_ceiling_applies() {
        let session = draft().with_focus(FocusAllocation::new([20; 7]));
        let policy = LifecyclePolicy::default().with_focus_ceiling(150);
        let readiness = DraftReadiness::assess(&session, true, &policy);
        assert!(readiness.warnings.is_empty());
    }
}
