//! Inspect Session use case.
//!
//! Everything a session detail view shows: focus report, draft readiness,
//! conflicts with the rest of the team and the countdown clock.

use crate::config::EngineConfig;
use crate::ports::content_catalog::ContentCatalog;
use crate::ports::session_repository::{RepositoryError, SessionRepository};
use chrono::{DateTime, Utc};
use roster_domain::focus::validate_focus_with_ceiling;
use roster_domain::lifecycle::{clock, next_automatic_transition};
use roster_domain::{
    DraftReadiness, FocusReport, Placement, SessionId, SessionStatus, TrainingSession,
    TransitionAction, check_conflicts,
};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InspectSessionError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionInspection {
    pub session: TrainingSession,
    pub focus: FocusReport,
    pub readiness: DraftReadiness,
    pub conflicts: BTreeSet<SessionId>,
    pub minutes_until_start: Option<i64>,
    pub minutes_remaining: Option<i64>,
    /// Share of the planned window elapsed, only while in progress.
    pub elapsed_fraction: Option<f64>,
    /// What the next scheduler tick would do.
    pub pending_action: Option<TransitionAction>,
}

pub struct InspectSessionUseCase {
    repository: Arc<dyn SessionRepository>,
    catalog: Arc<dyn ContentCatalog>,
    config: EngineConfig,
}

impl InspectSessionUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        catalog: Arc<dyn ContentCatalog>,
        config: EngineConfig,
    ) -> Self {
        Self {
            repository,
            catalog,
            config,
        }
    }

    pub async fn execute(
        &self,
        session_id: &SessionId,
        now: DateTime<Utc>,
    ) -> Result<SessionInspection, InspectSessionError> {
        let session = self.repository.get(session_id).await?;
        let has_content = self.catalog.has_content(session_id).await?;
        let team_sessions = self.repository.list_for_team(&session.team_id).await?;

        let conflicts = if session.is_deleted() {
            BTreeSet::new()
        } else {
            Placement::of(&session)
                .map(|p| check_conflicts(&p, &team_sessions))
                .unwrap_or_default()
        };

        Ok(SessionInspection {
            focus: validate_focus_with_ceiling(
                &session.focus_allocation,
                self.config.policy.focus_ceiling,
            ),
            readiness: DraftReadiness::assess(&session, has_content, &self.config.policy),
            conflicts,
            minutes_until_start: clock::minutes_until_start(&session, now),
            minutes_remaining: clock::minutes_remaining(&session, now),
            elapsed_fraction: (session.status == SessionStatus::InProgress)
                .then(|| clock::elapsed_fraction(&session, now))
                .flatten(),
            pending_action: next_automatic_transition(&session, now),
            session,
        })
    }
}
