//! Auto Advance use case.
//!
//! The scheduler tick: moves every due or overdue session of a team along
//! its time-driven edges. Safe to run repeatedly with the same `now`.

use crate::ports::lifecycle_logger::{LifecycleEvent, LifecycleEventLogger, NoLifecycleLogger};
use crate::ports::session_repository::{RepositoryError, SessionRepository};
use chrono::{DateTime, Utc};
use roster_domain::lifecycle::next_automatic_transition;
use roster_domain::{SessionId, SessionStatus, TeamId, TransitionAction, TransitionContext, transition};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum AutoAdvanceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvancedSession {
    pub session_id: SessionId,
    pub from: SessionStatus,
    pub to: SessionStatus,
    pub steps: Vec<TransitionAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub advanced: Vec<AdvancedSession>,
    /// Sessions changed by someone else mid-tick; the next tick picks them up.
    pub skipped: Vec<SessionId>,
}

impl TickReport {
    pub fn is_idle(&self) -> bool {
        self.advanced.is_empty() && self.skipped.is_empty()
    }
}

pub struct AutoAdvanceUseCase {
    repository: Arc<dyn SessionRepository>,
    event_logger: Arc<dyn LifecycleEventLogger>,
}

impl AutoAdvanceUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self {
            repository,
            event_logger: Arc::new(NoLifecycleLogger),
        }
    }

    /// Create with a lifecycle event logger.
    pub fn with_event_logger(mut self, logger: Arc<dyn LifecycleEventLogger>) -> Self {
        self.event_logger = logger;
        self
    }

    pub async fn tick(
        &self,
        team_id: &TeamId,
        now: DateTime<Utc>,
    ) -> Result<TickReport, AutoAdvanceError> {
        let sessions = self.repository.list_for_team(team_id).await?;
        let context = TransitionContext::at(now);
        let mut report = TickReport::default();

        for session in sessions {
            let mut next = session.clone();
            let mut steps = Vec::new();

            while let Some(action) = next_automatic_transition(&next, now) {
                match transition(&next, action, &context) {
                    Ok(status) if status == next.status => break,
                    Ok(status) => {
                        next.status = status;
                        steps.push(action);
                    }
                    Err(e) => {
                        warn!("Session {} could not {}: {}", next.id, action, e);
                        break;
                    }
                }
            }

            if steps.is_empty() {
                continue;
            }

            match self.repository.save(next, session.version).await {
                Ok(saved) => {
                    info!(
                        "Session {} advanced {} -> {}",
                        saved.id, session.status, saved.status
                    );
                    self.event_logger.log(LifecycleEvent::auto_advanced(
                        &saved.id,
                        session.status,
                        saved.status,
                        &steps,
                    ));
                    report.advanced.push(AdvancedSession {
                        session_id: saved.id,
                        from: session.status,
                        to: saved.status,
                        steps,
                    });
                }
                Err(e) if e.is_version_conflict() => {
                    debug!("Session {} changed during tick ({}), skipping", session.id, e);
                    report.skipped.push(session.id);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(report)
    }
}
