//! Reschedule Session use case.
//!
//! Moves a draft to another day (and optionally time). Conflicts at the
//! target are advisory: without `force` the plan is returned unsaved so the
//! caller can confirm.

use crate::config::EngineConfig;
use crate::ports::lifecycle_logger::{LifecycleEvent, LifecycleEventLogger, NoLifecycleLogger};
use crate::ports::session_repository::{RepositoryError, SessionRepository};
use crate::use_cases::shared::report_rejection;
use roster_domain::{MovePlan, MoveRequest, SessionId, TrainingSession, TransitionError, plan_move};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while rescheduling.
#[derive(Error, Debug)]
pub enum RescheduleError {
    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Clone)]
pub struct RescheduleInput {
    pub session_id: SessionId,
    pub request: MoveRequest,
    /// Save even when the target overlaps other sessions.
    pub force: bool,
}

impl RescheduleInput {
    pub fn new(session_id: impl Into<SessionId>, request: MoveRequest) -> Self {
        Self {
            session_id: session_id.into(),
            request,
            force: false,
        }
    }

    pub fn forced(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RescheduleOutput {
    pub plan: MovePlan,
    /// Stored copy after the move, or the untouched session when not saved.
    pub session: TrainingSession,
    pub saved: bool,
}

impl RescheduleOutput {
    /// The move was held back because of conflicts.
    pub fn needs_confirmation(&self) -> bool {
        !self.saved && !self.plan.is_unchanged() && self.plan.has_conflicts()
    }
}

pub struct RescheduleSessionUseCase {
    repository: Arc<dyn SessionRepository>,
    event_logger: Arc<dyn LifecycleEventLogger>,
    config: EngineConfig,
}

impl RescheduleSessionUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>, config: EngineConfig) -> Self {
        Self {
            repository,
            event_logger: Arc::new(NoLifecycleLogger),
            config,
        }
    }

    /// Create with a lifecycle event logger.
    pub fn with_event_logger(mut self, logger: Arc<dyn LifecycleEventLogger>) -> Self {
        self.event_logger = logger;
        self
    }

    pub async fn execute(&self, input: RescheduleInput) -> Result<RescheduleOutput, RescheduleError> {
        let mut attempts = 0;

        loop {
            attempts += 1;
            let session = self.repository.get(&input.session_id).await?;
            let team_sessions = self.repository.list_for_team(&session.team_id).await?;

            let plan = match plan_move(
                &session,
                &input.request,
                &self.config.calendar,
                &team_sessions,
            ) {
                Ok(plan) => plan,
                Err(e) => {
                    report_rejection(self.event_logger.as_ref(), &session, None, &e);
                    return Err(e.into());
                }
            };

            if plan.is_unchanged() {
                debug!("Session {} already on {}", session.id, input.request.target_date);
                return Ok(RescheduleOutput {
                    plan,
                    session,
                    saved: false,
                });
            }

            if plan.has_conflicts() && !input.force {
                info!(
                    "Move of session {} held back: overlaps {} session(s)",
                    session.id,
                    plan.conflicts.len()
                );
                return Ok(RescheduleOutput {
                    plan,
                    session,
                    saved: false,
                });
            }

            let moved = plan.apply(&session);
            match self.repository.save(moved, session.version).await {
                Ok(saved) => {
                    info!(
                        "Session {} moved to {:?}{}",
                        saved.id,
                        saved.start_at,
                        if plan.has_conflicts() { " despite conflicts" } else { "" }
                    );
                    self.event_logger.log(LifecycleEvent::session_moved(
                        &saved.id,
                        saved.start_at,
                        &plan.conflicts,
                        input.force,
                    ));
                    return Ok(RescheduleOutput {
                        plan,
                        session: saved,
                        saved: true,
                    });
                }
                Err(e) if e.is_version_conflict() && attempts <= self.config.max_version_retries => {
                    debug!("Session {} changed underneath us ({}), retrying", session.id, e);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
