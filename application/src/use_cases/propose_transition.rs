//! Propose Transition use case.
//!
//! Loads a session, asks the content catalog for the readiness fact it
//! owns, runs the lifecycle machine and persists the result with a
//! compare-and-swap. A lost race re-fetches and re-judges the fresh record.

use crate::config::EngineConfig;
use crate::ports::content_catalog::ContentCatalog;
use crate::ports::lifecycle_logger::{LifecycleEvent, LifecycleEventLogger, NoLifecycleLogger};
use crate::ports::session_repository::{RepositoryError, SessionRepository};
use crate::use_cases::shared::report_rejection;
use chrono::{DateTime, Utc};
use roster_domain::lifecycle::propose_transition_with_policy;
use roster_domain::{SessionId, SessionStatus, TrainingSession, TransitionContext, TransitionError};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while proposing a transition.
#[derive(Error, Debug)]
pub enum ProposeTransitionError {
    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Input for the [`ProposeTransitionUseCase`].
#[derive(Debug, Clone)]
pub struct ProposeTransitionInput {
    pub session_id: SessionId,
    pub target: SessionStatus,
    /// Required when `target` is `Deleted`.
    pub reason: Option<String>,
    pub now: DateTime<Utc>,
}

impl ProposeTransitionInput {
    pub fn new(session_id: impl Into<SessionId>, target: SessionStatus, now: DateTime<Utc>) -> Self {
        Self {
            session_id: session_id.into(),
            target,
            reason: None,
            now,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProposeTransitionOutput {
    pub session: TrainingSession,
    pub from: SessionStatus,
    /// False when the request was an idempotent no-op and nothing was saved.
    pub changed: bool,
    /// Attempts used, 1 when the first save won.
    pub attempts: usize,
}

/// Use case for requesting a lifecycle transition.
pub struct ProposeTransitionUseCase {
    repository: Arc<dyn SessionRepository>,
    catalog: Arc<dyn ContentCatalog>,
    event_logger: Arc<dyn LifecycleEventLogger>,
    config: EngineConfig,
}

impl Clone for ProposeTransitionUseCase {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            catalog: self.catalog.clone(),
            event_logger: self.event_logger.clone(),
            config: self.config,
        }
    }
}

impl ProposeTransitionUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        catalog: Arc<dyn ContentCatalog>,
        config: EngineConfig,
    ) -> Self {
        Self {
            repository,
            catalog,
            event_logger: Arc::new(NoLifecycleLogger),
            config,
        }
    }

    /// Create with a lifecycle event logger.
    pub fn with_event_logger(mut self, logger: Arc<dyn LifecycleEventLogger>) -> Self {
        self.event_logger = logger;
        self
    }

    pub async fn execute(
        &self,
        input: ProposeTransitionInput,
    ) -> Result<ProposeTransitionOutput, ProposeTransitionError> {
        let mut attempts = 0;

        loop {
            attempts += 1;
            let current = self.repository.get(&input.session_id).await?;

            // Content only gates scheduling; skip the lookup otherwise.
            let has_content = if input.target == SessionStatus::Scheduled {
                self.catalog.has_content(&current.id).await?
            } else {
                false
            };

            let mut context = TransitionContext::at(input.now).with_content(has_content);
            if let Some(reason) = &input.reason {
                context = context.with_reason(reason.clone());
            }

            let next = match propose_transition_with_policy(
                &current,
                input.target,
                &context,
                &self.config.policy,
            ) {
                Ok(next) => next,
                Err(e) => {
                    report_rejection(
                        self.event_logger.as_ref(),
                        &current,
                        Some(input.target),
                        &e,
                    );
                    return Err(e.into());
                }
            };

            if next.status == current.status {
                debug!(
                    "Session {} already {}, nothing to save",
                    current.id, current.status
                );
                return Ok(ProposeTransitionOutput {
                    session: current.clone(),
                    from: current.status,
                    changed: false,
                    attempts,
                });
            }

            match self.repository.save(next, current.version).await {
                Ok(saved) => {
                    info!(
                        "Session {}: {} -> {} (version {})",
                        saved.id, current.status, saved.status, saved.version
                    );
                    self.event_logger.log(LifecycleEvent::transition_applied(
                        &saved.id,
                        current.status,
                        saved.status,
                        saved.version,
                    ));
                    return Ok(ProposeTransitionOutput {
                        session: saved,
                        from: current.status,
                        changed: true,
                        attempts,
                    });
                }
                Err(e) if e.is_version_conflict() && attempts <= self.config.max_version_retries => {
                    debug!(
                        "Session {} changed underneath us ({}), retrying",
                        current.id, e
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
