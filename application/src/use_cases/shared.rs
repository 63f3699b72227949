//! Shared utilities for use cases.
//!
//! Contains rejection reporting used by ProposeTransition and
//! RescheduleSession, plus the in-memory port doubles their tests share.

use crate::ports::lifecycle_logger::{LifecycleEvent, LifecycleEventLogger};
use roster_domain::{SessionStatus, TrainingSession, TransitionError};
use tracing::{debug, warn};

/// Trace and record a rejected transition or move.
///
/// `target` is `None` for a rejected move. Terminal-state and
/// graph-skipping attempts mean the caller offered an action it should
/// not have, so they are logged as warnings.
pub(crate) fn report_rejection(
    logger: &dyn LifecycleEventLogger,
    session: &TrainingSession,
    target: Option<SessionStatus>,
    error: &TransitionError,
) {
    let requested = target.map_or("move", |t| t.as_str());
    if error.is_caller_bug() {
        warn!(
            "Rejected {} ({}) for session {}: {}",
            requested, session.status, session.id, error
        );
    } else {
        debug!(
            "Rejected {} ({}) for session {}: {}",
            requested, session.status, session.id, error
        );
    }
    logger.log(LifecycleEvent::transition_rejected(
        &session.id,
        session.status,
        target,
        error,
    ));
}

#[cfg(test)]
pub(crate) mod mocks {
    use crate::ports::content_catalog::ContentCatalog;
    use crate::ports::lifecycle_logger::{LifecycleEvent, LifecycleEventLogger};
    use crate::ports::session_repository::{RepositoryError, SessionRepository};
    use async_trait::async_trait;
    use roster_domain::{SessionId, TeamId, TrainingSession};
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    pub struct MockRepository {
        sessions: Mutex<HashMap<SessionId, TrainingSession>>,
        /// Saves that lose the race to a simulated concurrent writer.
        interference: Mutex<usize>,
        saves: Mutex<usize>,
    }

    impl MockRepository {
        pub fn new(sessions: Vec<TrainingSession>) -> Self {
            Self {
                sessions: Mutex::new(sessions.into_iter().map(|s| (s.id.clone(), s)).collect()),
                interference: Mutex::new(0),
                saves: Mutex::new(0),
            }
        }

        pub fn with_interference(self, count: usize) -> Self {
            *self.interference.lock().unwrap() = count;
            self
        }

        pub fn stored(&self, id: &str) -> TrainingSession {
            self.sessions
                .lock()
                .unwrap()
                .get(&SessionId::from(id))
                .cloned()
                .unwrap()
        }

        pub fn save_count(&self) -> usize {
            *self.saves.lock().unwrap()
        }
    }

    #[async_trait]
    impl SessionRepository for MockRepository {
        async fn get(&self, id: &SessionId) -> Result<TrainingSession, RepositoryError> {
            self.sessions
                .lock()
                .unwrap()
                .get(id)
                .cloned()
                .ok_or_else(|| RepositoryError::NotFound(id.clone()))
        }

        async fn list_for_team(
            &self,
            team_id: &TeamId,
        ) -> Result<Vec<TrainingSession>, RepositoryError> {
            let mut sessions: Vec<_> = self
                .sessions
                .lock()
                .unwrap()
                .values()
                .filter(|s| &s.team_id == team_id)
                .cloned()
                .collect();
            sessions.sort_by(|a, b| a.id.cmp(&b.id));
            Ok(sessions)
        }

        async fn save(
            &self,
            session: TrainingSession,
            expected_version: u64,
        ) -> Result<TrainingSession, RepositoryError> {
            let mut sessions = self.sessions.lock().unwrap();

            {
                let mut interference = self.interference.lock().unwrap();
                if *interference > 0 {
                    *interference -= 1;
                    if let Some(stored) = sessions.get_mut(&session.id) {
                        stored.version += 1;
                    }
                }
            }

            let actual = sessions.get(&session.id).map(|s| s.version).unwrap_or(0);
            if actual != expected_version {
                return Err(RepositoryError::VersionConflict {
                    expected: expected_version,
                    actual,
                });
            }

            let mut saved = session;
            saved.version = actual + 1;
            sessions.insert(saved.id.clone(), saved.clone());
            *self.saves.lock().unwrap() += 1;
            Ok(saved)
        }
    }

    pub struct MockCatalog {
        with_content: HashSet<SessionId>,
    }

    impl MockCatalog {
        pub fn with(ids: &[&str]) -> Self {
            Self {
                with_content: ids.iter().map(|id| SessionId::from(*id)).collect(),
            }
        }

        pub fn empty() -> Self {
            Self::with(&[])
        }
    }

    #[async_trait]
    impl ContentCatalog for MockCatalog {
        async fn has_content(&self, session_id: &SessionId) -> Result<bool, RepositoryError> {
            Ok(self.with_content.contains(session_id))
        }
    }

    #[derive(Default)]
    pub struct RecordingLogger {
        events: Mutex<Vec<LifecycleEvent>>,
    }

    impl RecordingLogger {
        pub fn event_types(&self) -> Vec<&'static str> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .map(|e| e.event_type)
                .collect()
        }

        pub fn events(&self) -> Vec<LifecycleEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl LifecycleEventLogger for RecordingLogger {
        fn log(&self, event: LifecycleEvent) {
            self.events.lock().unwrap().push(event);
        }
    }
}
