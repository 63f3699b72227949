//! In-memory session repository.

use async_trait::async_trait;
use roster_application::ports::content_catalog::ContentCatalog;
use roster_application::ports::session_repository::{RepositoryError, SessionRepository};
use roster_domain::{SessionId, TeamId, TrainingSession};
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

/// Process-local store for embedding the engine or for tests.
///
/// Compare-and-swap semantics match [`JsonSessionStore`](super::JsonSessionStore).
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Mutex<BTreeMap<SessionId, TrainingSession>>,
    with_content: Mutex<HashSet<SessionId>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sessions(sessions: impl IntoIterator<Item = TrainingSession>) -> Self {
        Self {
            sessions: Mutex::new(sessions.into_iter().map(|s| (s.id.clone(), s)).collect()),
            with_content: Mutex::new(HashSet::new()),
        }
    }

    /// Record that content has been attached to a session.
    pub fn attach_content(
        &self,
        session_id: impl Into<SessionId>,
    ) -> Result<(), RepositoryError> {
        let mut ids = self.with_content.lock().map_err(|_| poisoned())?;
        ids.insert(session_id.into());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::Storage("session store lock poisoned".to_string())
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn get(&self, id: &SessionId) -> Result<TrainingSession, RepositoryError> {
        let sessions = self.sessions.lock().map_err(|_| poisoned())?;
        sessions
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))
    }

    async fn list_for_team(
        &self,
        team_id: &TeamId,
    ) -> Result<Vec<TrainingSession>, RepositoryError> {
        let sessions = self.sessions.lock().map_err(|_| poisoned())?;
        Ok(sessions
            .values()
            .filter(|s| &s.team_id == team_id)
            .cloned()
            .collect())
    }

    async fn save(
        &self,
        session: TrainingSession,
        expected_version: u64,
    ) -> Result<TrainingSession, RepositoryError> {
        let mut sessions = self.sessions.lock().map_err(|_| poisoned())?;
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
        Ok(saved)
    }
}

#[async_trait]
impl ContentCatalog for InMemorySessionRepository {
    async fn has_content(&self, session_id: &SessionId) -> Result<bool, RepositoryError> {
        let ids = self.with_content.lock().map_err(|_| poisoned())?;
        Ok(ids.contains(session_id))
    }
}
