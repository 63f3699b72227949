//! Session repository port
//!
//! Persistence for training sessions with optimistic concurrency.

use async_trait::async_trait;
use roster_domain::{SessionId, TeamId, TrainingSession};
use thiserror::Error;

/// Errors that can occur during repository operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Version conflict: expected {expected}, found {actual}")]
    VersionConflict { expected: u64, actual: u64 },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl RepositoryError {
    pub fn is_version_conflict(&self) -> bool {
        matches!(self, RepositoryError::VersionConflict { .. })
    }
}

/// Store of training sessions.
///
/// `save` is a compare-and-swap: it only writes when the stored version
/// still equals `expected_version` (`0` for a session not stored yet), and
/// returns the stored copy with its version bumped.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn get(&self, id: &SessionId) -> Result<TrainingSession, RepositoryError>;

    /// Every session of the team, deleted ones included.
    async fn list_for_team(&self, team_id: &TeamId)
    -> Result<Vec<TrainingSession>, RepositoryError>;

    async fn save(
        &self,
        session: TrainingSession,
        expected_version: u64,
    ) -> Result<TrainingSession, RepositoryError>;
}
