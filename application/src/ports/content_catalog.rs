//! Content catalog port
//!
//! Exercises and drills are authored elsewhere; the lifecycle only needs
//! to know whether a session has any.

use super::session_repository::RepositoryError;
use async_trait::async_trait;
use roster_domain::SessionId;

#[async_trait]
pub trait ContentCatalog: Send + Sync {
    /// At least one content item is attached to the session.
    async fn has_content(&self, session_id: &SessionId) -> Result<bool, RepositoryError>;
}
