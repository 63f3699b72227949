//! JSON file session store.
//!
//! The whole file is one document:
//!
//! ```json
//! {
//!   "sessions": [ { "id": "s1", "team_id": "u18", "status": "draft", ... } ],
//!   "content": { "s1": ["drill-12", "drill-40"] }
//! }
//! ```
//!
//! `content` lists the exercises attached to each session and backs the
//! [`ContentCatalog`] port. Writes go to a sibling temp file first and are
//! renamed into place.

use async_trait::async_trait;
use roster_application::ports::content_catalog::ContentCatalog;
use roster_application::ports::session_repository::{RepositoryError, SessionRepository};
use roster_domain::{SessionId, TeamId, TrainingSession};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Errors from reading or writing the store file
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed store file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate session id {0} in store file")]
    DuplicateId(SessionId),

    #[error("Session not found: {0}")]
    UnknownSession(SessionId),
}

impl From<StoreError> for RepositoryError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UnknownSession(id) => RepositoryError::NotFound(id),
            other => RepositoryError::Storage(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    sessions: Vec<TrainingSession>,
    #[serde(default)]
    content: BTreeMap<SessionId, Vec<String>>,
}

/// File-backed [`SessionRepository`] and [`ContentCatalog`].
pub struct JsonSessionStore {
    path: PathBuf,
    document: Mutex<StoreDocument>,
}

impl JsonSessionStore {
    /// Open the store, starting empty when the file does not exist yet.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let document = match fs::read_to_string(&path).await {
            Ok(text) if text.trim().is_empty() => StoreDocument::default(),
            Ok(text) => serde_json::from_str(&text).map_err(|source| StoreError::Json {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("Store {} not found, starting empty", path.display());
                StoreDocument::default()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let mut seen = std::collections::HashSet::new();
        for session in &document.sessions {
            if !seen.insert(&session.id) {
                return Err(StoreError::DuplicateId(session.id.clone()));
            }
        }

        debug!(
            "Opened store {} with {} sessions",
            path.display(),
            document.sessions.len()
        );

        Ok(Self {
            path,
            document: Mutex::new(document),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Attach content items to a stored session and persist.
    ///
    /// Returns the session's full content list. Nothing changes in memory
    /// when the write fails.
    pub async fn attach_content(
        &self,
        session_id: &SessionId,
        items: impl IntoIterator<Item = String>,
    ) -> Result<Vec<String>, StoreError> {
        let mut document = self.document.lock().await;
        if !document.sessions.iter().any(|s| &s.id == session_id) {
            return Err(StoreError::UnknownSession(session_id.clone()));
        }

        let previous = document.content.get(session_id).cloned();
        let entry = document.content.entry(session_id.clone()).or_default();
        entry.extend(items);
        let attached = entry.clone();

        if let Err(e) = self.persist(&document).await {
            match previous {
                Some(items) => document.content.insert(session_id.clone(), items),
                None => document.content.remove(session_id),
            };
            return Err(e);
        }

        debug!("Session {} now has {} content items", session_id, attached.len());
        Ok(attached)
    }

    async fn persist(&self, document: &StoreDocument) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(document).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text).await.map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

#[async_trait]
impl SessionRepository for JsonSessionStore {
    async fn get(&self, id: &SessionId) -> Result<TrainingSession, RepositoryError> {
        let document = self.document.lock().await;
        document
            .sessions
            .iter()
            .find(|s| &s.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))
    }

    async fn list_for_team(
        &self,
        team_id: &TeamId,
    ) -> Result<Vec<TrainingSession>, RepositoryError> {
        let document = self.document.lock().await;
        Ok(document
            .sessions
            .iter()
            .filter(|s| &s.team_id == team_id)
            .cloned()
            .collect())
    }

    async fn save(
        &self,
        session: TrainingSession,
        expected_version: u64,
    ) -> Result<TrainingSession, RepositoryError> {
        let mut document = self.document.lock().await;
        let position = document.sessions.iter().position(|s| s.id == session.id);
        let actual = position
            .map(|i| document.sessions[i].version)
            .unwrap_or(0);

        if actual != expected_version {
            return Err(RepositoryError::VersionConflict {
                expected: expected_version,
                actual,
            });
        }

        let mut saved = session;
        saved.version = actual + 1;

        let previous = match position {
            Some(i) => Some(std::mem::replace(&mut document.sessions[i], saved.clone())),
            None => {
                document.sessions.push(saved.clone());
                None
            }
        };

        if let Err(e) = self.persist(&document).await {
            // Keep memory and disk in step.
            match (position, previous) {
                (Some(i), Some(old)) => document.sessions[i] = old,
                _ => {
                    document.sessions.pop();
                }
            }
            return Err(e.into());
        }

        debug!("Saved session {} at version {}", saved.id, saved.version);
        Ok(saved)
    }
}

#[async_trait]
impl ContentCatalog for JsonSessionStore {
    async fn has_content(&self, session_id: &SessionId) -> Result<bool, RepositoryError> {
        let document = self.document.lock().await;
        Ok(document
            .content
            .get(session_id)
            .is_some_and(|items| !items.is_empty()))
    }
}
