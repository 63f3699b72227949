//! JSONL file writer for lifecycle events.
//!
//! Each [`LifecycleEvent`] is serialized as a single JSON line with a
//! `type` field and `timestamp`, appended to the file via a buffered writer.
//! Existing logs are extended, never truncated, so one file can hold the
//! audit trail of many runs.

use roster_application::ports::lifecycle_logger::{LifecycleEvent, LifecycleEventLogger};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL lifecycle logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlLifecycleLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlLifecycleLogger {
    /// Open (or create) the log at the given path in append mode.
    ///
    /// Creates parent directories if needed.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create event log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open event log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LifecycleEventLogger for JsonlLifecycleLogger {
    fn log(&self, event: LifecycleEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let record = if let serde_json::Value::Object(mut map) = event.payload {
            map.insert(
                "type".to_string(),
                serde_json::Value::String(event.event_type.to_string()),
            );
            map.insert(
                "timestamp".to_string(),
                serde_json::Value::String(timestamp),
            );
            serde_json::Value::Object(map)
        } else {
            serde_json::json!({
                "type": event.event_type,
                "timestamp": timestamp,
                "data": event.payload,
            })
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlLifecycleLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_domain::{SessionId, SessionStatus, TransitionError};

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_record_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit").join("lifecycle.jsonl");
        let logger = JsonlLifecycleLogger::new(&path).unwrap();
        let id = SessionId::from("s1");

        logger.log(LifecycleEvent::transition_applied(
            &id,
            SessionStatus::Draft,
            SessionStatus::Scheduled,
            4,
        ));
        logger.log(LifecycleEvent::transition_rejected(
            &id,
            SessionStatus::Scheduled,
            Some(SessionStatus::Deleted),
            &TransitionError::InvalidReason {
                min_chars: 5,
                actual_chars: 2,
            },
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        for record in &records {
            assert!(record.get("timestamp").is_some());
        }

        assert_eq!(records[0]["type"], "transition_applied");
        assert_eq!(records[0]["session_id"], "s1");
        assert_eq!(records[0]["from"], "draft");
        assert_eq!(records[0]["to"], "scheduled");
        assert_eq!(records[0]["version"], 4);

        assert_eq!(records[1]["type"], "transition_rejected");
        assert_eq!(records[1]["target"], "deleted");
        assert_eq!(records[1]["error"]["kind"], "invalid_reason");
    }

    #[test]
    fn test_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lifecycle.jsonl");

        for _ in 0..2 {
            let logger = JsonlLifecycleLogger::new(&path).unwrap();
            logger.log(LifecycleEvent::new("tick", serde_json::json!({"advanced": 0})));
        }

        assert_eq!(read_lines(&path).len(), 2);
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lifecycle.jsonl");
        let logger = JsonlLifecycleLogger::new(&path).unwrap();

        logger.log(LifecycleEvent::new("note", serde_json::json!("just a string")));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["type"], "note");
        assert_eq!(records[0]["data"], "just a string");
    }
}
