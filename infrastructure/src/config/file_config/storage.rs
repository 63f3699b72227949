//! Storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw storage configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// JSON session store used when `--data` is not given
    pub data_file: String,
    /// Append lifecycle events to this JSONL file
    pub event_log: Option<String>,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            data_file: "sessions.json".to_string(),
            event_log: None,
        }
    }
}

impl FileStorageConfig {
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_file)
    }

    pub fn event_log_path(&self) -> Option<PathBuf> {
        self.event_log
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_section() {
        let toml_str = r#"
[storage]
data_file = "/var/lib/roster/u18.json"
event_log = ""
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.storage.data_path(),
            PathBuf::from("/var/lib/roster/u18.json")
        );
        assert_eq!(config.storage.event_log_path(), None);
    }
}
