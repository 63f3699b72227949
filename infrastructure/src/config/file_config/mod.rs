//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types on demand.

mod calendar;
mod engine;
mod output;
mod storage;

pub use calendar::{FileCalendarConfig, MAX_UTC_OFFSET_MINUTES};
pub use engine::FileEngineConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use storage::FileStorageConfig;

use roster_application::EngineConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("engine.focus_ceiling cannot be 0")]
    ZeroFocusCeiling,

    #[error("engine.min_deletion_reason_chars cannot be 0")]
    ZeroReasonLength,

    #[error("calendar.utc_offset_minutes {0} is outside ±18h")]
    OffsetOutOfRange(i32),

    #[error("calendar.week_start: unknown day '{0}'")]
    UnknownWeekStart(String),

    #[error("storage.data_file cannot be empty")]
    EmptyDataFile,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Lifecycle thresholds and retry limits
    pub engine: FileEngineConfig,
    /// Team time zone and week start
    pub calendar: FileCalendarConfig,
    /// Session store and event log locations
    pub storage: FileStorageConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.engine.focus_ceiling == 0 {
            issues.push(ConfigValidationError::ZeroFocusCeiling);
        }
        if self.engine.min_deletion_reason_chars == 0 {
            issues.push(ConfigValidationError::ZeroReasonLength);
        }
        if !self.calendar.offset_in_range() {
            issues.push(ConfigValidationError::OffsetOutOfRange(
                self.calendar.utc_offset_minutes,
            ));
        }
        if self.calendar.parse_week_start().is_none() {
            issues.push(ConfigValidationError::UnknownWeekStart(
                self.calendar.week_start.clone(),
            ));
        }
        if self.storage.data_file.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyDataFile);
        }

        issues
    }

    /// Application settings, or the first validation issue.
    pub fn to_engine_config(&self) -> Result<EngineConfig, ConfigValidationError> {
        if let Some(issue) = self.validate().into_iter().next() {
            return Err(issue);
        }
        let calendar = self.calendar.to_calendar().ok_or_else(|| {
            ConfigValidationError::UnknownWeekStart(self.calendar.week_start.clone())
        })?;

        Ok(EngineConfig::default()
            .with_policy(self.engine.to_policy())
            .with_calendar(calendar)
            .with_max_version_retries(self.engine.max_version_retries))
    }
}
