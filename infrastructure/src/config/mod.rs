//! Configuration file loading for team-roster
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TEAM_ROSTER_<SECTION>__<KEY>` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./roster.toml` or `./.roster.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/team-roster/config.toml`
//! 5. Fallback: `~/.config/team-roster/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileCalendarConfig, FileConfig, FileEngineConfig, FileOutputConfig,
    FileOutputFormat, FileStorageConfig,
};
pub use loader::ConfigLoader;
