//! Infrastructure layer for team-roster
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: configuration file loading, session stores
//! and the lifecycle audit log.

pub mod config;
pub mod logging;
pub mod store;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileCalendarConfig, FileConfig, FileEngineConfig,
    FileOutputConfig, FileOutputFormat, FileStorageConfig,
};
pub use logging::JsonlLifecycleLogger;
pub use store::{InMemorySessionRepository, JsonSessionStore, StoreError};
