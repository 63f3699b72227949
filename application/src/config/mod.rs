//! Application-level configuration.
//!
//! - [`EngineConfig`]: policy, team calendar and retry limits shared by every use case

pub mod engine_config;

pub use engine_config::EngineConfig;
