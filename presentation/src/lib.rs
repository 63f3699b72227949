//! Presentation layer for team-roster
//!
//! This crate contains CLI definitions and output formatters.
//! Status colours and labels live here and nowhere else.

pub mod cli;
pub mod config;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, Commands, OutputFormat};
pub use config::OutputConfig;
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use output::json::JsonFormatter;
