//! Presentation-level configuration
//!
//! Resolves how results are printed from CLI flags and the `[output]`
//! section of the config file.

use crate::cli::commands::OutputFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            color: true,
        }
    }
}

impl OutputConfig {
    /// CLI flags win over file settings. JSON output is never coloured.
    pub fn resolve(
        cli_format: Option<OutputFormat>,
        file_format: Option<OutputFormat>,
        file_color: bool,
        no_color: bool,
    ) -> Self {
        let format = cli_format.or(file_format).unwrap_or_default();
        Self {
            format,
            color: file_color && !no_color && format == OutputFormat::Table,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_file() {
        let config = OutputConfig::resolve(Some(OutputFormat::Table), Some(OutputFormat::Json), true, false);
        assert_eq!(config, OutputConfig::default());
    }

    #[test]
    fn test_file_format_used_when_flag_absent() {
        let config = OutputConfig::resolve(None, Some(OutputFormat::Json), true, false);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(!config.color);
    }

    #[test]
    fn test_no_color_flag() {
        assert!(!OutputConfig::resolve(None, None, true, true).color);
        assert!(!OutputConfig::resolve(None, None, false, false).color);
    }
}
