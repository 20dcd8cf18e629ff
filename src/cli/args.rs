//! CLI argument definitions for `StudyFlow`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use studyflow::config::ConfigOverrides;
use studyflow::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `file`, `data_file`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Show the credit-weighted GPA and per-course standings.
    Gpa {
        /// Limit to one semester label (e.g., "Fall 2025"); defaults to all
        #[arg(long, value_name = "LABEL")]
        semester: Option<String>,

        /// Data file to read instead of the configured one
        #[arg(long, value_name = "FILE")]
        data: Option<PathBuf>,
    },
    /// Show one course's category breakdown and current grade.
    Breakdown {
        /// Course id
        #[arg(value_name = "COURSE_ID")]
        course_id: u32,

        /// Data file to read instead of the configured one
        #[arg(long, value_name = "FILE")]
        data: Option<PathBuf>,
    },
    /// Show dashboard statistics: due soon, overdue, completion, averages.
    Dashboard {
        /// Data file to read instead of the configured one
        #[arg(long, value_name = "FILE")]
        data: Option<PathBuf>,
    },
    /// Generate a grade report.
    ///
    /// Creates a formatted report with the GPA summary, course standings,
    /// and per-course category breakdowns.
    Report {
        /// Data file to read instead of the configured one
        #[arg(long, value_name = "FILE")]
        data: Option<PathBuf>,

        /// Output file path (optional; defaults to the configured reports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Report format: markdown (md) or html
        #[arg(short, long, value_name = "FORMAT", default_value = "markdown")]
        format: String,

        /// Limit to one semester label; defaults to all
        #[arg(long, value_name = "LABEL")]
        semester: Option<String>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "studyflow",
    about = "StudyFlow command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config record-service token
    #[arg(long = "config-api-token", value_name = "TOKEN")]
    pub config_api_token: Option<String>,

    /// Override config record-service token (short form)
    #[arg(long = "api-token", value_name = "TOKEN")]
    pub api_token: Option<String>,

    /// Override config record-service endpoint
    #[arg(long = "config-api-endpoint", value_name = "URL")]
    pub config_api_endpoint: Option<String>,

    /// Override config record-service endpoint (short form)
    #[arg(long = "api-endpoint", value_name = "URL")]
    pub api_endpoint: Option<String>,

    /// Override config data file path
    #[arg(long = "config-data-file", value_name = "FILE")]
    pub config_data_file: Option<PathBuf>,

    /// Override config reports directory
    #[arg(long = "config-reports-dir", value_name = "DIR")]
    pub config_reports_dir: Option<PathBuf>,

    /// Override config reports directory (short form)
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Transforms CLI arguments into a `ConfigOverrides` struct that can be applied to
    /// the loaded configuration. Short-form flags (e.g., `--api-token`) take precedence
    /// over long-form flags (e.g., `--config-api-token`) when both are provided.
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string().to_lowercase()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            api_token: self
                .api_token
                .clone()
                .or_else(|| self.config_api_token.clone()),
            api_endpoint: self
                .api_endpoint
                .clone()
                .or_else(|| self.config_api_endpoint.clone()),
            data_file: self
                .config_data_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            reports_dir: self
                .reports_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .or_else(|| {
                    self.config_reports_dir
                        .as_ref()
                        .map(|p| p.to_string_lossy().to_string())
                }),
        }
    }
}
