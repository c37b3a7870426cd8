//! Output mode abstraction for robot and human output.

use std::path::Path;

use serde::Serialize;

use crate::cli::Cli;
use crate::config::{LoadedSettings, Resolved};
use crate::dispatch::RunSummary;
use crate::error::ZkError;
use crate::router::DeviceReport;

pub mod human;
pub mod robot;

pub use human::HumanOutput;
pub use robot::RobotOutput;

/// Resolved configuration, safe to print.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub loaded: bool,
    pub devices: Vec<String>,
    pub model: String,
    pub password: String,
    pub backend: String,
    pub jobs: usize,
}

impl ConfigInfo {
    /// Describe `resolved` settings; the password is masked.
    #[must_use]
    pub fn new(loaded: &LoadedSettings, resolved: &Resolved, devices: Vec<String>) -> Self {
        Self {
            path: loaded.path.as_ref().map(|p| p.display().to_string()),
            loaded: loaded.loaded,
            devices,
            model: resolved.credentials.model.clone(),
            password: resolved.credentials.masked_password(),
            backend: resolved.backend.display().to_string(),
            jobs: resolved.jobs.get(),
        }
    }
}

/// Build metadata shown by `zkev version`.
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfo {
    pub version: &'static str,
    pub git_sha: &'static str,
    pub git_dirty: bool,
    pub build_timestamp: &'static str,
    pub rustc_version: &'static str,
    pub target: &'static str,
}

/// JSON formatting options for robot mode.
#[derive(Debug, Clone, Copy)]
pub enum RobotFormat {
    /// Pretty-printed JSON (default for --robot).
    Json,
    /// Single-line JSON (--format=json-compact).
    JsonCompact,
}

/// Determines how command output is rendered.
#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    /// JSON output for AI agents and scripting.
    Robot(RobotFormat),
    /// Styled terminal output for human users.
    Human { no_color: bool, quiet: bool },
}

impl OutputMode {
    /// Create OutputMode from CLI arguments.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.use_json() {
            let format = if cli.use_compact_json() {
                RobotFormat::JsonCompact
            } else {
                RobotFormat::Json
            };
            Self::Robot(format)
        } else {
            Self::Human {
                no_color: cli.colors_disabled(),
                quiet: cli.quiet,
            }
        }
    }

    /// Returns true if output should be JSON.
    #[must_use]
    pub const fn is_robot(&self) -> bool {
        matches!(self, Self::Robot(_))
    }

    /// Convert into the appropriate Output implementation.
    #[must_use]
    pub fn into_output(self) -> Box<dyn Output> {
        match self {
            Self::Robot(format) => Box::new(RobotOutput::new(format)),
            Self::Human { no_color, quiet } => Box::new(HumanOutput::new(no_color, quiet)),
        }
    }
}

/// Trait for all output operations.
///
/// Commands call these methods without knowing the output mode.
pub trait Output {
    // Basic messages
    fn error(&self, error: &ZkError);
    fn warning(&self, message: &str);

    // Event queries
    /// Result for one device, called in device-list order.
    fn device_report(&self, report: &DeviceReport);
    /// Totals after every device has reported.
    fn run_summary(&self, summary: &RunSummary);

    // Configuration
    fn config_info(&self, info: &ConfigInfo);
    fn config_path(&self, path: Option<&Path>);

    // Metadata
    fn version_info(&self, info: &VersionInfo);
}
