//! Robot mode JSON output implementation.
//!
//! Device reports and the run summary are written to stdout in device-list
//! order, so a consumer can read a single stream. Top-level errors go to
//! stderr.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, instrument, trace, warn};

use crate::dispatch::RunSummary;
use crate::error::ZkError;
use crate::router::DeviceReport;

use super::{ConfigInfo, Output, RobotFormat, VersionInfo};

/// JSON output implementation for AI agents and scripting.
pub struct RobotOutput {
    format: RobotFormat,
}

impl RobotOutput {
    #[instrument]
    pub fn new(format: RobotFormat) -> Self {
        debug!(?format, "Creating RobotOutput");
        Self { format }
    }

    /// Serialize according to the selected format.
    pub fn render<T: Serialize + ?Sized>(&self, data: &T) -> Option<String> {
        let json = match self.format {
            RobotFormat::Json => serde_json::to_string_pretty(data),
            RobotFormat::JsonCompact => serde_json::to_string(data),
        };
        match json {
            Ok(json) => {
                trace!(json_len = json.len(), "JSON serialized");
                Some(json)
            }
            Err(e) => {
                warn!(error = %e, "Failed to serialize robot output");
                None
            }
        }
    }

    /// Output any serializable data as JSON to stdout.
    fn output_json<T: Serialize + ?Sized>(&self, data: &T) {
        if let Some(json) = self.render(data) {
            println!("{json}");
        }
    }

    /// Output pretty JSON to stderr.
    fn output_json_stderr<T: Serialize>(&self, data: &T) {
        match serde_json::to_string_pretty(data) {
            Ok(json) => eprintln!("{json}"),
            Err(e) => warn!(error = %e, "Failed to serialize robot error"),
        }
    }
}

impl Output for RobotOutput {
    #[instrument(skip(self))]
    fn error(&self, error: &ZkError) {
        debug!(error = %error, "Robot: error");
        self.output_json_stderr(&serde_json::json!({
            "error": true,
            "message": error.to_string(),
            "suggestion": error.suggestion(),
            "recoverable": error.is_user_recoverable(),
        }));
    }

    #[instrument(skip(self))]
    fn warning(&self, message: &str) {
        debug!(message, "Robot: warning");
        self.output_json_stderr(&serde_json::json!({
            "warning": true,
            "message": message
        }));
    }

    #[instrument(skip(self, report), fields(device = %report.device, ok = report.ok))]
    fn device_report(&self, report: &DeviceReport) {
        debug!("Robot: device_report");
        self.output_json(report);
    }

    #[instrument(skip(self))]
    fn run_summary(&self, summary: &RunSummary) {
        debug!("Robot: run_summary");
        self.output_json(&serde_json::json!({
            "summary": summary,
            "ok": summary.is_success(),
        }));
    }

    #[instrument(skip(self, info))]
    fn config_info(&self, info: &ConfigInfo) {
        debug!("Robot: config_info");
        self.output_json(info);
    }

    #[instrument(skip(self))]
    fn config_path(&self, path: Option<&Path>) {
        self.output_json(&serde_json::json!({
            "path": path.map(|p| p.display().to_string()),
        }));
    }

    #[instrument(skip(self, info))]
    fn version_info(&self, info: &VersionInfo) {
        debug!(version = info.version, "Robot: version_info");
        self.output_json(info);
    }
}
