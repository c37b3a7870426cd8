//! Human-friendly output implementation using console styles.
//!
//! Data goes to stdout; per-device errors, notices and the run summary go
//! to stderr, so `zkev ... > events.txt` captures only event tables.

use std::path::Path;

use console::Style;
use tracing::{debug, instrument, trace};

use crate::dispatch::RunSummary;
use crate::error::ZkError;
use crate::router::{DeviceReport, Outcome};
use crate::theme::ZkTheme;

use super::{ConfigInfo, Output, VersionInfo};

/// Which stream a rendered block belongs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Styled terminal output implementation for human users.
pub struct HumanOutput {
    theme: ZkTheme,
    quiet: bool,
}

fn with_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

impl HumanOutput {
    #[instrument]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        debug!("Creating HumanOutput");
        let theme = if no_color {
            ZkTheme::plain()
        } else {
            ZkTheme::default()
        };
        Self { theme, quiet }
    }

    fn paint(style: &Style, stream: Stream, text: &str) -> String {
        let style = match stream {
            Stream::Stdout => style.clone(),
            Stream::Stderr => style.clone().for_stderr(),
        };
        style.apply_to(text).to_string()
    }

    /// Render one device report. `None` when nothing should be shown.
    pub fn format_report(&self, report: &DeviceReport) -> Option<(Stream, String)> {
        let tag = format!("[{}]", report.device);
        match &report.outcome {
            Outcome::Output { title, body } => {
                let stream = Stream::Stdout;
                let header = format!(
                    "{} {}",
                    Self::paint(&self.theme.device, stream, &tag),
                    Self::paint(&self.theme.title, stream, &format!("{title}:"))
                );
                Some((stream, with_newline(format!("{header}\n{body}"))))
            }
            Outcome::Empty { notice } => {
                if self.quiet {
                    return None;
                }
                let stream = Stream::Stderr;
                Some((
                    stream,
                    format!(
                        "{} {}\n",
                        Self::paint(&self.theme.device, stream, &tag),
                        Self::paint(&self.theme.muted, stream, notice)
                    ),
                ))
            }
            Outcome::Failed { message } => {
                let stream = Stream::Stderr;
                Some((
                    stream,
                    with_newline(format!(
                        "{} {}\n{}",
                        Self::paint(&self.theme.device, stream, &tag),
                        Self::paint(&self.theme.error, stream, "ERROR:"),
                        message.trim_end()
                    )),
                ))
            }
        }
    }

    /// Render the closing summary line.
    pub fn format_summary(&self, summary: &RunSummary) -> String {
        let stream = Stream::Stderr;
        let noun = if summary.total == 1 { "device" } else { "devices" };
        let failed = format!("{} failed", summary.failed);
        let failed = if summary.failed == 0 {
            Self::paint(&self.theme.muted, stream, &failed)
        } else {
            Self::paint(&self.theme.error, stream, &failed)
        };
        format!(
            "{} {noun}: {}, {failed}",
            summary.total,
            Self::paint(&self.theme.success, stream, &format!("{} ok", summary.success)),
        )
    }

    fn emit(stream: Stream, text: &str) {
        match stream {
            Stream::Stdout => print!("{text}"),
            Stream::Stderr => eprint!("{text}"),
        }
    }
}

impl Output for HumanOutput {
    #[instrument(skip(self))]
    fn error(&self, error: &ZkError) {
        debug!(
            error = %error,
            recoverable = error.is_user_recoverable(),
            "Outputting error"
        );
        let stream = Stream::Stderr;
        eprintln!(
            "{} {error}",
            Self::paint(&self.theme.error, stream, "Error:")
        );
        if let Some(suggestion) = error.suggestion() {
            trace!(suggestion, "Adding suggestion");
            eprintln!(
                "{} {}",
                Self::paint(&self.theme.warning, stream, "Hint:"),
                Self::paint(&self.theme.muted, stream, suggestion)
            );
        }
    }

    #[instrument(skip(self))]
    fn warning(&self, message: &str) {
        debug!(message, "Outputting warning");
        eprintln!(
            "{} {message}",
            Self::paint(&self.theme.warning, Stream::Stderr, "[WARN]")
        );
    }

    #[instrument(skip(self, report), fields(device = %report.device, ok = report.ok))]
    fn device_report(&self, report: &DeviceReport) {
        trace!("Outputting device report");
        if let Some((stream, text)) = self.format_report(report) {
            Self::emit(stream, &text);
        }
    }

    #[instrument(skip(self))]
    fn run_summary(&self, summary: &RunSummary) {
        if self.quiet {
            return;
        }
        eprintln!("{}", self.format_summary(summary));
    }

    #[instrument(skip(self, info))]
    fn config_info(&self, info: &ConfigInfo) {
        debug!("Outputting config info");
        let label = |name: &str| {
            Self::paint(&self.theme.label, Stream::Stdout, &format!("{name:<10}"))
        };
        let value = |v: &str| Self::paint(&self.theme.value, Stream::Stdout, v);

        let file = match (&info.path, info.loaded) {
            (Some(path), true) => path.clone(),
            (Some(path), false) => format!("{path} (not found, using defaults)"),
            (None, _) => "(none)".to_string(),
        };
        let devices = if info.devices.is_empty() {
            "(none)".to_string()
        } else {
            info.devices.join(", ")
        };
        let password = if info.password.is_empty() {
            "(empty)"
        } else {
            info.password.as_str()
        };

        println!("{} {}", label("Config"), value(&file));
        println!("{} {}", label("Devices"), value(&devices));
        println!("{} {}", label("Model"), value(&info.model));
        println!("{} {}", label("Password"), value(password));
        println!("{} {}", label("Backend"), value(&info.backend));
        println!("{} {}", label("Jobs"), value(&info.jobs.to_string()));
    }

    #[instrument(skip(self))]
    fn config_path(&self, path: Option<&Path>) {
        match path {
            Some(p) => println!("{}", p.display()),
            None => self.warning("No config directory on this platform"),
        }
    }

    #[instrument(skip(self, info))]
    fn version_info(&self, info: &VersionInfo) {
        debug!(version = info.version, "Outputting version info");
        let dirty = if info.git_dirty { " (dirty)" } else { "" };
        println!(
            "{} {}",
            Self::paint(&self.theme.title, Stream::Stdout, "zkev"),
            info.version
        );
        println!("git: {}{dirty}", info.git_sha);
        println!("built: {}", info.build_timestamp);
        println!("rustc: {}", info.rustc_version);
        println!("target: {}", info.target);
    }
}
