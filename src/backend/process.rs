//! Subprocess-backed [`Backend`].

use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, instrument, trace};

use super::{Backend, BackendInvocation, BackendResult};
use crate::error::{Result, ZkError};

/// Backend executable used when nothing else is configured.
pub const DEFAULT_BACKEND: &str = "./pyzkaccess.exe";

/// Runs the pyzkaccess executable, one process per invocation.
///
/// The child inherits the caller's environment with the backend variables
/// layered on top. Both streams are drained to completion before the
/// result is classified. No timeout is applied here; the connection
/// descriptor's own timeout is the only bound.
#[derive(Debug, Clone)]
pub struct ProcessBackend {
    executable: PathBuf,
}

impl Default for ProcessBackend {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND)
    }
}

impl ProcessBackend {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn command(&self, invocation: &BackendInvocation) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.arg("connect").arg("ENV").args(invocation.args());
        cmd.envs(invocation.env().iter().map(|(k, v)| (k.as_str(), v.as_str())));
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);
        cmd
    }

    #[instrument(skip(self, invocation), fields(device = %invocation.device()))]
    async fn execute(&self, invocation: &BackendInvocation) -> Result<BackendResult> {
        let executable = self.executable.display().to_string();
        trace!(%executable, args = ?invocation.args(), "Spawning backend");

        let output = self
            .command(invocation)
            .output()
            .await
            .map_err(|e| ZkError::BackendSpawn {
                executable: executable.clone(),
                reason: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        debug!(
            status = ?output.status.code(),
            stdout_bytes = stdout.len(),
            stderr_bytes = stderr.len(),
            "Backend exited"
        );

        Ok(BackendResult::classify(stdout, stderr))
    }
}

impl Backend for ProcessBackend {
    fn run(
        &self,
        invocation: &BackendInvocation,
    ) -> impl Future<Output = Result<BackendResult>> + Send {
        self.execute(invocation)
    }
}
