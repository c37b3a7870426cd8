//! Backend invocation for door-controller access.
//!
//! The device protocol is handled by an external executable (pyzkaccess).
//! It is started as `connect ENV <args...>`, reads its connection settings
//! from two environment variables, and answers on two streams: a success
//! payload on stdout or an error payload on stderr.
//!
//! The [`Backend`] trait abstracts over the real subprocess and a recording
//! mock so the dispatcher can be tested without devices.

pub mod mock;
mod process;

pub use process::{DEFAULT_BACKEND, ProcessBackend};

use std::future::Future;

use tracing::{debug, instrument, warn};

use crate::device::{DeviceAddress, DeviceCredentials};
use crate::error::Result;

/// Environment variable holding the connection descriptor.
pub const ENV_CONNSTR: &str = "PYZKACCESS_CONNECT_CONNSTR";
/// Environment variable holding the device model.
pub const ENV_MODEL: &str = "PYZKACCESS_CONNECT_MODEL";

/// Transport protocol written into the connection descriptor.
pub const PROTOCOL: &str = "TCP";
/// Controller port.
pub const PORT: u16 = 4370;
/// Connection timeout in milliseconds, enforced by the backend.
pub const TIMEOUT_MS: u32 = 4000;

/// Format the connection descriptor for one device.
///
/// Values are inserted verbatim. A password or address containing `,` or `=`
/// produces a descriptor the backend will misread.
pub fn connection_descriptor(device: &DeviceAddress, credentials: &DeviceCredentials) -> String {
    format!(
        "protocol={PROTOCOL},ipaddress={device},port={PORT},timeout={TIMEOUT_MS},passwd={}",
        credentials.password
    )
}

/// One backend call, fully prepared. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendInvocation {
    device: DeviceAddress,
    args: Vec<String>,
    env: Vec<(String, String)>,
}

impl BackendInvocation {
    pub fn new(
        device: &DeviceAddress,
        credentials: &DeviceCredentials,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            device: device.clone(),
            args: args.into_iter().map(Into::into).collect(),
            env: vec![
                (
                    ENV_CONNSTR.to_string(),
                    connection_descriptor(device, credentials),
                ),
                (ENV_MODEL.to_string(), credentials.model.clone()),
            ],
        }
    }

    pub fn device(&self) -> &DeviceAddress {
        &self.device
    }

    /// Sub-command arguments, without the leading `connect ENV`.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Backend-specific variables; they override inherited ones.
    pub fn env(&self) -> &[(String, String)] {
        &self.env
    }

    pub fn env_var(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Classified outcome of one backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendResult {
    Success(String),
    Failure(String),
}

impl BackendResult {
    /// Classify captured output. Any stderr content means failure, and the
    /// stdout content is discarded in that case.
    pub fn classify(stdout: String, stderr: String) -> Self {
        if stderr.is_empty() {
            Self::Success(stdout)
        } else {
            Self::Failure(stderr)
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Something that can execute a prepared backend invocation.
///
/// Implementations only fail with `Err` when the call could not be made at
/// all (for example the executable is missing). A backend that ran and
/// complained is an `Ok(BackendResult::Failure)`.
pub trait Backend {
    fn run(
        &self,
        invocation: &BackendInvocation,
    ) -> impl Future<Output = Result<BackendResult>> + Send;
}

/// Binds a backend to the credentials of the current run.
#[derive(Debug)]
pub struct Invoker<B> {
    backend: B,
    credentials: DeviceCredentials,
}

impl<B: Backend> Invoker<B> {
    pub const fn new(backend: B, credentials: DeviceCredentials) -> Self {
        Self {
            backend,
            credentials,
        }
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    pub const fn credentials(&self) -> &DeviceCredentials {
        &self.credentials
    }

    /// Run one sub-command against one device.
    #[instrument(skip(self, device, args), fields(device = %device))]
    pub async fn invoke(
        &self,
        device: &DeviceAddress,
        args: &[String],
    ) -> Result<BackendResult> {
        let invocation = BackendInvocation::new(device, &self.credentials, args.iter().cloned());
        debug!(args = ?invocation.args(), "Invoking backend");

        let result = self.backend.run(&invocation).await?;
        match &result {
            BackendResult::Success(payload) => {
                debug!(bytes = payload.len(), "Backend succeeded");
            }
            BackendResult::Failure(message) => {
                warn!(device = %device, error = %message.trim_end(), "Backend reported an error");
            }
        }
        Ok(result)
    }
}
