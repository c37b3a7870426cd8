//! Credentials shared across all devices of one invocation.

use serde::Serialize;

/// Model identifier used when none is configured.
pub const DEFAULT_MODEL: &str = "ZK100";

/// Password and model handed to the backend for every device.
///
/// A single value is shared by all devices in a run; there is no
/// per-device override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceCredentials {
    #[serde(skip_serializing)]
    pub password: String,
    pub model: String,
}

impl DeviceCredentials {
    pub fn new(password: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            model: model.into(),
        }
    }

    /// Password with every character replaced, for display.
    pub fn masked_password(&self) -> String {
        "*".repeat(self.password.chars().count())
    }
}

impl Default for DeviceCredentials {
    fn default() -> Self {
        Self::new("", DEFAULT_MODEL)
    }
}
