//! Device address parsing.

use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{Result, ZkError};

/// One door controller, identified by IP address or hostname.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DeviceAddress(String);

impl DeviceAddress {
    /// Wrap a single address token. Surrounding whitespace is removed.
    pub fn new(address: impl AsRef<str>) -> Self {
        Self(address.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DeviceAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Split a comma-separated device list into addresses.
///
/// Tokens are trimmed and empty tokens are skipped, so `"a, ,b,"` yields
/// `a` and `b`. Order is preserved; duplicates are kept and will be queried
/// twice. An input with no usable token is an error.
pub fn parse_device_list(input: &str) -> Result<Vec<DeviceAddress>> {
    let mut devices = Vec::new();
    for (index, token) in input.split(',').enumerate() {
        let token = token.trim();
        if token.is_empty() {
            trace!(index, "Skipping empty device token");
            continue;
        }
        if token.chars().any(char::is_whitespace) {
            return Err(ZkError::InvalidDeviceList {
                input: input.to_string(),
                reason: format!("address '{token}' contains whitespace"),
            });
        }
        devices.push(DeviceAddress::new(token));
    }

    if devices.is_empty() {
        return Err(ZkError::NoDevices);
    }

    debug!(count = devices.len(), "Parsed device list");
    Ok(devices)
}
