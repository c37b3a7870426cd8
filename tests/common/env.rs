//! Environment variable helpers for tests.
#![allow(dead_code)]

use env_lock::{EnvGuard as LockedEnvGuard, lock_env};
use tracing::{instrument, trace};

/// Every variable zkev reads through clap.
pub const ZKEV_VARS: [&str; 8] = [
    "ZKEV_IP",
    "ZKEV_PASSWORD",
    "ZKEV_MODEL",
    "ZKEV_BACKEND",
    "ZKEV_JOBS",
    "ZKEV_CONFIG",
    "ZKEV_FORMAT",
    "NO_COLOR",
];

/// RAII guard to restore environment variables on drop.
///
/// Holding one guard serializes against every other guard, so set all the
/// variables a test needs in a single call.
pub struct EnvGuard<'a> {
    _guard: LockedEnvGuard<'a>,
}

impl<'a> EnvGuard<'a> {
    #[must_use]
    #[instrument]
    pub fn set(key: &'a str, value: &str) -> Self {
        trace!(key, value, "Setting env var");
        let guard = lock_env([(key, Some(value))]);
        Self { _guard: guard }
    }

    #[must_use]
    #[instrument]
    pub fn remove(key: &'a str) -> Self {
        trace!(key, "Removing env var");
        let guard = lock_env([(key, None::<&str>)]);
        Self { _guard: guard }
    }

    /// Clear every zkev variable, then apply `vars`.
    #[must_use]
    pub fn isolated(vars: &[(&'a str, &'a str)]) -> Self {
        let mut changes: Vec<(&'a str, Option<&'a str>)> = ZKEV_VARS
            .iter()
            .filter(|key| !vars.iter().any(|(k, _)| k == *key))
            .map(|key| (*key, None))
            .collect();
        changes.extend(vars.iter().map(|(k, v)| (*k, Some(*v))));
        trace!(count = changes.len(), "Isolating zkev env vars");
        Self {
            _guard: lock_env(changes),
        }
    }
}
