//! Configuration for zkev runs.
//!
//! Settings come from, in order of precedence: command-line flags,
//! `ZKEV_*` environment variables (both handled by clap), the TOML config
//! file, and built-in defaults.
//!
//! ```toml
//! devices = ["192.168.1.201", "192.168.1.202"]
//! password = "123456"
//! model = "ZK400"
//! backend = "~/pyzkaccess/pyzkaccess.exe"
//! jobs = 2
//! ```

mod path;

pub use path::{home_dir, resolve_path};

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::backend::DEFAULT_BACKEND;
use crate::device::{DEFAULT_MODEL, DeviceAddress, DeviceCredentials, parse_device_list};
use crate::error::{Result, ResultExt, ZkError};

/// Contents of the config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub devices: Vec<String>,
    pub password: Option<String>,
    pub model: Option<String>,
    pub backend: Option<PathBuf>,
    pub jobs: Option<usize>,
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ZkError::ConfigParse(e.to_string()))
    }
}

/// Settings together with where they were read from.
#[derive(Debug, Clone, Default)]
pub struct LoadedSettings {
    pub settings: Settings,
    /// Config file location, if one could be determined.
    pub path: Option<PathBuf>,
    /// Whether the file at `path` existed and was read.
    pub loaded: bool,
}

/// Default config file location: `<config dir>/zkev/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("zkev").join("config.toml"))
}

/// Load the config file.
///
/// An explicitly requested file must exist. The default file is optional.
/// A relative `backend` path is resolved against the file's directory.
pub fn load_settings(explicit: Option<&Path>) -> Result<LoadedSettings> {
    let (path, required) = match explicit {
        Some(p) => (Some(p.to_path_buf()), true),
        None => (default_config_path(), false),
    };

    let Some(path) = path else {
        debug!("No config directory available, using defaults");
        return Ok(LoadedSettings::default());
    };

    if !path.is_file() {
        if required {
            return Err(ZkError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        debug!(path = %path.display(), "No config file, using defaults");
        return Ok(LoadedSettings {
            settings: Settings::default(),
            path: Some(path),
            loaded: false,
        });
    }

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut settings = Settings::from_toml(&text).map_err(|e| match e {
        ZkError::ConfigParse(msg) => ZkError::ConfigParse(format!("{}: {msg}", path.display())),
        other => other,
    })?;

    if let (Some(backend), Some(dir)) = (settings.backend.as_deref(), path.parent()) {
        settings.backend = Some(resolve_path(backend, dir)?);
    }

    info!(path = %path.display(), "Loaded config file");
    Ok(LoadedSettings {
        settings,
        path: Some(path),
        loaded: true,
    })
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub ip: Option<String>,
    pub password: Option<String>,
    pub model: Option<String>,
    pub backend: Option<PathBuf>,
    pub jobs: Option<NonZeroUsize>,
}

/// Everything needed to run one query across devices.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub devices: Vec<DeviceAddress>,
    pub credentials: DeviceCredentials,
    pub backend: PathBuf,
    pub jobs: NonZeroUsize,
}

/// Settings after precedence has been applied, devices excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub credentials: DeviceCredentials,
    pub backend: PathBuf,
    pub jobs: NonZeroUsize,
}

/// Apply flag > env > file > default precedence to everything but devices.
pub fn resolve(overrides: &Overrides, settings: &Settings) -> Result<Resolved> {
    let password = overrides
        .password
        .clone()
        .or_else(|| settings.password.clone())
        .unwrap_or_default();
    let model = overrides
        .model
        .clone()
        .or_else(|| settings.model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());
    let backend = overrides
        .backend
        .clone()
        .or_else(|| settings.backend.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BACKEND));

    let jobs = match (overrides.jobs, settings.jobs) {
        (Some(jobs), _) => jobs,
        (None, Some(jobs)) => NonZeroUsize::new(jobs).ok_or_else(|| ZkError::InvalidSetting {
            field: "jobs".to_string(),
            reason: "must be at least 1".to_string(),
        })?,
        (None, None) => NonZeroUsize::MIN,
    };

    Ok(Resolved {
        credentials: DeviceCredentials::new(password, model),
        backend,
        jobs,
    })
}

/// Device list from `--ip` (or `ZKEV_IP`), falling back to the config file.
pub fn resolve_devices(ip: Option<&str>, settings: &Settings) -> Result<Vec<DeviceAddress>> {
    match ip {
        Some(list) => parse_device_list(list),
        None if settings.devices.is_empty() => Err(ZkError::NoDevices),
        None => parse_device_list(&settings.devices.join(",")),
    }
}

/// Build the full run configuration.
pub fn run_config(overrides: &Overrides, settings: &Settings) -> Result<RunConfig> {
    let devices = resolve_devices(overrides.ip.as_deref(), settings)?;
    let Resolved {
        credentials,
        backend,
        jobs,
    } = resolve(overrides, settings)?;

    debug!(
        devices = devices.len(),
        model = %credentials.model,
        backend = %backend.display(),
        jobs = jobs.get(),
        "Resolved run configuration"
    );
    Ok(RunConfig {
        devices,
        credentials,
        backend,
        jobs,
    })
}
