//! Error types for zkev operations.

use thiserror::Error;

/// Primary error type for zkev operations.
#[derive(Error, Debug)]
pub enum ZkError {
    // Device list errors
    #[error("No device addresses given")]
    NoDevices,

    #[error("Invalid device list '{input}': {reason}")]
    InvalidDeviceList { input: String, reason: String },

    // Backend errors
    #[error("Failed to start backend '{executable}': {reason}")]
    BackendSpawn { executable: String, reason: String },

    // Payload errors
    #[error("Malformed event table: expected at least 3 header lines, got {lines}")]
    MalformedEventTable { lines: usize },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("Invalid setting '{field}': {reason}")]
    InvalidSetting { field: String, reason: String },

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl ZkError {
    /// Returns true if the error is recoverable by the user.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NoDevices
                | Self::InvalidDeviceList { .. }
                | Self::BackendSpawn { .. }
                | Self::ConfigNotFound { .. }
                | Self::ConfigParse(_)
                | Self::InvalidSetting { .. }
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::NoDevices => Some("Pass --ip <IP[,IP...]> or set `devices` in the config file"),
            Self::InvalidDeviceList { .. } => Some("Separate device addresses with commas"),
            Self::BackendSpawn { .. } => {
                Some("Point --backend (or ZKEV_BACKEND) at the pyzkaccess executable")
            }
            Self::MalformedEventTable { .. } => {
                Some("The backend output format may have changed; try the `all` command")
            }
            Self::ConfigNotFound { .. } => Some("Run: zkev config --path"),
            _ => None,
        }
    }
}

/// Convenience type alias for Results using ZkError.
pub type Result<T> = std::result::Result<T, ZkError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| ZkError::Other(format!("{}: {e}", f().into())))
    }
}
