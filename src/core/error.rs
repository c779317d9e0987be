//! Error types for the kiosk lockdown controller
//!
//! The launcher guard and the lockdown controller never fail at their public
//! surface; these errors cover the platform seam, the bridge boundary,
//! configuration and logging setup.

use thiserror::Error;

/// Result type alias for kiosk lockdown operations
pub type Result<T> = std::result::Result<T, KioskError>;

/// Main error type
#[derive(Error, Debug)]
pub enum KioskError {
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    #[error("Launcher watch error: {0}")]
    Watch(#[from] WatchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by platform facilities (package manager, activity launcher)
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Preferred activity query failed: {reason}")]
    QueryFailed { reason: String },

    #[error("Activity launch failed for {component}: {reason}")]
    LaunchFailed { component: String, reason: String },

    #[error("Command `{program}` failed to run: {reason}")]
    CommandFailed { program: String, reason: String },

    #[error("Command `{program}` exited with status {status:?}: {stderr}")]
    CommandStatus {
        program: String,
        status: Option<i32>,
        stderr: String,
    },
}

/// Errors at the bridge boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("Method not implemented: {method}")]
    NotImplemented { method: String },

    #[error("Invalid arguments for {method}: {reason}")]
    InvalidArguments { method: String, reason: String },

    #[error("Activity already finished")]
    ActivityFinished,

    #[error("Malformed bridge message: {reason}")]
    MalformedMessage { reason: String },
}

impl BridgeError {
    /// Stable machine-readable code reported back to the host
    pub fn code(&self) -> &'static str {
        match self {
            BridgeError::NotImplemented { .. } => "not_implemented",
            BridgeError::InvalidArguments { .. } => "invalid_arguments",
            BridgeError::ActivityFinished => "activity_finished",
            BridgeError::MalformedMessage { .. } => "malformed_message",
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration file not found: {path}")]
    NotFound { path: String },

    #[error("Invalid config value: {field} = {value}")]
    InvalidValue { field: String, value: String },
}

/// Launcher watch errors
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Max restart attempts exceeded ({attempts})")]
    MaxRestartsExceeded { attempts: u32 },
}
