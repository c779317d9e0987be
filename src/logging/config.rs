//! `logging` section of the kiosk config file

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Where events are written. stdout is never a choice: the bridge owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    #[serde(alias = "console")]
    Stderr,
    File,
    Both,
}

impl LogOutput {
    pub fn writes_stderr(self) -> bool {
        matches!(self, LogOutput::Stderr | LogOutput::Both)
    }

    pub fn writes_file(self) -> bool {
        matches!(self, LogOutput::File | LogOutput::Both)
    }
}

/// How often the log file rolls over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    #[default]
    Daily,
    Hourly,
    Never,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,

    #[serde(default)]
    pub format: LogFormat,

    #[serde(default)]
    pub output: LogOutput,

    /// Rolling file directory; the platform data dir when unset
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Per-target overrides, e.g. `"kiosk_lockdown::bridge": "trace"`
    #[serde(default)]
    pub targets: BTreeMap<String, LogLevel>,

    #[serde(default)]
    pub rotation: LogRotation,

    /// Attach source file and line to each event
    #[serde(default)]
    pub source_location: bool,
}

impl LoggingConfig {
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Filter string in `EnvFilter` syntax: global level first, then targets
    pub fn filter_directives(&self) -> String {
        let mut directives = vec![self.level.to_string()];
        directives.extend(
            self.targets
                .iter()
                .map(|(target, level)| format!("{}={}", target, level)),
        );
        directives.join(",")
    }

    pub fn directory_or_default(&self) -> PathBuf {
        match &self.directory {
            Some(dir) => dir.clone(),
            None => dirs::data_local_dir()
                .map(|dir| dir.join("kiosk-lockdown").join("logs"))
                .unwrap_or_else(|| PathBuf::from("logs")),
        }
    }
}
