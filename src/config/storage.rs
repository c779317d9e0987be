//! Configuration Storage Implementation
//!
//! Provides JSON file-based configuration storage with:
//! - Atomic writes using temp file + rename
//! - Default configuration generation when the file is missing
//! - Serde defaults on every field so partial files load

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::error::ConfigError;
use crate::logging::LoggingConfig;
use crate::os::ComponentName;

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration store settings
#[derive(Debug, Clone)]
pub struct ConfigStoreConfig {
    /// Path to the configuration file
    pub config_path: PathBuf,
    /// Whether to create default config if not exists
    pub create_default: bool,
}

impl Default for ConfigStoreConfig {
    fn default() -> Self {
        let app_data = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kiosk-lockdown");

        Self {
            config_path: app_data.join("config.json"),
            create_default: true,
        }
    }
}

impl ConfigStoreConfig {
    /// Store settings pointing at an explicit file
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            create_default: true,
        }
    }
}

/// Main kiosk configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KioskConfig {
    /// Configuration version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Package identity of the pinned application
    #[serde(default)]
    pub identity: AppIdentity,

    /// Launcher supervision settings
    #[serde(default)]
    pub launcher: LauncherConfig,

    /// Device shell tool locations
    #[serde(default)]
    pub shell: ShellConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Last modified timestamp
    #[serde(default = "default_timestamp")]
    pub last_modified: String,
}

fn default_version() -> u32 {
    1
}

fn default_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            identity: AppIdentity::default(),
            launcher: LauncherConfig::default(),
            shell: ShellConfig::default(),
            logging: LoggingConfig::default(),
            last_modified: default_timestamp(),
        }
    }
}

/// Package identity of the application pinned as home
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppIdentity {
    /// Application package name
    #[serde(default = "default_package")]
    pub package_name: String,

    /// Entry activity class, absolute or relative (`.MainActivity`)
    #[serde(default = "default_entry_activity")]
    pub entry_activity: String,
}

fn default_package() -> String {
    "com.example.attendance_tracker".to_string()
}

fn default_entry_activity() -> String {
    ".MainActivity".to_string()
}

impl Default for AppIdentity {
    fn default() -> Self {
        Self {
            package_name: default_package(),
            entry_activity: default_entry_activity(),
        }
    }
}

impl AppIdentity {
    pub fn new(package_name: impl Into<String>, entry_activity: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            entry_activity: entry_activity.into(),
        }
    }

    /// Component that the restart directive targets
    pub fn entry_component(&self) -> ComponentName {
        ComponentName::new(&self.package_name, &self.entry_activity)
    }

    /// Reject identities that can never match a registry entry
    pub fn validate(&self) -> ConfigResult<()> {
        if self.package_name.trim().is_empty() || self.package_name.contains('/') {
            return Err(ConfigError::InvalidValue {
                field: "identity.package_name".to_string(),
                value: self.package_name.clone(),
            });
        }
        if self.entry_activity.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "identity.entry_activity".to_string(),
                value: self.entry_activity.clone(),
            });
        }
        Ok(())
    }
}

/// Launcher supervision settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherConfig {
    /// Run the default-launcher check on every resume
    #[serde(default = "default_true")]
    pub check_on_resume: bool,

    /// Poll interval for the watch loop in milliseconds
    #[serde(default = "default_watch_interval")]
    pub watch_interval_ms: u64,

    /// Re-issue the restart directive when launcher status is lost
    #[serde(default = "default_true")]
    pub auto_restart: bool,

    /// Consecutive restarts before the watch loop gives up
    #[serde(default = "default_max_restarts")]
    pub max_restart_attempts: u32,
}

fn default_true() -> bool {
    true
}

fn default_watch_interval() -> u64 {
    5000
}

fn default_max_restarts() -> u32 {
    3
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            check_on_resume: default_true(),
            watch_interval_ms: default_watch_interval(),
            auto_restart: default_true(),
            max_restart_attempts: default_max_restarts(),
        }
    }
}

/// Device shell tool locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Package service client (`cmd package ...`)
    #[serde(default = "default_cmd")]
    pub cmd_program: String,

    /// Activity manager client (`am start ...`)
    #[serde(default = "default_am")]
    pub am_program: String,
}

fn default_cmd() -> String {
    "cmd".to_string()
}

fn default_am() -> String {
    "am".to_string()
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            cmd_program: default_cmd(),
            am_program: default_am(),
        }
    }
}

/// Configuration store
pub struct ConfigStore {
    config: KioskConfig,
    settings: ConfigStoreConfig,
}

impl ConfigStore {
    /// Load the configuration, creating a default file if allowed
    pub fn open(settings: ConfigStoreConfig) -> ConfigResult<Self> {
        let config = if settings.config_path.exists() {
            Self::load_from_file(&settings.config_path)?
        } else if settings.create_default {
            let default_config = KioskConfig::default();
            Self::save_to_file(&settings.config_path, &default_config)?;
            tracing::info!(path = ?settings.config_path, "Created default configuration");
            default_config
        } else {
            return Err(ConfigError::NotFound {
                path: settings.config_path.display().to_string(),
            });
        };

        config.identity.validate()?;

        Ok(Self { config, settings })
    }

    /// Load configuration from file
    fn load_from_file(path: &Path) -> ConfigResult<KioskConfig> {
        let content = std::fs::read_to_string(path)?;
        let config: KioskConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file with atomic write
    fn save_to_file(path: &Path, config: &KioskConfig) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(config)?;

        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, &content)?;
        std::fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Current configuration
    pub fn get(&self) -> &KioskConfig {
        &self.config
    }

    /// Apply a change and persist it
    pub fn update<F>(&mut self, f: F) -> ConfigResult<()>
    where
        F: FnOnce(&mut KioskConfig),
    {
        let mut updated = self.config.clone();
        f(&mut updated);
        updated.identity.validate()?;
        updated.last_modified = default_timestamp();

        Self::save_to_file(&self.settings.config_path, &updated)?;
        self.config = updated;
        Ok(())
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.settings.config_path
    }

    pub fn into_config(self) -> KioskConfig {
        self.config
    }
}
