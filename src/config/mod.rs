//! Configuration Management Module
//!
//! Provides persistent configuration storage with:
//! - JSON file-based storage
//! - Default generation on first start
//! - Identity validation on load and update

mod storage;

pub use storage::{
    AppIdentity, ConfigResult, ConfigStore, ConfigStoreConfig, KioskConfig, LauncherConfig,
    ShellConfig,
};
