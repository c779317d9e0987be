//! Kiosk Lockdown - launcher lockdown controller for dedicated devices
//!
//! This crate keeps one application pinned as the device's home surface:
//! - Default-launcher detection against the preferred-activity registry
//! - Forced re-launch into a fresh task when the home role is lost
//! - Runtime-toggleable absorption of the volume rocker keys
//! - A request bridge for the host UI layer (check / restart / absorb)
//! - Shell-backed platform access for on-device supervision

pub mod activity;
pub mod bridge;
pub mod config;
pub mod core;
pub mod input;
pub mod launcher;
pub mod lockdown;
pub mod logging;
pub mod os;

// Re-export commonly used items
pub use activity::{KioskActivity, LifecycleState};
pub use bridge::{BridgeHandler, BridgeMethod, LineTransport, MethodCall, MethodResult};
pub use config::{AppIdentity, ConfigStore, ConfigStoreConfig, KioskConfig};
pub use crate::core::error::{KioskError, Result};
pub use input::{KeyAction, KeyCode, KeyEvent};
pub use launcher::{LauncherStatusGuard, LauncherWatch};
pub use lockdown::{should_consume, LockdownController, LockdownState};
pub use os::{ActivityHost, AndroidShellPlatform, Platform, StubPlatform};
