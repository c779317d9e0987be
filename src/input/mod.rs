//! Key event model
//!
//! Key codes follow the platform's numbering so raw codes coming from the
//! host can be wrapped without translation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hardware/platform key code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub i32);

impl KeyCode {
    pub const UNKNOWN: KeyCode = KeyCode(0);
    pub const HOME: KeyCode = KeyCode(3);
    pub const BACK: KeyCode = KeyCode(4);
    pub const VOLUME_UP: KeyCode = KeyCode(24);
    pub const VOLUME_DOWN: KeyCode = KeyCode(25);
    pub const POWER: KeyCode = KeyCode(26);
    pub const A: KeyCode = KeyCode(29);
    pub const ENTER: KeyCode = KeyCode(66);
    pub const VOLUME_MUTE: KeyCode = KeyCode(164);

    /// One of the two volume rocker codes
    pub const fn is_volume_rocker(self) -> bool {
        self.0 == Self::VOLUME_UP.0 || self.0 == Self::VOLUME_DOWN.0
    }
}

impl From<i32> for KeyCode {
    fn from(code: i32) -> Self {
        KeyCode(code)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            KeyCode::HOME => write!(f, "KEYCODE_HOME"),
            KeyCode::BACK => write!(f, "KEYCODE_BACK"),
            KeyCode::VOLUME_UP => write!(f, "KEYCODE_VOLUME_UP"),
            KeyCode::VOLUME_DOWN => write!(f, "KEYCODE_VOLUME_DOWN"),
            KeyCode::POWER => write!(f, "KEYCODE_POWER"),
            KeyCode(code) => write!(f, "KEYCODE_{}", code),
        }
    }
}

/// Direction of a key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyAction {
    Down,
    Up,
}

/// Raw key event payload as delivered by the input pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub action: KeyAction,
    pub key_code: KeyCode,
    /// Auto-repeat count for held keys
    #[serde(default)]
    pub repeat_count: u32,
    #[serde(default)]
    pub scan_code: i32,
    #[serde(default)]
    pub meta_state: i32,
    /// Event time in milliseconds since boot
    #[serde(default)]
    pub event_time_ms: i64,
}

impl KeyEvent {
    pub fn new(action: KeyAction, key_code: KeyCode) -> Self {
        Self {
            action,
            key_code,
            repeat_count: 0,
            scan_code: 0,
            meta_state: 0,
            event_time_ms: 0,
        }
    }

    pub fn down(key_code: KeyCode) -> Self {
        Self::new(KeyAction::Down, key_code)
    }

    pub fn up(key_code: KeyCode) -> Self {
        Self::new(KeyAction::Up, key_code)
    }

    pub fn with_repeat(mut self, repeat_count: u32) -> Self {
        self.repeat_count = repeat_count;
        self
    }
}
