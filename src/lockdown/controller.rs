//! Volume-key lockdown controller

use serde::{Deserialize, Serialize};

use crate::input::{KeyCode, KeyEvent};

/// Observable lockdown state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockdownState {
    /// Volume keys pass through to default handling
    #[default]
    Unlocked,
    /// Volume keys are consumed
    Locked,
}

/// Whether a key event is swallowed under the given absorb flag
pub fn should_consume(absorb: bool, key_code: KeyCode) -> bool {
    absorb && key_code.is_volume_rocker()
}

/// Gates the volume rocker behind a runtime-toggleable flag.
///
/// The flag is read on every event and never cached, so a toggle between
/// a key-down and its key-up applies to the up.
#[derive(Debug, Default)]
pub struct LockdownController {
    absorb_volume_keys: bool,
}

impl LockdownController {
    /// Controller in the unlocked state
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the absorb flag; takes effect on the next event
    pub fn set_absorb_volume_keys(&mut self, enabled: bool) {
        if self.absorb_volume_keys != enabled {
            tracing::info!(enabled, "Volume key absorption changed");
        }
        self.absorb_volume_keys = enabled;
    }

    /// Current absorb flag
    pub fn absorbs_volume_keys(&self) -> bool {
        self.absorb_volume_keys
    }

    /// Lockdown state derived from the absorb flag
    pub fn state(&self) -> LockdownState {
        if self.absorb_volume_keys {
            LockdownState::Locked
        } else {
            LockdownState::Unlocked
        }
    }

    /// Key-down filter. `default` runs only when the event is not consumed.
    pub fn on_key_down<F>(&self, key_code: KeyCode, event: &KeyEvent, default: F) -> bool
    where
        F: FnOnce(KeyCode, &KeyEvent) -> bool,
    {
        self.filter("down", key_code, event, default)
    }

    /// Key-up filter, evaluated independently of the matching key-down.
    pub fn on_key_up<F>(&self, key_code: KeyCode, event: &KeyEvent, default: F) -> bool
    where
        F: FnOnce(KeyCode, &KeyEvent) -> bool,
    {
        self.filter("up", key_code, event, default)
    }

    fn filter<F>(&self, direction: &'static str, key_code: KeyCode, event: &KeyEvent, default: F) -> bool
    where
        F: FnOnce(KeyCode, &KeyEvent) -> bool,
    {
        if should_consume(self.absorb_volume_keys, key_code) {
            tracing::trace!(direction, %key_code, repeat = event.repeat_count, "Absorbed key event");
            return true;
        }
        default(key_code, event)
    }
}
