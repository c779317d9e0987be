//! Kiosk Activity
//!
//! Host-activity adapter wiring the launcher guard and the lockdown
//! controller to the events a host delivers: lifecycle callbacks, raw key
//! events and bridge method calls. Once finished (after a restart) the
//! instance receives nothing further.


use crate::bridge::{BridgeHandler, BridgeMethod, MethodCall, MethodResult};
use crate::config::{AppIdentity, LauncherConfig};
use crate::core::error::BridgeError;
use crate::input::{KeyAction, KeyCode, KeyEvent};
use crate::launcher::LauncherStatusGuard;
use crate::lockdown::{LockdownController, LockdownState};
use crate::os::{ActivityHost, Platform};

/// Activity lifecycle stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Created,
    Resumed,
    Paused,
    Finished,
}

/// Lifecycle tracker; the part of the activity a restart finishes
#[derive(Debug, Default)]
pub struct Lifecycle {
    state: LifecycleState,
}

impl Lifecycle {
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    fn transition(&mut self, next: LifecycleState) {
        if self.state != LifecycleState::Finished {
            self.state = next;
        }
    }
}

impl ActivityHost for Lifecycle {
    fn finish(&mut self) {
        if self.state != LifecycleState::Finished {
            tracing::info!(from = ?self.state, "Activity finishing");
        }
        self.state = LifecycleState::Finished;
    }

    fn is_finished(&self) -> bool {
        self.state == LifecycleState::Finished
    }
}

/// Default key handling when the controller forwards an event
pub type DefaultKeyHandler = Box<dyn FnMut(KeyCode, &KeyEvent) -> bool>;

pub struct KioskActivity<P: Platform> {
    guard: LauncherStatusGuard<P>,
    controller: LockdownController,
    lifecycle: Lifecycle,
    launcher_config: LauncherConfig,
    default_key_handler: DefaultKeyHandler,
}

impl<P: Platform> KioskActivity<P> {
    pub fn new(identity: AppIdentity, platform: P) -> Self {
        Self {
            guard: LauncherStatusGuard::new(identity, platform),
            controller: LockdownController::new(),
            lifecycle: Lifecycle::default(),
            launcher_config: LauncherConfig::default(),
            default_key_handler: Box::new(|_, _| false),
        }
    }

    pub fn with_launcher_config(mut self, config: LauncherConfig) -> Self {
        self.launcher_config = config;
        self
    }

    /// Install the platform's default key handling chain
    pub fn with_default_key_handler<F>(mut self, handler: F) -> Self
    where
        F: FnMut(KeyCode, &KeyEvent) -> bool + 'static,
    {
        self.default_key_handler = Box::new(handler);
        self
    }

    pub fn lifecycle_state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub fn lockdown_state(&self) -> LockdownState {
        self.controller.state()
    }

    pub fn on_create(&mut self) {
        tracing::debug!(package = %self.guard.identity().package_name, "Activity created");
        self.lifecycle.transition(LifecycleState::Created);
    }

    /// Resume callback; checks launcher status when configured to.
    ///
    /// Returns the observed status, or `None` when no check ran.
    pub fn on_resume(&mut self) -> Option<bool> {
        if self.lifecycle.is_finished() {
            return None;
        }
        self.lifecycle.transition(LifecycleState::Resumed);

        if !self.launcher_config.check_on_resume {
            return None;
        }
        let is_default = self.guard.is_default_launcher();
        if !is_default {
            tracing::warn!("Resumed without the home role");
        }
        Some(is_default)
    }

    pub fn on_pause(&mut self) {
        self.lifecycle.transition(LifecycleState::Paused);
    }

    pub fn is_default_launcher(&self) -> bool {
        self.guard.is_default_launcher()
    }

    /// Issue the restart directive and finish this instance
    pub fn restart_app(&mut self) {
        self.guard.restart_app(&mut self.lifecycle);
    }

    pub fn set_absorb_volume_keys(&mut self, enabled: bool) {
        self.controller.set_absorb_volume_keys(enabled);
    }

    pub fn on_key_down(&mut self, key_code: KeyCode, event: &KeyEvent) -> bool {
        if self.lifecycle.is_finished() {
            return false;
        }
        let default = &mut self.default_key_handler;
        self.controller
            .on_key_down(key_code, event, |code, event| default(code, event))
    }

    pub fn on_key_up(&mut self, key_code: KeyCode, event: &KeyEvent) -> bool {
        if self.lifecycle.is_finished() {
            return false;
        }
        let default = &mut self.default_key_handler;
        self.controller
            .on_key_up(key_code, event, |code, event| default(code, event))
    }

    fn dispatch(&mut self, method: BridgeMethod) -> MethodResult {
        tracing::debug!(method = method.name(), "Bridge call");
        match method {
            BridgeMethod::CheckDefaultLauncher => MethodResult::success(self.is_default_launcher()),
            BridgeMethod::RestartToHome => {
                self.restart_app();
                MethodResult::ack()
            }
            BridgeMethod::SetAbsorbVolumeKeys { enabled } => {
                self.set_absorb_volume_keys(enabled);
                MethodResult::ack()
            }
        }
    }
}

impl<P: Platform> BridgeHandler for KioskActivity<P> {
    fn handle_method_call(&mut self, call: &MethodCall) -> MethodResult {
        if self.lifecycle.is_finished() {
            return BridgeError::ActivityFinished.into();
        }

        match BridgeMethod::parse(call) {
            Ok(method) => self.dispatch(method),
            Err(e) => {
                tracing::warn!(method = %call.method, error = %e, "Rejected bridge call");
                e.into()
            }
        }
    }

    fn dispatch_key_event(&mut self, event: &KeyEvent) -> bool {
        match event.action {
            KeyAction::Down => self.on_key_down(event.key_code, event),
            KeyAction::Up => self.on_key_up(event.key_code, event),
        }
    }

    fn is_finished(&self) -> bool {
        self.lifecycle.is_finished()
    }
}
