//! Stub platform
//!
//! In-memory preferred-activity registry and launch log, for hosts without a
//! real package manager and for tests.

use std::cell::{Cell, RefCell};

use crate::core::error::PlatformError;
use crate::os::{
    ActivityLauncher, ComponentName, Intent, IntentFilter, PackageManager, PlatformResult,
    PreferredActivity,
};

/// Stub platform
#[derive(Debug, Default)]
pub struct StubPlatform {
    preferred: RefCell<Vec<PreferredActivity>>,
    launched: RefCell<Vec<Intent>>,
    fail_queries: Cell<bool>,
    fail_launches: Cell<bool>,
}

impl StubPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry where `component` is the preferred home handler
    pub fn with_default_home(component: ComponentName) -> Self {
        let platform = Self::new();
        platform.set_default_home(component);
        platform
    }

    /// Replace any home binding with one for `component`
    pub fn set_default_home(&self, component: ComponentName) {
        let home = IntentFilter::home();
        let mut preferred = self.preferred.borrow_mut();
        preferred.retain(|binding| !binding.filter.matches(&home));
        preferred.push(PreferredActivity::home(component));
    }

    pub fn add_preferred(&self, binding: PreferredActivity) {
        self.preferred.borrow_mut().push(binding);
    }

    pub fn clear_preferred(&self) {
        self.preferred.borrow_mut().clear();
    }

    /// Make subsequent registry queries fail
    pub fn set_query_failure(&self, fail: bool) {
        self.fail_queries.set(fail);
    }

    /// Make subsequent launches fail
    pub fn set_launch_failure(&self, fail: bool) {
        self.fail_launches.set(fail);
    }

    /// Intents handed to `start_activity`, oldest first
    pub fn launched_intents(&self) -> Vec<Intent> {
        self.launched.borrow().clone()
    }
}

impl PackageManager for StubPlatform {
    fn preferred_activities(&self, _filter: &IntentFilter) -> PlatformResult<Vec<PreferredActivity>> {
        if self.fail_queries.get() {
            return Err(PlatformError::QueryFailed {
                reason: "stub registry unavailable".to_string(),
            });
        }
        // Unfiltered, like a registry query without a package constraint
        Ok(self.preferred.borrow().clone())
    }
}

impl ActivityLauncher for StubPlatform {
    fn start_activity(&self, intent: &Intent) -> PlatformResult<()> {
        self.launched.borrow_mut().push(intent.clone());

        if self.fail_launches.get() {
            let component = intent
                .component
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default();
            return Err(PlatformError::LaunchFailed {
                component,
                reason: "stub launcher refused".to_string(),
            });
        }
        Ok(())
    }
}
