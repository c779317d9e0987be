//! OS Integration Layer
//!
//! Platform facilities the launcher guard depends on:
//! - Preferred-activity registry queries
//! - Activity launch
//! - Activity instance termination
//!
//! `StubPlatform` is an in-memory implementation; `AndroidShellPlatform`
//! drives the device's package and activity manager tools.

pub mod android;
pub mod intent;
pub mod stub;

#[cfg(test)]
mod tests;

pub use android::{AndroidShellPlatform, CommandOutput, CommandRunner, SystemCommandRunner};
pub use intent::{
    ComponentName, Intent, IntentFilter, IntentFlags, PreferredActivity, ACTION_MAIN,
    CATEGORY_DEFAULT, CATEGORY_HOME,
};
pub use stub::StubPlatform;

use crate::core::error::PlatformError;

/// Result type for platform calls
pub type PlatformResult<T> = std::result::Result<T, PlatformError>;

/// Read access to the preferred-activity registry
pub trait PackageManager {
    /// Preferred bindings relevant to `filter`.
    ///
    /// Implementations may return extra bindings; callers filter again.
    fn preferred_activities(&self, filter: &IntentFilter) -> PlatformResult<Vec<PreferredActivity>>;
}

/// Hands launch directives to the OS
pub trait ActivityLauncher {
    fn start_activity(&self, intent: &Intent) -> PlatformResult<()>;
}

/// Everything the launcher guard needs from the platform
pub trait Platform: PackageManager + ActivityLauncher {}

impl<T: PackageManager + ActivityLauncher> Platform for T {}

/// The activity instance that ends when a restart is issued
pub trait ActivityHost {
    /// Terminate this instance; it receives no further events afterwards
    fn finish(&mut self);

    fn is_finished(&self) -> bool;
}

impl<T: PackageManager + ?Sized> PackageManager for &T {
    fn preferred_activities(&self, filter: &IntentFilter) -> PlatformResult<Vec<PreferredActivity>> {
        (**self).preferred_activities(filter)
    }
}

impl<T: ActivityLauncher + ?Sized> ActivityLauncher for &T {
    fn start_activity(&self, intent: &Intent) -> PlatformResult<()> {
        (**self).start_activity(intent)
    }
}
