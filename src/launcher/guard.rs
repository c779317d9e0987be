//! Launcher status guard
//!
//! Checks whether this package holds the home role and issues the restart
//! directive when it does not.

use crate::config::AppIdentity;
use crate::os::{ActivityHost, Intent, IntentFilter, Platform};

/// Home-role check plus one-shot corrective restart
pub struct LauncherStatusGuard<P: Platform> {
    platform: P,
    identity: AppIdentity,
}

impl<P: Platform> LauncherStatusGuard<P> {
    pub fn new(identity: AppIdentity, platform: P) -> Self {
        Self { platform, identity }
    }

    pub fn identity(&self) -> &AppIdentity {
        &self.identity
    }

    /// True iff our package is among the preferred home handlers.
    ///
    /// The registry is queried fresh on every call. An empty result or a
    /// failed query both mean "not default".
    pub fn is_default_launcher(&self) -> bool {
        let home = IntentFilter::home();

        let preferred = match self.platform.preferred_activities(&home) {
            Ok(preferred) => preferred,
            Err(e) => {
                tracing::warn!(error = %e, "Preferred activity query failed, treating as not default");
                return false;
            }
        };

        let is_default = preferred.iter().any(|binding| {
            binding.filter.matches(&home)
                && binding.component.package() == self.identity.package_name
        });

        tracing::debug!(
            package = %self.identity.package_name,
            candidates = preferred.len(),
            is_default,
            "Checked default launcher"
        );
        is_default
    }

    /// Hand the restart directive to the OS without waiting on the result
    pub fn request_restart(&self) {
        let intent = Intent::restart(self.identity.entry_component());

        match self.platform.start_activity(&intent) {
            Ok(()) => tracing::info!(
                component = ?intent.component,
                flags = intent.flags.bits(),
                "Restart directive issued"
            ),
            Err(e) => tracing::warn!(error = %e, "Restart directive was not accepted"),
        }
    }

    /// Issue the restart directive, then finish `host` unconditionally.
    ///
    /// Callers re-check status from the new instance.
    pub fn restart_app<H: ActivityHost + ?Sized>(&self, host: &mut H) {
        self.request_restart();
        host.finish();
    }
}
