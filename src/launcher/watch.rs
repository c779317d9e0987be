//! Launcher watch
//!
//! Polls launcher status for an external supervisor and re-issues the
//! restart directive when the home role is lost. Consecutive restarts are
//! capped; regaining the role resets the count.

use std::time::Duration;

use crate::config::LauncherConfig;
use crate::core::error::WatchError;
use crate::launcher::LauncherStatusGuard;
use crate::os::Platform;

/// Watch state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    /// Initial state, not yet started
    Idle,
    /// Checking status on every tick
    Monitoring,
    /// Stopped by the caller
    Stopped,
    /// Gave up after max restart attempts
    Failed,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    /// Not monitoring (idle or stopped)
    Inactive,
    /// We hold the home role
    Default,
    /// Home role lost and auto restart is off
    Lost,
    /// Home role lost, restart directive issued
    RestartIssued { attempt: u32 },
}

pub struct LauncherWatch<P: Platform> {
    guard: LauncherStatusGuard<P>,
    config: LauncherConfig,
    state: WatchState,
    restart_count: u32,
}

impl<P: Platform> LauncherWatch<P> {
    pub fn new(guard: LauncherStatusGuard<P>, config: LauncherConfig) -> Self {
        Self {
            guard,
            config,
            state: WatchState::Idle,
            restart_count: 0,
        }
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    pub fn restart_count(&self) -> u32 {
        self.restart_count
    }

    pub fn start(&mut self) {
        if self.state == WatchState::Idle || self.state == WatchState::Stopped {
            tracing::info!(
                interval_ms = self.config.watch_interval_ms,
                auto_restart = self.config.auto_restart,
                "Launcher watch started"
            );
            self.state = WatchState::Monitoring;
        }
    }

    pub fn stop(&mut self) {
        self.state = WatchState::Stopped;
    }

    /// Run one check
    pub fn tick(&mut self) -> Result<WatchOutcome, WatchError> {
        match self.state {
            WatchState::Idle | WatchState::Stopped => Ok(WatchOutcome::Inactive),
            WatchState::Failed => Err(WatchError::MaxRestartsExceeded {
                attempts: self.restart_count,
            }),
            WatchState::Monitoring => self.check(),
        }
    }

    fn check(&mut self) -> Result<WatchOutcome, WatchError> {
        if self.guard.is_default_launcher() {
            if self.restart_count > 0 {
                tracing::info!(
                    attempts = self.restart_count,
                    "Home role regained, resetting restart count"
                );
                self.restart_count = 0;
            }
            return Ok(WatchOutcome::Default);
        }

        if !self.config.auto_restart {
            tracing::warn!("Home role lost, auto restart disabled");
            return Ok(WatchOutcome::Lost);
        }

        if self.restart_count >= self.config.max_restart_attempts {
            tracing::error!(
                max = self.config.max_restart_attempts,
                "Max restart attempts exceeded, giving up"
            );
            self.state = WatchState::Failed;
            return Err(WatchError::MaxRestartsExceeded {
                attempts: self.restart_count,
            });
        }

        self.restart_count += 1;
        tracing::warn!(
            attempt = self.restart_count,
            max = self.config.max_restart_attempts,
            "Home role lost, restarting"
        );
        self.guard.request_restart();

        Ok(WatchOutcome::RestartIssued {
            attempt: self.restart_count,
        })
    }

    /// Get the check interval duration
    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.config.watch_interval_ms)
    }
}
