//! Launcher Module
//!
//! Keeps the application pinned as the home surface:
//! - `LauncherStatusGuard` detects and restores the home role
//! - `LauncherWatch` polls the guard for an external supervisor

mod guard;
mod watch;

#[cfg(test)]
mod tests;

pub use guard::LauncherStatusGuard;
pub use watch::{LauncherWatch, WatchOutcome, WatchState};
