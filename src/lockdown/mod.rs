//! Lockdown Module
//!
//! Runtime lockdown of hardware keys:
//! - `LockdownController` owns the absorb flag
//! - `should_consume` is the pure per-event decision

mod controller;


pub use controller::{should_consume, LockdownController, LockdownState};
