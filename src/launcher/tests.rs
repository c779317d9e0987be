//! Tests for the launcher guard and watch

use proptest::prelude::*;

use super::*;
use crate::config::{AppIdentity, LauncherConfig};
use crate::core::error::WatchError;
use crate::os::*;

const OWN_PACKAGE: &str = "com.example.attendance_tracker";

fn identity() -> AppIdentity {
    AppIdentity::new(OWN_PACKAGE, ".MainActivity")
}

fn own_component() -> ComponentName {
    ComponentName::new(OWN_PACKAGE, ".MainActivity")
}

fn other_launcher() -> ComponentName {
    ComponentName::new("com.android.launcher3", ".Launcher")
}

#[derive(Default)]
struct RecordingHost {
    finish_calls: u32,
}

impl ActivityHost for RecordingHost {
    fn finish(&mut self) {
        self.finish_calls += 1;
    }

    fn is_finished(&self) -> bool {
        self.finish_calls > 0
    }
}

#[test]
fn test_default_when_own_package_preferred() {
    let platform = StubPlatform::with_default_home(own_component());
    let guard = LauncherStatusGuard::new(identity(), &platform);
    assert!(guard.is_default_launcher());
}

#[test]
fn test_not_default_when_registry_empty() {
    let platform = StubPlatform::new();
    let guard = LauncherStatusGuard::new(identity(), &platform);
    assert!(!guard.is_default_launcher());
}

#[test]
fn test_not_default_when_other_launcher_preferred() {
    let platform = StubPlatform::with_default_home(other_launcher());
    let guard = LauncherStatusGuard::new(identity(), &platform);
    assert!(!guard.is_default_launcher());
}

#[test]
fn test_not_default_when_query_fails() {
    let platform = StubPlatform::with_default_home(own_component());
    platform.set_query_failure(true);
    let guard = LauncherStatusGuard::new(identity(), &platform);
    assert!(!guard.is_default_launcher());
}

#[test]
fn test_binding_for_other_filter_is_ignored() {
    let platform = StubPlatform::new();
    platform.add_preferred(PreferredActivity::new(
        IntentFilter::new("android.intent.action.VIEW").with_category(CATEGORY_DEFAULT),
        own_component(),
    ));
    let guard = LauncherStatusGuard::new(identity(), &platform);
    assert!(!guard.is_default_launcher());
}

#[test]
fn test_any_class_in_own_package_counts() {
    let platform = StubPlatform::with_default_home(ComponentName::new(OWN_PACKAGE, ".AliasHome"));
    let guard = LauncherStatusGuard::new(identity(), &platform);
    assert!(guard.is_default_launcher());
}

#[test]
fn test_registry_refetched_on_every_check() {
    let platform = StubPlatform::new();
    let guard = LauncherStatusGuard::new(identity(), &platform);
    assert!(!guard.is_default_launcher());

    platform.set_default_home(own_component());
    assert!(guard.is_default_launcher());

    platform.set_default_home(other_launcher());
    assert!(!guard.is_default_launcher());
}

#[test]
fn test_check_does_not_launch() {
    let platform = StubPlatform::new();
    let guard = LauncherStatusGuard::new(identity(), &platform);
    guard.is_default_launcher();
    assert!(platform.launched_intents().is_empty());
}

#[test]
fn test_restart_app_issues_intent_and_finishes() {
    let platform = StubPlatform::with_default_home(other_launcher());
    let guard = LauncherStatusGuard::new(identity(), &platform);
    let mut host = RecordingHost::default();

    guard.restart_app(&mut host);

    assert!(host.is_finished());
    let launched = platform.launched_intents();
    assert_eq!(launched.len(), 1);
    assert_eq!(launched[0].component, Some(own_component()));
    assert!(launched[0]
        .flags
        .contains(IntentFlags::NEW_TASK | IntentFlags::CLEAR_TASK));
}

#[test]
fn test_restart_app_finishes_when_already_default() {
    let platform = StubPlatform::with_default_home(own_component());
    let guard = LauncherStatusGuard::new(identity(), &platform);
    let mut host = RecordingHost::default();

    guard.restart_app(&mut host);
    assert_eq!(host.finish_calls, 1);
}

#[test]
fn test_restart_app_finishes_when_launch_fails() {
    let platform = StubPlatform::new();
    platform.set_launch_failure(true);
    let guard = LauncherStatusGuard::new(identity(), &platform);
    let mut host = RecordingHost::default();

    guard.restart_app(&mut host);
    assert!(host.is_finished());
}

#[test]
fn test_restart_does_not_touch_registry() {
    let platform = StubPlatform::with_default_home(other_launcher());
    let guard = LauncherStatusGuard::new(identity(), &platform);
    let mut host = RecordingHost::default();

    guard.restart_app(&mut host);
    assert!(!guard.is_default_launcher());
}

fn watch_config(auto_restart: bool, max_restart_attempts: u32) -> LauncherConfig {
    LauncherConfig {
        check_on_resume: true,
        watch_interval_ms: 10,
        auto_restart,
        max_restart_attempts,
    }
}

#[test]
fn test_watch_inactive_until_started() {
    let platform = StubPlatform::new();
    let guard = LauncherStatusGuard::new(identity(), &platform);
    let mut watch = LauncherWatch::new(guard, watch_config(true, 3));

    assert_eq!(watch.state(), WatchState::Idle);
    assert_eq!(watch.tick().unwrap(), WatchOutcome::Inactive);
    assert!(platform.launched_intents().is_empty());
}

#[test]
fn test_watch_reports_default() {
    let platform = StubPlatform::with_default_home(own_component());
    let guard = LauncherStatusGuard::new(identity(), &platform);
    let mut watch = LauncherWatch::new(guard, watch_config(true, 3));
    watch.start();

    assert_eq!(watch.tick().unwrap(), WatchOutcome::Default);
    assert_eq!(watch.restart_count(), 0);
}

#[test]
fn test_watch_gives_up_after_max_attempts() {
    let platform = StubPlatform::with_default_home(other_launcher());
    let guard = LauncherStatusGuard::new(identity(), &platform);
    let mut watch = LauncherWatch::new(guard, watch_config(true, 2));
    watch.start();

    assert_eq!(watch.tick().unwrap(), WatchOutcome::RestartIssued { attempt: 1 });
    assert_eq!(watch.tick().unwrap(), WatchOutcome::RestartIssued { attempt: 2 });
    assert!(matches!(
        watch.tick(),
        Err(WatchError::MaxRestartsExceeded { attempts: 2 })
    ));
    assert_eq!(watch.state(), WatchState::Failed);
    assert!(watch.tick().is_err());
    assert_eq!(platform.launched_intents().len(), 2);
}

#[test]
fn test_watch_resets_count_when_role_regained() {
    let platform = StubPlatform::new();
    let guard = LauncherStatusGuard::new(identity(), &platform);
    let mut watch = LauncherWatch::new(guard, watch_config(true, 2));
    watch.start();

    assert_eq!(watch.tick().unwrap(), WatchOutcome::RestartIssued { attempt: 1 });

    platform.set_default_home(own_component());
    assert_eq!(watch.tick().unwrap(), WatchOutcome::Default);
    assert_eq!(watch.restart_count(), 0);

    platform.clear_preferred();
    assert_eq!(watch.tick().unwrap(), WatchOutcome::RestartIssued { attempt: 1 });
}

#[test]
fn test_watch_without_auto_restart() {
    let platform = StubPlatform::new();
    let guard = LauncherStatusGuard::new(identity(), &platform);
    let mut watch = LauncherWatch::new(guard, watch_config(false, 2));
    watch.start();

    assert_eq!(watch.tick().unwrap(), WatchOutcome::Lost);
    assert_eq!(watch.tick().unwrap(), WatchOutcome::Lost);
    assert!(platform.launched_intents().is_empty());
}

#[test]
fn test_watch_stop() {
    let platform = StubPlatform::new();
    let guard = LauncherStatusGuard::new(identity(), &platform);
    let mut watch = LauncherWatch::new(guard, watch_config(true, 2));
    watch.start();
    watch.stop();

    assert_eq!(watch.tick().unwrap(), WatchOutcome::Inactive);
    assert_eq!(watch.check_interval(), std::time::Duration::from_millis(10));
}

fn package_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(OWN_PACKAGE.to_string()),
        Just("com.android.launcher3".to_string()),
        "[a-z]{1,8}(\\.[a-z]{1,8}){1,3}",
    ]
}

fn filter() -> impl Strategy<Value = IntentFilter> {
    prop_oneof![
        Just(IntentFilter::home()),
        Just(IntentFilter::home().with_category(CATEGORY_DEFAULT)),
        Just(IntentFilter::new(ACTION_MAIN).with_category("android.intent.category.LAUNCHER")),
        Just(IntentFilter::new("android.intent.action.VIEW")),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Default iff some home binding names our package
    #[test]
    fn default_iff_own_package_in_home_set(
        bindings in prop::collection::vec((filter(), package_name()), 0..6)
    ) {
        let platform = StubPlatform::new();
        for (filter, package) in &bindings {
            platform.add_preferred(PreferredActivity::new(
                filter.clone(),
                ComponentName::new(package.as_str(), ".Home"),
            ));
        }

        let home = IntentFilter::home();
        let expected = bindings
            .iter()
            .any(|(filter, package)| filter.matches(&home) && package == OWN_PACKAGE);

        let guard = LauncherStatusGuard::new(identity(), &platform);
        prop_assert_eq!(guard.is_default_launcher(), expected);
    }
}
