//! Tests for the Android shell platform

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::config::ShellConfig;
use crate::core::error::PlatformError;
use crate::os::android::parse_resolved_component;
use crate::os::*;

/// Replays canned outputs and records every invocation
#[derive(Default)]
struct ScriptedRunner {
    outputs: RefCell<VecDeque<std::io::Result<CommandOutput>>>,
    calls: RefCell<Vec<(String, Vec<String>)>>,
}

impl ScriptedRunner {
    fn push_ok(&self, stdout: &str) {
        self.outputs.borrow_mut().push_back(Ok(CommandOutput {
            status: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        }));
    }

    fn push_status(&self, status: i32, stderr: &str) {
        self.outputs.borrow_mut().push_back(Ok(CommandOutput {
            status: Some(status),
            stdout: String::new(),
            stderr: stderr.to_string(),
        }));
    }

    fn push_spawn_error(&self) {
        self.outputs.borrow_mut().push_back(Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        )));
    }
}

impl CommandRunner for &ScriptedRunner {
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<CommandOutput> {
        self.calls
            .borrow_mut()
            .push((program.to_string(), args.to_vec()));
        self.outputs
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(CommandOutput::default()))
    }
}

fn platform(runner: &ScriptedRunner) -> AndroidShellPlatform<&ScriptedRunner> {
    AndroidShellPlatform::with_runner(ShellConfig::default(), runner)
}

#[test]
fn test_parse_resolved_component() {
    let stdout = "priority=0 preferredOrder=0 match=0x108000 specificIndex=-1 isDefault=true\n\
                  com.example.attendance_tracker/.MainActivity\n";
    let component = parse_resolved_component(stdout).unwrap();
    assert_eq!(component.package(), "com.example.attendance_tracker");
    assert_eq!(
        component.class_name(),
        "com.example.attendance_tracker.MainActivity"
    );
}

#[test]
fn test_parse_resolver_means_no_preference() {
    let stdout = "priority=0 preferredOrder=0 match=0x0 specificIndex=-1 isDefault=false\n\
                  android/com.android.internal.app.ResolverActivity\n";
    assert!(parse_resolved_component(stdout).is_none());
}

// A lone home app resolves without a preferred binding and still counts
#[test]
fn test_parse_sole_home_app_counts_as_preferred() {
    let stdout = "priority=0 preferredOrder=0 match=0x108000 specificIndex=-1 isDefault=false\n\
                  com.example.attendance_tracker/.MainActivity\n";
    let component = parse_resolved_component(stdout).unwrap();
    assert_eq!(component.package(), "com.example.attendance_tracker");
}

#[test]
fn test_parse_empty_and_not_found() {
    assert!(parse_resolved_component("").is_none());
    assert!(parse_resolved_component("\n  \n").is_none());
    assert!(parse_resolved_component("No activity found\n").is_none());
}

#[test]
fn test_preferred_activities_builds_query() {
    let runner = ScriptedRunner::default();
    runner.push_ok("com.android.launcher3/.Launcher\n");

    let preferred = platform(&runner)
        .preferred_activities(&IntentFilter::home())
        .unwrap();

    assert_eq!(preferred.len(), 1);
    assert_eq!(preferred[0].component.package(), "com.android.launcher3");
    assert_eq!(preferred[0].filter, IntentFilter::home());

    let calls = runner.calls.borrow();
    assert_eq!(calls[0].0, "cmd");
    assert_eq!(
        calls[0].1,
        vec![
            "package",
            "resolve-activity",
            "--brief",
            "-a",
            ACTION_MAIN,
            "-c",
            CATEGORY_HOME
        ]
    );
}

#[test]
fn test_preferred_activities_command_failure() {
    let runner = ScriptedRunner::default();
    runner.push_status(255, "cmd: Can't find service: package");

    let result = platform(&runner).preferred_activities(&IntentFilter::home());
    match result {
        Err(PlatformError::QueryFailed { reason }) => {
            assert!(reason.contains("Can't find service"));
        }
        other => panic!("Expected QueryFailed, got {:?}", other),
    }
}

#[test]
fn test_preferred_activities_spawn_failure() {
    let runner = ScriptedRunner::default();
    runner.push_spawn_error();

    let result = platform(&runner).preferred_activities(&IntentFilter::home());
    assert!(matches!(result, Err(PlatformError::QueryFailed { .. })));
}

#[test]
fn test_start_activity_args() {
    let runner = ScriptedRunner::default();
    runner.push_ok("Starting: Intent { act=android.intent.action.MAIN }\n");

    let intent = Intent::restart(ComponentName::new("com.example.kiosk", ".MainActivity"));
    platform(&runner).start_activity(&intent).unwrap();

    let calls = runner.calls.borrow();
    assert_eq!(calls[0].0, "am");
    assert_eq!(
        calls[0].1,
        vec![
            "start",
            "-n",
            "com.example.kiosk/.MainActivity",
            "-a",
            ACTION_MAIN,
            "-f",
            "0x10008000"
        ]
    );
}

#[test]
fn test_start_activity_error_on_stdout() {
    let runner = ScriptedRunner::default();
    runner.push_ok(
        "Starting: Intent { cmp=com.example.kiosk/.Missing }\n\
         Error type 3\n\
         Error: Activity class {com.example.kiosk/com.example.kiosk.Missing} does not exist.\n",
    );

    let intent = Intent::restart(ComponentName::new("com.example.kiosk", ".Missing"));
    let result = platform(&runner).start_activity(&intent);
    assert!(matches!(result, Err(PlatformError::LaunchFailed { .. })));
}

#[test]
fn test_custom_program_names() {
    let runner = ScriptedRunner::default();
    runner.push_ok("No activity found\n");

    let shell = ShellConfig {
        cmd_program: "/system/bin/cmd".to_string(),
        am_program: "/system/bin/am".to_string(),
    };
    let platform = AndroidShellPlatform::with_runner(shell, &runner);

    assert!(platform
        .preferred_activities(&IntentFilter::home())
        .unwrap()
        .is_empty());
    assert_eq!(runner.calls.borrow()[0].0, "/system/bin/cmd");
}
