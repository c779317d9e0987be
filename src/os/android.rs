//! Android shell platform
//!
//! Talks to the on-device package service (`cmd package resolve-activity`)
//! and activity manager (`am start`) through a [`CommandRunner`], so the
//! guard can run from a supervisor process on the device.

use std::process::Command;

use crate::config::ShellConfig;
use crate::core::error::PlatformError;
use crate::os::{
    ActivityLauncher, ComponentName, Intent, IntentFilter, PackageManager, PlatformResult,
    PreferredActivity,
};

/// Captured result of one command invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Seam over process execution
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<CommandOutput>;
}

/// Runs commands with `std::process::Command`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<CommandOutput> {
        let output = Command::new(program).args(args).output()?;
        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Component the system shows when no preferred handler is set
const RESOLVER_PACKAGE: &str = "android";
const RESOLVER_CLASS_SUFFIX: &str = "ResolverActivity";

/// Platform backed by the device shell tools
pub struct AndroidShellPlatform<R: CommandRunner = SystemCommandRunner> {
    runner: R,
    shell: ShellConfig,
}

impl AndroidShellPlatform<SystemCommandRunner> {
    pub fn new(shell: ShellConfig) -> Self {
        Self::with_runner(shell, SystemCommandRunner)
    }
}

impl<R: CommandRunner> AndroidShellPlatform<R> {
    pub fn with_runner(shell: ShellConfig, runner: R) -> Self {
        Self { runner, shell }
    }

    fn run_checked(&self, program: &str, args: &[String]) -> PlatformResult<CommandOutput> {
        tracing::debug!(program, ?args, "Running platform command");

        let output = self
            .runner
            .run(program, args)
            .map_err(|e| PlatformError::CommandFailed {
                program: program.to_string(),
                reason: e.to_string(),
            })?;

        if !output.success() {
            return Err(PlatformError::CommandStatus {
                program: program.to_string(),
                status: output.status,
                stderr: output.stderr.trim().to_string(),
            });
        }

        Ok(output)
    }

    fn resolve_args(filter: &IntentFilter) -> Vec<String> {
        let mut args = vec![
            "package".to_string(),
            "resolve-activity".to_string(),
            "--brief".to_string(),
        ];
        for action in &filter.actions {
            args.push("-a".to_string());
            args.push(action.clone());
        }
        for category in &filter.categories {
            args.push("-c".to_string());
            args.push(category.clone());
        }
        args
    }

    fn start_args(intent: &Intent) -> Vec<String> {
        let mut args = vec!["start".to_string()];
        if let Some(ref component) = intent.component {
            args.push("-n".to_string());
            args.push(component.flatten_to_short_string());
        }
        if let Some(ref action) = intent.action {
            args.push("-a".to_string());
            args.push(action.clone());
        }
        for category in &intent.categories {
            args.push("-c".to_string());
            args.push(category.clone());
        }
        args.push("-f".to_string());
        args.push(format!("{:#x}", intent.flags));
        args
    }
}

/// Extract the preferred component from `resolve-activity --brief` output.
///
/// The chooser activity and "No activity found" both mean no preference.
/// A sole installed home app resolves without any preferred binding, so this
/// reports it as preferred.
pub fn parse_resolved_component(stdout: &str) -> Option<ComponentName> {
    let line = stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()?;

    if line.starts_with("No activity found") {
        return None;
    }

    let component = ComponentName::parse(line)?;
    if component.package() == RESOLVER_PACKAGE
        && component.class_name().ends_with(RESOLVER_CLASS_SUFFIX)
    {
        return None;
    }
    Some(component)
}

impl<R: CommandRunner> PackageManager for AndroidShellPlatform<R> {
    fn preferred_activities(&self, filter: &IntentFilter) -> PlatformResult<Vec<PreferredActivity>> {
        let output = self
            .run_checked(&self.shell.cmd_program, &Self::resolve_args(filter))
            .map_err(|e| PlatformError::QueryFailed {
                reason: e.to_string(),
            })?;

        Ok(parse_resolved_component(&output.stdout)
            .map(|component| PreferredActivity::new(filter.clone(), component))
            .into_iter()
            .collect())
    }
}

impl<R: CommandRunner> ActivityLauncher for AndroidShellPlatform<R> {
    fn start_activity(&self, intent: &Intent) -> PlatformResult<()> {
        let component = intent
            .component
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();

        let output = self
            .run_checked(&self.shell.am_program, &Self::start_args(intent))
            .map_err(|e| PlatformError::LaunchFailed {
                component: component.clone(),
                reason: e.to_string(),
            })?;

        // am reports some failures on stdout with a zero exit status
        if let Some(line) = output
            .stdout
            .lines()
            .find(|line| line.trim_start().starts_with("Error"))
        {
            return Err(PlatformError::LaunchFailed {
                component,
                reason: line.trim().to_string(),
            });
        }

        Ok(())
    }
}
