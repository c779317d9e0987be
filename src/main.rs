//! Kiosk Lockdown command line entry point
//!
//! Usage:
//!   kiosk-lockdown [--config <PATH>] [--verbose] <check|restart|watch|bridge>

use std::path::PathBuf;

use anyhow::Context;

use kiosk_lockdown::bridge::{LineTransport, ServeExit};
use kiosk_lockdown::core::error::WatchError;
use kiosk_lockdown::launcher::WatchOutcome;
use kiosk_lockdown::logging::{LogLevel, LoggingConfig, LoggingSystem};
use kiosk_lockdown::{
    AndroidShellPlatform, ConfigStore, ConfigStoreConfig, KioskActivity, KioskConfig,
    LauncherStatusGuard, LauncherWatch,
};

/// Exit status of `check` when we do not hold the home role
const EXIT_NOT_DEFAULT: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Subcommand {
    Check,
    Restart,
    Watch,
    Bridge,
}

/// Command line arguments
struct Args {
    config_path: Option<PathBuf>,
    verbose: bool,
    command: Subcommand,
}

impl Args {
    fn parse() -> Result<Self, String> {
        let mut args = std::env::args().skip(1);
        let mut config_path = None;
        let mut verbose = false;
        let mut command = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    config_path = Some(
                        args.next()
                            .map(PathBuf::from)
                            .ok_or("--config requires a path")?,
                    );
                }
                "--verbose" | "-v" => {
                    verbose = true;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                "check" => command = Some(Subcommand::Check),
                "restart" => command = Some(Subcommand::Restart),
                "watch" => command = Some(Subcommand::Watch),
                "bridge" => command = Some(Subcommand::Bridge),
                _ => {
                    return Err(format!("Unknown argument: {}", arg));
                }
            }
        }

        let command = command.ok_or("a command is required")?;

        Ok(Self {
            config_path,
            verbose,
            command,
        })
    }
}

fn print_help() {
    println!(
        r#"Kiosk Lockdown - launcher lockdown controller

USAGE:
    kiosk-lockdown [OPTIONS] <COMMAND>

COMMANDS:
    check      Exit 0 if this package is the default launcher, 2 if not
    restart    Re-launch the entry activity in a fresh task
    watch      Poll launcher status and restart when the home role is lost
    bridge     Serve line-delimited JSON bridge messages on stdin/stdout

OPTIONS:
    -c, --config <PATH>    Configuration file (default: platform config dir)
    -v, --verbose          Enable debug logging
    -h, --help             Print this help message
"#
    );
}

fn init_logging(config: &KioskConfig, verbose: bool) -> Option<LoggingSystem> {
    let mut logging_config: LoggingConfig = config.logging.clone();
    if verbose {
        logging_config = logging_config.with_level(LogLevel::Debug);
    }

    match LoggingSystem::init(logging_config) {
        Ok(system) => Some(system),
        Err(e) => {
            eprintln!("Failed to initialize logging system: {}. Using basic logging.", e);
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::INFO.into()),
                )
                .init();
            None
        }
    }
}

fn guard(config: &KioskConfig) -> LauncherStatusGuard<AndroidShellPlatform> {
    LauncherStatusGuard::new(
        config.identity.clone(),
        AndroidShellPlatform::new(config.shell.clone()),
    )
}

fn run_check(config: &KioskConfig) -> i32 {
    if guard(config).is_default_launcher() {
        println!("default");
        0
    } else {
        println!("not default");
        EXIT_NOT_DEFAULT
    }
}

fn run_restart(config: &KioskConfig) -> i32 {
    guard(config).request_restart();
    0
}

fn run_watch(config: &KioskConfig) -> anyhow::Result<i32> {
    let mut watch = LauncherWatch::new(guard(config), config.launcher.clone());
    watch.start();

    loop {
        match watch.tick() {
            Ok(WatchOutcome::Inactive) => return Ok(0),
            Ok(WatchOutcome::Default) => tracing::debug!("Home role held"),
            Ok(WatchOutcome::Lost) => {}
            Ok(WatchOutcome::RestartIssued { attempt }) => {
                tracing::info!(attempt, "Waiting for relaunched instance");
            }
            Err(e @ WatchError::MaxRestartsExceeded { .. }) => {
                return Err(e).context("launcher watch gave up");
            }
        }
        std::thread::sleep(watch.check_interval());
    }
}

fn run_bridge(config: &KioskConfig) -> anyhow::Result<i32> {
    let mut activity = KioskActivity::new(
        config.identity.clone(),
        AndroidShellPlatform::new(config.shell.clone()),
    )
    .with_launcher_config(config.launcher.clone());

    activity.on_create();
    activity.on_resume();

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut transport = LineTransport::new(stdin.lock(), stdout.lock());

    match transport.serve(&mut activity).context("bridge transport failed")? {
        ServeExit::EndOfInput => activity.on_pause(),
        ServeExit::Finished => tracing::info!("Bridge closed after restart"),
    }
    Ok(0)
}

fn run(args: Args) -> anyhow::Result<i32> {
    let settings = match args.config_path {
        Some(ref path) => ConfigStoreConfig::at(path),
        None => ConfigStoreConfig::default(),
    };
    let store = ConfigStore::open(settings).context("failed to load configuration")?;
    let config = store.into_config();

    let _logging_system = init_logging(&config, args.verbose);

    tracing::info!(
        package = %config.identity.package_name,
        command = ?args.command,
        "Starting kiosk lockdown"
    );

    match args.command {
        Subcommand::Check => Ok(run_check(&config)),
        Subcommand::Restart => Ok(run_restart(&config)),
        Subcommand::Watch => run_watch(&config),
        Subcommand::Bridge => run_bridge(&config),
    }
}

fn main() {
    let args = match Args::parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!("kiosk-lockdown failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
