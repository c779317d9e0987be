//! Tracing setup for the controller binary.
//!
//! One global subscriber: an `EnvFilter` built from [`LoggingConfig`], then
//! an optional stderr layer and an optional rolling file layer.

mod config;


pub use config::{LogFormat, LogLevel, LogOutput, LogRotation, LoggingConfig};

use std::path::PathBuf;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Log directory {path:?} unavailable: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid log filter `{directives}`: {reason}")]
    Filter { directives: String, reason: String },

    #[error("A global subscriber is already installed: {0}")]
    AlreadyInstalled(String),
}

pub type LoggingResult<T> = Result<T, LoggingError>;

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync>;

const LOG_FILE_PREFIX: &str = "kiosk-lockdown.log";

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Daily => Rotation::DAILY,
            LogRotation::Hourly => Rotation::HOURLY,
            LogRotation::Never => Rotation::NEVER,
        }
    }
}

/// Installed subscriber. Hold it for the life of the process; dropping it
/// flushes the file writer.
pub struct LoggingSystem {
    _file_guard: Option<WorkerGuard>,
}

impl LoggingSystem {
    pub fn init(config: LoggingConfig) -> LoggingResult<Self> {
        let filter = env_filter(&config)?;
        let stderr = config.output.writes_stderr().then(|| stderr_layer(&config));
        let (file, file_guard) = if config.output.writes_file() {
            let (layer, guard) = file_layer(&config)?;
            (Some(layer), Some(guard))
        } else {
            (None, None)
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr)
            .with(file)
            .try_init()
            .map_err(|e| LoggingError::AlreadyInstalled(e.to_string()))?;

        tracing::debug!(level = %config.level, output = ?config.output, "Logging initialized");
        Ok(Self {
            _file_guard: file_guard,
        })
    }
}

pub(crate) fn env_filter(config: &LoggingConfig) -> LoggingResult<EnvFilter> {
    let directives = config.filter_directives();
    EnvFilter::try_new(&directives).map_err(|e| LoggingError::Filter {
        reason: e.to_string(),
        directives,
    })
}

fn stderr_layer<S>(config: &LoggingConfig) -> BoxedLayer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    match config.format {
        LogFormat::Json => layer.json().boxed(),
        LogFormat::Text => layer.boxed(),
    }
}

fn file_layer<S>(config: &LoggingConfig) -> LoggingResult<(BoxedLayer<S>, WorkerGuard)>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let directory = prepare_directory(config)?;
    let appender = RollingFileAppender::new(config.rotation.into(), &directory, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    let layer = match config.format {
        LogFormat::Json => layer.json().boxed(),
        LogFormat::Text => layer.boxed(),
    };
    Ok((layer, guard))
}

/// Resolve the log directory and create it if missing
pub(crate) fn prepare_directory(config: &LoggingConfig) -> LoggingResult<PathBuf> {
    let path = config.directory_or_default();
    std::fs::create_dir_all(&path).map_err(|source| LoggingError::Directory {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
