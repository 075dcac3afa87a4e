// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logging setup.
//!
//! [`init`] installs the global subscriber described by `[log]` and returns
//! a [`LogGuard`]. Dropping the guard flushes buffered file records, so
//! `main` holds it until exit.

use std::path::Path;

use pluginhub_config::model::{LogConfig, LogFormat, LogOutput};
use pluginhub_core::PluginHubError;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps the background log writers alive.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _guards: Vec<WorkerGuard>,
}

/// Install the global subscriber for the service.
///
/// `RUST_LOG` overrides `log.level` when set.
pub fn init(config: &LogConfig) -> Result<LogGuard, PluginHubError> {
    let mut layers: Vec<BoxedLayer> = Vec::new();
    let mut guards = Vec::new();

    if matches!(config.output, LogOutput::Console | LogOutput::Both) {
        let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
        layers.push(fmt_layer(config.format, writer, true));
        guards.push(guard);
    }

    if matches!(config.output, LogOutput::File | LogOutput::Both) {
        let appender = rolling_appender(config)?;
        let (writer, guard) = tracing_appender::non_blocking(appender);
        layers.push(fmt_layer(config.format, writer, false));
        guards.push(guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter(&config.level))
        .try_init()
        .map_err(|e| PluginHubError::Internal(format!("failed to install log subscriber: {e}")))?;

    Ok(LogGuard { _guards: guards })
}

/// Daily rolling file appender keeping at most `log.max_files` files.
fn rolling_appender(config: &LogConfig) -> Result<RollingFileAppender, PluginHubError> {
    let directory = Path::new(&config.directory);
    std::fs::create_dir_all(directory).map_err(|e| {
        PluginHubError::Config(format!(
            "failed to create log directory {}: {e}",
            directory.display()
        ))
    })?;
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(&config.file_name)
        .max_log_files(config.max_files)
        .build(directory)
        .map_err(|e| {
            PluginHubError::Config(format!(
                "failed to open log file in {}: {e}",
                directory.display()
            ))
        })
}

/// Minimal stderr logging for one-shot CLI commands.
pub fn init_cli() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("warn"))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},hyper=warn,h2=warn,rustls=warn")))
}

fn fmt_layer<W>(format: LogFormat, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Console => tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(true)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .with_current_span(true)
            .boxed(),
    }
}
