//! Log subscriber setup
//!
//! Replays log to stderr. The interactive calculator owns the terminal, so
//! it only logs when a log file was given.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;
use crate::error::CliResult;

/// Where log lines are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error, or the log file when one is configured
    Stderr,
    /// The log file only; nothing is logged without one
    FileOnly,
}

/// Builds the level filter: `RUST_LOG` wins over the verbosity flags
#[must_use]
pub fn env_filter(config: &CliConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.default_filter()))
}

/// Installs the global subscriber.
///
/// Returns `Ok(false)` when nothing was installed, either because the target
/// has nowhere to write or because a subscriber already exists.
pub fn init(config: &CliConfig, target: LogTarget) -> CliResult<bool> {
    let filter = env_filter(config);

    let installed = match (&config.log_file, target) {
        (Some(path), _) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_target(true),
                )
                .try_init()
                .is_ok()
        }
        (None, LogTarget::Stderr) => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(config.color.should_color())
                    .with_target(false),
            )
            .try_init()
            .is_ok(),
        (None, LogTarget::FileOnly) => false,
    };

    if installed {
        tracing::info!(
            verbosity = ?config.verbosity,
            log_file = ?config.log_file,
            "logging initialized"
        );
    }
    Ok(installed)
}
