//! Logging setup: stdout plus an optional append-mode log file.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::domain::AppError;

/// Install the global subscriber. Every event goes to stdout; when
/// `log_file` is given the same events are appended there without ANSI
/// escapes, so successive runs accumulate in one file.
pub fn init(log_file: Option<&Path>) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_target(false);

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().append(true).create(true).open(path)?;
            Some(fmt::layer().with_target(false).with_ansi(false).with_writer(Arc::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| AppError::Configuration(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}
