//! Tracing setup: human-readable console output plus an append-only JSON log file.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Open `path` for appending, creating it if needed
pub fn open_log_file(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber.
///
/// A log file that cannot be opened is not fatal: logging continues on the
/// console only. Returns whether the file layer is active.
pub fn init_tracing(log_file: &Path) -> Result<bool> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let (file, file_error) = match open_log_file(log_file) {
        Ok(file) => (Some(file), None),
        Err(e) => (None, Some(e)),
    };
    let file_enabled = file.is_some();
    let file_layer = file.map(|file| {
        fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .try_init()?;

    match file_error {
        None => info!(path = %log_file.display(), "File logging enabled"),
        Some(e) => warn!(
            path = %log_file.display(),
            error = %e,
            "Cannot open log file, logging to console only"
        ),
    }

    Ok(file_enabled)
}
