//! Console and log file setup.

use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber.
///
/// Everything goes to the log file at `log_path`. The console layer writes
/// to stderr and is left out entirely when `quiet` is set. `RUST_LOG`
/// overrides the level picked from `verbose`.
///
/// If the log file cannot be opened the run goes on with console logging
/// only, and `None` is returned. Otherwise keep the returned guard alive
/// until exit or buffered lines are lost.
pub fn init(log_path: &Path, quiet: bool, verbose: bool) -> Option<WorkerGuard> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let (file_layer, guard, open_error) = match open_log_file(log_path) {
        Ok(appender) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(non_blocking).with_ansi(false);
            (Some(layer), Some(guard), None)
        }
        Err(err) => (None, None, Some(err)),
    };

    let console = (!quiet).then(|| {
        fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .without_time()
    });

    tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .with(filter)
        .init();

    if let Some(err) = open_error {
        warn!(
            path = %log_path.display(),
            "Cannot open log file, logging to the console only: {err}"
        );
    }

    guard
}

/// Open (or create) the log file for appending.
fn open_log_file(log_path: &Path) -> io::Result<RollingFileAppender> {
    let (dir, file_name) = split_log_path(log_path)?;
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy().into_owned())
        .build(dir)
        .map_err(io::Error::other)
}

/// Split a log path into the directory the appender writes in and the file name.
fn split_log_path(path: &Path) -> io::Result<(PathBuf, PathBuf)> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("log path {} has no file name", path.display()),
        )
    })?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    Ok((dir, PathBuf::from(file_name)))
}
