//! Append-only results file.
//!
//! Each run adds exactly one JSON line, so the file can be diffed or
//! streamed line by line.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::report::Report;

/// Failure to persist a report.
#[derive(Debug, Error)]
pub enum ResultsError {
    /// The results file could not be opened or written.
    #[error("Cannot write results to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The report could not be encoded.
    #[error("Cannot encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Append one report line to `path`, creating the file if needed.
pub fn append_report(path: &Path, report: &Report) -> Result<(), ResultsError> {
    let mut line = report.to_json_line()?;
    line.push('\n');

    let io_err = |source: std::io::Error| ResultsError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err)?;
    // A single write keeps each record contiguous for a lone writer.
    file.write_all(line.as_bytes()).map_err(io_err)?;
    file.flush().map_err(io_err)?;

    tracing::debug!(path = %path.display(), "Results appended");
    Ok(())
}
