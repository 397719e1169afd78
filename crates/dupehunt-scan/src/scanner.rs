//! JWalk-based directory scanner.

use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

use jwalk::{Parallelism, WalkDir};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use dupehunt_core::{FileRecord, FileSet, ScanConfig, ScanError, ScanWarning};

use crate::progress::ScanProgress;

/// How often (in files) a progress snapshot is published.
const PROGRESS_INTERVAL: usize = 1000;

/// Walks a directory tree and records the size of every regular file.
pub struct Scanner {
    progress_tx: broadcast::Sender<ScanProgress>,
}

impl Scanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self { progress_tx }
    }

    /// Subscribe to scan progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanProgress> {
        self.progress_tx.subscribe()
    }

    /// Perform a scan of the configured root.
    ///
    /// Only a missing or unreadable root is fatal. Per-file and
    /// per-directory problems are collected as warnings on the result.
    pub fn scan(&self, config: &ScanConfig) -> Result<FileSet, ScanError> {
        let start = Instant::now();
        let root_path = config
            .root
            .canonicalize()
            .map_err(|e| ScanError::io(&config.root, e))?;

        if !root_path.is_dir() {
            return Err(ScanError::NotADirectory { path: root_path });
        }

        info!(root = %root_path.display(), max_files = config.max_files, "Scanning");

        let mut files = FileSet::new(&root_path);
        files.scanned_at = Some(SystemTime::now());
        self.collect_files(config, &root_path, &mut files, start);
        files.scan_duration = start.elapsed();

        self.publish(&files, files.total_size(), root_path.clone(), files.scan_duration);

        info!(
            files = files.len(),
            warnings = files.warnings.len(),
            unknown_sizes = files.unknown_sizes(),
            truncated = files.truncated,
            "Scan finished in {:.2}s",
            files.scan_duration.as_secs_f64()
        );

        Ok(files)
    }

    /// Walk the tree, filling `files` until the walk ends or the limit is hit.
    fn collect_files(&self, config: &ScanConfig, root_path: &Path, files: &mut FileSet, start: Instant) {
        // Serial, sorted traversal keeps the file-limit cut-off reproducible.
        let walker = WalkDir::new(root_path)
            .parallelism(Parallelism::Serial)
            .sort(true)
            .skip_hidden(false)
            .follow_links(false)
            .min_depth(1);
        let mut bytes = 0u64;

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
                    let warning = ScanWarning::read_error(path, &err);
                    warn!(path = %warning.path.display(), "{}", warning.message);
                    files.warnings.push(warning);
                    continue;
                }
            };

            // jwalk reports a directory it could not list on the directory's own entry.
            if let Some(err) = &entry.read_children_error {
                let warning = ScanWarning::read_error(entry.path(), err);
                warn!(path = %warning.path.display(), "{}", warning.message);
                files.warnings.push(warning);
            }

            // Directories are only traversed; symlinks and special files are skipped.
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let (record, warning) = file_record(path.clone(), entry.metadata().map_err(io::Error::from));
            if let Some(warning) = warning {
                warn!(path = %path.display(), "{}", warning.message);
                files.warnings.push(warning);
            }

            let size = record.size.unwrap_or(0);
            if !files.insert(record) {
                debug!(path = %path.display(), "Skipping path seen twice");
                continue;
            }
            bytes += size;

            if files.len() % PROGRESS_INTERVAL == 0 {
                self.publish(files, bytes, path.clone(), start.elapsed());
            }

            if config.limit_reached(files.len()) {
                files.truncated = true;
                info!(max_files = config.max_files, "File limit reached, stopping walk");
                break;
            }
        }
    }

    fn publish(&self, files: &FileSet, bytes: u64, current_path: PathBuf, elapsed: Duration) {
        // No subscribers is not an error.
        let _ = self.progress_tx.send(ScanProgress {
            files_scanned: files.len() as u64,
            bytes_scanned: bytes,
            current_path,
            errors_count: files.warnings.len() as u64,
            elapsed,
        });
    }
}

/// Record for a regular file, with a warning when its size is unknown.
fn file_record(path: PathBuf, metadata: io::Result<Metadata>) -> (FileRecord, Option<ScanWarning>) {
    match metadata {
        Ok(metadata) => (FileRecord::new(path, metadata.len()), None),
        Err(err) => {
            let warning = ScanWarning::metadata_error(&path, &err);
            (FileRecord::unknown_size(path), Some(warning))
        }
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}
