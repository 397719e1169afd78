//! Directory scanning for dupehunt.
//!
//! This crate walks a directory tree with jwalk and produces a
//! [`FileSet`]: every regular file under the root with its size.
//!
//! # Overview
//!
//! - **Bounded** by `ScanConfig::max_files`; a truncated walk still yields
//!   a valid partial set
//! - **Non-fatal** per-file and per-directory errors are collected as
//!   warnings instead of aborting the scan
//! - **Progress updates** via broadcast channels
//!
//! # Example
//!
//! ```rust,no_run
//! use dupehunt_scan::{Scanner, ScanConfig};
//!
//! let config = ScanConfig::new("/path/to/scan");
//! let files = Scanner::new().scan(&config).unwrap();
//!
//! println!("Found {} files ({} bytes)", files.len(), files.total_size());
//! ```

mod progress;
mod scanner;

pub use progress::ScanProgress;
pub use scanner::Scanner;

// Re-export core types for convenience
pub use dupehunt_core::{FileRecord, FileSet, ScanConfig, ScanError, ScanWarning, WarningKind};
