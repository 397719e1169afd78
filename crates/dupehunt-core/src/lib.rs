//! Core types for dupehunt.
//!
//! This crate provides the data structures shared by the scanning and
//! analysis stages: file records, the scanned file set, configuration,
//! size units, digest algorithms and error types.

mod algorithm;
mod config;
mod error;
mod file_set;
mod record;
mod unit;

pub use algorithm::HashAlgorithm;
pub use config::{
    DEFAULT_WORKERS, FinderConfig, FinderConfigBuilder, ScanConfig, ScanConfigBuilder,
};
pub use error::{ConfigError, HashError, ScanError, ScanWarning, WarningKind};
pub use file_set::FileSet;
pub use record::{ContentHash, FileRecord};
pub use unit::SizeUnit;
