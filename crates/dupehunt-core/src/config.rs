//! Scan and duplicate-finder configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::algorithm::HashAlgorithm;

/// Default number of hashing workers.
pub const DEFAULT_WORKERS: usize = 2;

/// Configuration for scanning operations.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root path to scan.
    pub root: PathBuf,

    /// Stop after this many files have been recorded (0 = unlimited).
    #[builder(default = "0")]
    #[serde(default)]
    pub max_files: usize,
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a simple config for scanning a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_files: 0,
        }
    }

    /// Whether the walk should stop once `count` files have been recorded.
    pub fn limit_reached(&self, count: usize) -> bool {
        self.max_files > 0 && count >= self.max_files
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Configuration for the hashing and grouping stages.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct FinderConfig {
    /// Digest algorithm used for content hashing.
    #[builder(default)]
    #[serde(default)]
    pub algorithm: HashAlgorithm,

    /// Number of hashing worker threads.
    #[builder(default = "DEFAULT_WORKERS")]
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

impl FinderConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.workers == Some(0) {
            return Err("At least one hashing worker is required".to_string());
        }
        Ok(())
    }
}

impl FinderConfig {
    /// Create a new finder config builder.
    pub fn builder() -> FinderConfigBuilder {
        FinderConfigBuilder::default()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::default(),
            workers: DEFAULT_WORKERS,
        }
    }
}
