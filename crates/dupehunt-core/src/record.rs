//! Per-file scan records.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Hex-encoded content digest used to group identical files.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    /// Create a hash from raw digest bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(bytes.iter().map(|b| format!("{b:02x}")).collect())
    }

    /// Wrap an already hex-encoded digest.
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into().to_ascii_lowercase())
    }

    /// Get the hash as a hex string.
    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_hex())
    }
}

/// A regular file observed during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Absolute path of the file.
    pub path: PathBuf,

    /// Size in bytes, or `None` when metadata could not be read.
    pub size: Option<u64>,
}

impl FileRecord {
    /// Create a record with a known size.
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size: Some(size),
        }
    }

    /// Create a record whose size is unknown.
    pub fn unknown_size(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            size: None,
        }
    }

    /// Path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size if it is known and non-zero.
    ///
    /// Empty files carry no content to compare, so they are treated the
    /// same as files of unknown size when looking for duplicates.
    pub fn comparable_size(&self) -> Option<u64> {
        self.size.filter(|&s| s > 0)
    }
}
