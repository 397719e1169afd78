//! Scan result container.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::error::ScanWarning;
use crate::record::FileRecord;

/// All files observed by one scan, keyed by path.
///
/// Built once by the scanner and only read afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileSet {
    /// Root path that was scanned.
    pub root_path: PathBuf,

    /// When this scan was performed.
    pub scanned_at: Option<SystemTime>,

    /// Duration of the scan.
    pub scan_duration: Duration,

    /// Whether the walk stopped early at the file limit.
    pub truncated: bool,

    /// Warnings encountered during scan.
    pub warnings: Vec<ScanWarning>,

    records: BTreeMap<PathBuf, FileRecord>,
}

impl FileSet {
    /// Create an empty set for the given root.
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        Self {
            root_path: root_path.into(),
            ..Self::default()
        }
    }

    /// Build a set from existing records.
    pub fn from_records(
        root_path: impl Into<PathBuf>,
        records: impl IntoIterator<Item = FileRecord>,
    ) -> Self {
        let mut set = Self::new(root_path);
        for record in records {
            set.insert(record);
        }
        set
    }

    /// Insert a record. Returns `false` if the path was already present,
    /// in which case the existing record is kept.
    pub fn insert(&mut self, record: FileRecord) -> bool {
        if self.records.contains_key(&record.path) {
            return false;
        }
        self.records.insert(record.path.clone(), record);
        true
    }

    /// Look up a record by path.
    pub fn get(&self, path: &Path) -> Option<&FileRecord> {
        self.records.get(path)
    }

    /// Known size of a path, if any.
    pub fn size_of(&self, path: &Path) -> Option<u64> {
        self.records.get(path).and_then(|r| r.size)
    }

    /// Iterate records in path order.
    pub fn iter(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.values()
    }

    /// Number of recorded files.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no files were recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of files whose size is unknown.
    pub fn unknown_sizes(&self) -> usize {
        self.records.values().filter(|r| r.size.is_none()).count()
    }

    /// Sum of all known sizes in bytes.
    pub fn total_size(&self) -> u64 {
        self.records.values().filter_map(|r| r.size).sum()
    }

    /// Check if there were any warnings during scanning.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set() {
        let set = FileSet::new("/test");
        assert!(set.is_empty());
        assert_eq!(set.total_size(), 0);
        assert!(!set.has_warnings());
    }

    #[test]
    fn test_insert_keeps_first_record() {
        let mut set = FileSet::new("/test");
        assert!(set.insert(FileRecord::new("/test/a", 10)));
        assert!(!set.insert(FileRecord::new("/test/a", 20)));

        assert_eq!(set.len(), 1);
        assert_eq!(set.size_of(Path::new("/test/a")), Some(10));
    }

    #[test]
    fn test_total_size_skips_unknown() {
        let set = FileSet::from_records(
            "/test",
            [
                FileRecord::new("/test/a", 123),
                FileRecord::new("/test/b", 456),
                FileRecord::unknown_size("/test/c"),
            ],
        );

        assert_eq!(set.total_size(), 579);
        assert_eq!(set.unknown_sizes(), 1);
        assert_eq!(set.size_of(Path::new("/test/c")), None);
    }
}
