//! Filter → hash → confirm, timed.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::info;

use dupehunt_core::{FileSet, FinderConfig, HashAlgorithm};

use crate::candidates::find_candidates;
use crate::duplicates::{DuplicateGrouper, DuplicateGroups, HashTable, confirm_duplicates};

/// Everything the analysis stages produced for one file set.
#[derive(Debug, Clone)]
pub struct DuplicateAnalysis {
    /// Paths sharing a size with at least one other file.
    pub candidates: Vec<PathBuf>,
    /// Digest table over all successfully hashed candidates.
    pub table: HashTable,
    /// Digests shared by two or more paths.
    pub groups: DuplicateGroups,
    /// Time spent filtering by size.
    pub filter_duration: Duration,
    /// Time spent hashing and grouping.
    pub hash_duration: Duration,
}

impl DuplicateAnalysis {
    /// Check if any duplicates were found.
    pub fn has_duplicates(&self) -> bool {
        !self.groups.is_empty()
    }
}

/// Duplicate file finder.
pub struct DuplicateFinder {
    config: FinderConfig,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with default config.
    pub fn new() -> Self {
        Self {
            config: FinderConfig::default(),
        }
    }

    /// Create a new duplicate finder with custom config.
    pub fn with_config(config: FinderConfig) -> Self {
        Self { config }
    }

    /// Algorithm used for hashing.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.config.algorithm
    }

    /// Number of hashing workers.
    pub fn workers(&self) -> usize {
        self.config.workers
    }

    /// Find duplicates among the scanned files.
    pub fn find_duplicates(&self, files: &FileSet) -> DuplicateAnalysis {
        let start = Instant::now();
        let candidates = find_candidates(files);
        let filter_duration = start.elapsed();
        info!(
            candidates = candidates.len(),
            files = files.len(),
            "Size filter done"
        );

        let start = Instant::now();
        let grouper = DuplicateGrouper::new(&self.config);
        let table = grouper.group(&candidates);
        let groups = confirm_duplicates(&table, files);
        let hash_duration = start.elapsed();
        info!(
            algorithm = %self.config.algorithm,
            hashed = table.hashed_files(),
            failed = table.failed.len(),
            groups = groups.len(),
            "Hashing done in {:.2}s",
            hash_duration.as_secs_f64()
        );

        DuplicateAnalysis {
            candidates,
            table,
            groups,
            filter_duration,
            hash_duration,
        }
    }
}

impl Default for DuplicateFinder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dupehunt_core::FileRecord;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_duplicates_on_records() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("file1.txt"), "duplicate content here").unwrap();
        fs::write(root.join("file2.txt"), "duplicate content here").unwrap();
        fs::write(root.join("file3.txt"), "different content here").unwrap();
        fs::write(root.join("file4.txt"), "short").unwrap();

        let files = FileSet::from_records(
            root,
            ["file1.txt", "file2.txt", "file3.txt", "file4.txt"].map(|name| {
                let path = root.join(name);
                let size = fs::metadata(&path).unwrap().len();
                FileRecord::new(path, size)
            }),
        );

        let analysis = DuplicateFinder::new().find_duplicates(&files);

        assert_eq!(analysis.candidates.len(), 3);
        assert_eq!(analysis.table.len(), 2);
        assert_eq!(analysis.groups.len(), 1);
        let group = analysis.groups.values().next().unwrap();
        assert_eq!(group.paths, vec![root.join("file1.txt"), root.join("file2.txt")]);
        assert_eq!(group.size, 22);
    }

    #[test]
    fn test_find_duplicates_empty() {
        let analysis = DuplicateFinder::new().find_duplicates(&FileSet::default());
        assert!(analysis.candidates.is_empty());
        assert!(analysis.table.is_empty());
        assert!(!analysis.has_duplicates());
    }
}
