//! Duplicate file detection using content hashing.
//!
//! Candidates (files that share a size with another file) are hashed on a
//! small worker pool, then grouped by digest on the calling thread. Only
//! digests shared by two or more paths become duplicate groups.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use dupehunt_core::{ContentHash, FileSet, FinderConfig, HashError};

use crate::hasher::Hasher;

/// All paths that produced one digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashEntry {
    /// Digest shared by every path in this entry.
    pub hash: ContentHash,

    /// Member paths, sorted, each at most once.
    pub paths: BTreeSet<PathBuf>,
}

impl HashEntry {
    /// Number of member paths.
    pub fn count(&self) -> usize {
        self.paths.len()
    }
}

/// Digest → paths table built while hashing candidates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HashTable {
    entries: BTreeMap<ContentHash, HashEntry>,

    /// Candidates that could not be hashed.
    pub failed: Vec<PathBuf>,
}

impl HashTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `path` has digest `hash`.
    ///
    /// Returns `false` if the path was already recorded under that digest.
    pub fn add(&mut self, hash: ContentHash, path: impl Into<PathBuf>) -> bool {
        self.entries
            .entry(hash.clone())
            .or_insert_with(|| HashEntry {
                hash,
                paths: BTreeSet::new(),
            })
            .paths
            .insert(path.into())
    }

    /// Look up the entry for a digest.
    pub fn get(&self, hash: &ContentHash) -> Option<&HashEntry> {
        self.entries.get(hash)
    }

    /// Iterate entries in digest order.
    pub fn iter(&self) -> impl Iterator<Item = &HashEntry> {
        self.entries.values()
    }

    /// Number of distinct digests.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no digests were recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of successfully hashed paths.
    pub fn hashed_files(&self) -> usize {
        self.entries.values().map(HashEntry::count).sum()
    }
}

/// A group of duplicate files sharing the same content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Content hash shared by all files in this group.
    pub hash: ContentHash,

    /// Size of each file in bytes.
    pub size: u64,

    /// Paths to all duplicate files, sorted.
    pub paths: Vec<PathBuf>,

    /// Wasted space: size * (count - 1).
    pub wasted_bytes: u64,
}

impl DuplicateGroup {
    /// Get the number of duplicate files.
    pub fn count(&self) -> usize {
        self.paths.len()
    }

    /// Check if keeping one file, how many could be deleted.
    pub fn deletable_count(&self) -> usize {
        self.paths.len().saturating_sub(1)
    }
}

/// Confirmed duplicate groups keyed by digest.
pub type DuplicateGroups = BTreeMap<ContentHash, DuplicateGroup>;

/// Result of hashing one candidate.
#[derive(Debug)]
pub struct HashOutcome {
    /// Candidate path.
    pub path: PathBuf,
    /// Digest, or the reason hashing failed.
    pub result: Result<ContentHash, HashError>,
}

/// Hashes candidates and groups them by digest.
pub struct DuplicateGrouper {
    hasher: Hasher,
    workers: usize,
}

impl DuplicateGrouper {
    /// Create a grouper from finder configuration.
    pub fn new(config: &FinderConfig) -> Self {
        Self::with_hasher(Hasher::new(config.algorithm), config.workers)
    }

    /// Create a grouper with an explicit hasher and worker count.
    pub fn with_hasher(hasher: Hasher, workers: usize) -> Self {
        Self {
            hasher,
            workers: workers.max(1),
        }
    }

    /// Hash every candidate on the worker pool.
    ///
    /// Outcomes are sorted by path, so callers see the same order no matter
    /// which worker finished first.
    pub fn hash_candidates(&self, candidates: &[PathBuf]) -> Vec<HashOutcome> {
        let hasher = self.hasher;
        let hash_one = |path: &PathBuf| HashOutcome {
            path: path.clone(),
            result: hasher.hash_file(path),
        };

        let outcomes: Vec<HashOutcome> = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("dupehunt-hash-{i}"))
            .build()
        {
            Ok(pool) => pool.install(|| candidates.par_iter().map(hash_one).collect()),
            Err(err) => {
                warn!("Could not start hashing pool ({err}), hashing on this thread");
                candidates.iter().map(hash_one).collect()
            }
        };

        outcomes
            .into_iter()
            .sorted_by(|a, b| a.path.cmp(&b.path))
            .collect()
    }

    /// Hash the candidates and build the digest table.
    ///
    /// Files that cannot be hashed are logged and left out of every entry.
    pub fn group(&self, candidates: &[PathBuf]) -> HashTable {
        let mut table = HashTable::new();

        for outcome in self.hash_candidates(candidates) {
            match outcome.result {
                Ok(hash) => {
                    debug!(path = %outcome.path.display(), %hash, "Hashed");
                    if !table.add(hash, &outcome.path) {
                        debug!(path = %outcome.path.display(), "Path already grouped");
                    }
                }
                Err(err) => {
                    error!(path = %err.path().display(), "Skipping file: {err}");
                    table.failed.push(outcome.path);
                }
            }
        }

        table
    }
}

/// Keep only digests shared by two or more paths.
pub fn confirm_duplicates(table: &HashTable, files: &FileSet) -> DuplicateGroups {
    table
        .iter()
        .filter(|entry| entry.count() > 1)
        .map(|entry| {
            let size = representative_size(&entry.paths, files);
            let paths: Vec<PathBuf> = entry.paths.iter().cloned().collect();
            let wasted_bytes = size * (paths.len() as u64 - 1);
            let group = DuplicateGroup {
                hash: entry.hash.clone(),
                size,
                paths,
                wasted_bytes,
            };
            (entry.hash.clone(), group)
        })
        .collect()
}

/// Size shared by the members of a digest entry.
///
/// Uses the size recorded during the scan when any member has one,
/// otherwise asks the filesystem, otherwise 0.
pub fn representative_size<'a>(
    paths: impl IntoIterator<Item = &'a PathBuf>,
    files: &FileSet,
) -> u64 {
    let paths: Vec<&Path> = paths.into_iter().map(PathBuf::as_path).collect();

    if let Some(size) = paths.iter().find_map(|p| files.size_of(p)) {
        return size;
    }

    paths
        .iter()
        .find_map(|p| fs::metadata(p).ok().map(|m| m.len()))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dupehunt_core::FileRecord;
    use tempfile::TempDir;

    fn hash(s: &str) -> ContentHash {
        ContentHash::from_hex(s)
    }

    #[test]
    fn test_add_first_time() {
        let mut table = HashTable::new();
        assert!(table.add(hash("aa00"), "path0"));

        let entry = table.get(&hash("aa00")).unwrap();
        assert_eq!(entry.paths, BTreeSet::from([PathBuf::from("path0")]));
    }

    #[test]
    fn test_add_second_path() {
        let mut table = HashTable::new();
        table.add(hash("aa00"), "path0");
        assert!(table.add(hash("aa00"), "path1"));

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&hash("aa00")).unwrap().count(), 2);
    }

    #[test]
    fn test_add_same_path_is_idempotent() {
        let mut table = HashTable::new();
        table.add(hash("aa00"), "path0");
        assert!(!table.add(hash("aa00"), "path0"));

        assert_eq!(table.get(&hash("aa00")).unwrap().count(), 1);
        assert_eq!(table.hashed_files(), 1);
    }

    #[test]
    fn test_members_stay_sorted() {
        let mut table = HashTable::new();
        table.add(hash("aa00"), "c");
        table.add(hash("aa00"), "a");
        table.add(hash("aa00"), "b");

        let paths: Vec<_> = table.get(&hash("aa00")).unwrap().paths.iter().cloned().collect();
        assert_eq!(paths, ["a", "b", "c"].map(PathBuf::from).to_vec());
    }

    #[test]
    fn test_confirm_keeps_only_shared_digests() {
        let mut table = HashTable::new();
        table.add(hash("aa00"), "/path0");
        table.add(hash("aa00"), "/path1");
        table.add(hash("bb11"), "/path2");

        let groups = confirm_duplicates(&table, &FileSet::default());

        assert_eq!(groups.len(), 1);
        let group = &groups[&hash("aa00")];
        assert_eq!(group.paths, vec![PathBuf::from("/path0"), PathBuf::from("/path1")]);
        // Neither path exists on disk or in the set.
        assert_eq!(group.size, 0);
    }

    #[test]
    fn test_confirm_unique_digests_is_empty() {
        let mut table = HashTable::new();
        table.add(hash("aa00"), "/path0");
        table.add(hash("bb11"), "/path1");

        assert!(confirm_duplicates(&table, &FileSet::default()).is_empty());
        assert!(confirm_duplicates(&HashTable::new(), &FileSet::default()).is_empty());
    }

    #[test]
    fn test_representative_size_prefers_scanned_size() {
        let files = FileSet::from_records("/", [FileRecord::new("/test_file", 1000)]);
        let paths = [PathBuf::from("/test_file")];
        assert_eq!(representative_size(&paths, &files), 1000);
    }

    #[test]
    fn test_representative_size_falls_back_to_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test_file.bin");
        std::fs::write(&path, vec![0u8; 2000]).unwrap();

        let files = FileSet::from_records("/", [FileRecord::unknown_size(&path)]);
        assert_eq!(representative_size([&path], &files), 2000);
    }

    #[test]
    fn test_representative_size_zero_when_unknown() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.bin");
        assert_eq!(representative_size([&path], &FileSet::default()), 0);
    }

    #[test]
    fn test_group_wasted_bytes() {
        let mut table = HashTable::new();
        for p in ["/a", "/b", "/c"] {
            table.add(hash("cc22"), p);
        }
        let files = FileSet::from_records(
            "/",
            ["/a", "/b", "/c"].map(|p| FileRecord::new(p, 4096)),
        );

        let groups = confirm_duplicates(&table, &files);
        let group = &groups[&hash("cc22")];
        assert_eq!(group.count(), 3);
        assert_eq!(group.deletable_count(), 2);
        assert_eq!(group.wasted_bytes, 8192);
    }
}
