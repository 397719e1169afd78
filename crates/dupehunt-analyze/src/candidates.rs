//! Size-based candidate filtering.
//!
//! A file whose size is unique in the scanned set cannot have a
//! byte-identical twin, so only files sharing a size are worth hashing.

use std::collections::HashMap;
use std::path::PathBuf;

use dupehunt_core::FileSet;

/// Return the paths whose size occurs more than once, sorted ascending.
///
/// Files with unknown or zero size are never candidates.
pub fn find_candidates(files: &FileSet) -> Vec<PathBuf> {
    let counts = size_counts(files);

    // FileSet iterates in path order, so the result is already sorted.
    files
        .iter()
        .filter(|record| {
            record
                .comparable_size()
                .is_some_and(|size| counts.get(&size).copied().unwrap_or(0) > 1)
        })
        .map(|record| record.path().to_path_buf())
        .collect()
}

/// Count how many files share each known, non-zero size.
pub fn size_counts(files: &FileSet) -> HashMap<u64, usize> {
    let mut counts: HashMap<u64, usize> = HashMap::new();
    for size in files.iter().filter_map(|r| r.comparable_size()) {
        *counts.entry(size).or_default() += 1;
    }
    counts
}
