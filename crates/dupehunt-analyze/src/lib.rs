//! Analysis stages for dupehunt.
//!
//! Given a scanned [`FileSet`], this crate finds byte-identical files:
//!
//! 1. Keep only files whose size is shared with another file (instant)
//! 2. Hash those candidates on a small worker pool, streaming each file
//! 3. Group paths by digest and keep digests with two or more paths
//!
//! It also builds the run [`Report`] and appends it to a results file.
//!
//! ```rust,ignore
//! use dupehunt_analyze::{DuplicateFinder, ReportBuilder, ReportInput, StageTimings};
//! use dupehunt_scan::{Scanner, ScanConfig};
//!
//! let files = Scanner::new().scan(&ScanConfig::new("/path/to/scan")).unwrap();
//!
//! let finder = DuplicateFinder::new();
//! let analysis = finder.find_duplicates(&files);
//!
//! println!("Found {} duplicate groups", analysis.groups.len());
//! ```

pub mod candidates;
pub mod duplicates;
mod finder;
pub mod hasher;
pub mod report;
mod results;

pub use candidates::find_candidates;
pub use duplicates::{
    DuplicateGroup, DuplicateGrouper, DuplicateGroups, HashEntry, HashOutcome, HashTable,
    confirm_duplicates, representative_size,
};
pub use finder::{DuplicateAnalysis, DuplicateFinder};
pub use hasher::{HASH_BLOCK_SIZE, Hasher};
pub use report::{ByteTotals, Report, ReportBuilder, ReportInput, StageTimings, render_groups};
pub use results::{ResultsError, append_report};

// Re-export core types
pub use dupehunt_core::{ContentHash, FileRecord, FileSet, FinderConfig, HashAlgorithm, SizeUnit};
