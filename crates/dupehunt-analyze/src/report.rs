//! Run summary: counts, sizes and stage timings.
//!
//! [`ReportBuilder`] does all the arithmetic once. A [`Report`] is then only
//! formatted, either as `Key: Value` lines for the console or as a single
//! JSON line for the results file. Field order is fixed by the struct.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use dupehunt_core::{FileSet, HashAlgorithm, SizeUnit};

use crate::duplicates::{DuplicateGroups, HashTable, representative_size};
use crate::finder::DuplicateAnalysis;

/// Separator printed around duplicate groups.
const GROUP_SEPARATOR_WIDTH: usize = 100;

/// Elapsed time per pipeline stage.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StageTimings {
    pub scan: Duration,
    pub filter: Duration,
    pub hash: Duration,
    /// Wall time of the whole run.
    pub total: Duration,
}

impl StageTimings {
    /// Combine the scan duration with the analysis stage durations.
    pub fn from_stages(scan: Duration, analysis: &DuplicateAnalysis, total: Duration) -> Self {
        Self {
            scan,
            filter: analysis.filter_duration,
            hash: analysis.hash_duration,
            total,
        }
    }
}

/// Raw byte totals behind the converted report sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByteTotals {
    pub scanned: u64,
    pub hashed: u64,
    pub duplicated: u64,
}

/// Everything the report is computed from.
pub struct ReportInput<'a> {
    pub files: &'a FileSet,
    pub candidates: &'a [PathBuf],
    pub table: &'a HashTable,
    pub groups: &'a DuplicateGroups,
    pub timings: StageTimings,
    pub algorithm: HashAlgorithm,
    pub workers: usize,
    pub started_at: DateTime<Local>,
}

impl<'a> ReportInput<'a> {
    /// Assemble input from a scan and its analysis.
    pub fn new(
        files: &'a FileSet,
        analysis: &'a DuplicateAnalysis,
        timings: StageTimings,
        algorithm: HashAlgorithm,
        workers: usize,
        started_at: DateTime<Local>,
    ) -> Self {
        Self {
            files,
            candidates: &analysis.candidates,
            table: &analysis.table,
            groups: &analysis.groups,
            timings,
            algorithm,
            workers,
            started_at,
        }
    }
}

/// One run's results, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    #[serde(rename = "Target directory")]
    pub target_directory: String,
    #[serde(rename = "Started at")]
    pub started_at: String,
    #[serde(rename = "Files found")]
    pub files_found: usize,
    #[serde(rename = "Scanned size")]
    pub scanned_size: String,
    #[serde(rename = "Scan duration")]
    pub scan_duration: String,
    #[serde(rename = "Candidates")]
    pub candidates: usize,
    #[serde(rename = "Filter duration")]
    pub filter_duration: String,
    #[serde(rename = "Files hashed")]
    pub files_hashed: usize,
    #[serde(rename = "Hash failures")]
    pub hash_failures: usize,
    #[serde(rename = "Hashed size")]
    pub hashed_size: String,
    #[serde(rename = "Hash duration")]
    pub hash_duration: String,
    #[serde(rename = "Duplicates found")]
    pub duplicates_found: usize,
    #[serde(rename = "Duplicate files")]
    pub duplicate_files: usize,
    #[serde(rename = "Duplicates size")]
    pub duplicates_size: String,
    #[serde(rename = "Total duration")]
    pub total_duration: String,
    #[serde(rename = "Workers")]
    pub workers: usize,
    #[serde(rename = "Algorithm")]
    pub algorithm: String,
    #[serde(rename = "Truncated")]
    pub truncated: bool,
    #[serde(rename = "Warnings")]
    pub warnings: usize,

    /// Unrounded totals, kept for callers that need bytes.
    #[serde(skip)]
    pub bytes: ByteTotals,
    #[serde(skip)]
    pub unit: SizeUnit,
}

impl Report {
    /// Ordered key → value view of the report.
    ///
    /// Empty, with the failure logged, if the report cannot be encoded.
    pub fn fields(&self) -> IndexMap<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map.into_iter().collect(),
            Ok(other) => {
                tracing::error!("Report encoded as {other}, not an object");
                IndexMap::new()
            }
            Err(err) => {
                tracing::error!("Cannot encode report: {err}");
                IndexMap::new()
            }
        }
    }

    /// Render as `Key: Value` lines.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Serialize as one line of JSON.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.fields() {
            match value {
                Value::String(s) => writeln!(f, "{key}: {s}")?,
                other => writeln!(f, "{key}: {other}")?,
            }
        }
        Ok(())
    }
}

/// Builds a [`Report`] for a given size unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportBuilder {
    unit: SizeUnit,
}

impl ReportBuilder {
    pub fn new(unit: SizeUnit) -> Self {
        Self { unit }
    }

    /// Compute every report field from the pipeline outputs.
    pub fn build(&self, input: &ReportInput<'_>) -> Report {
        let bytes = ByteTotals {
            scanned: scanned_bytes(input.files),
            hashed: hashed_bytes(input.table, input.files),
            duplicated: duplicated_bytes(input.groups),
        };

        Report {
            target_directory: input.files.root_path.display().to_string(),
            started_at: input.started_at.to_rfc3339(),
            files_found: input.files.len(),
            scanned_size: self.format_size(bytes.scanned),
            scan_duration: format_duration(input.timings.scan),
            candidates: input.candidates.len(),
            filter_duration: format_duration(input.timings.filter),
            files_hashed: input.table.hashed_files(),
            hash_failures: input.table.failed.len(),
            hashed_size: self.format_size(bytes.hashed),
            hash_duration: format_duration(input.timings.hash),
            duplicates_found: input.groups.len(),
            duplicate_files: input.groups.values().map(|g| g.deletable_count()).sum(),
            duplicates_size: self.format_size(bytes.duplicated),
            total_duration: format_duration(input.timings.total),
            workers: input.workers,
            algorithm: input.algorithm.to_string(),
            truncated: input.files.truncated,
            warnings: input.files.warnings.len(),
            bytes,
            unit: self.unit,
        }
    }

    /// Convert bytes to the configured unit.
    pub fn convert(&self, bytes: u64) -> f64 {
        self.unit.convert(bytes)
    }

    fn format_size(&self, bytes: u64) -> String {
        format!("{} {}", self.convert(bytes), self.unit)
    }
}

/// Sum of every known size in the scan.
pub fn scanned_bytes(files: &FileSet) -> u64 {
    files.total_size()
}

/// Sum over all digests of member count × representative size.
///
/// Every member is counted, including the first copy in each entry.
pub fn hashed_bytes(table: &HashTable, files: &FileSet) -> u64 {
    table
        .iter()
        .map(|entry| entry.count() as u64 * representative_size(&entry.paths, files))
        .sum()
}

/// Sum over confirmed groups of (member count − 1) × size.
pub fn duplicated_bytes(groups: &DuplicateGroups) -> u64 {
    groups.values().map(|g| g.wasted_bytes).sum()
}

fn format_duration(duration: Duration) -> String {
    format!("{:.2} sec", duration.as_secs_f64())
}

/// Render each group as its member paths followed by a size summary.
pub fn render_groups(groups: &DuplicateGroups) -> String {
    let separator = "=".repeat(GROUP_SEPARATOR_WIDTH);
    let mut out = String::new();

    for group in groups.values() {
        out.push_str(&separator);
        out.push('\n');
        for path in &group.paths {
            out.push_str(&path.display().to_string());
            out.push('\n');
        }
        out.push_str(&format!(
            "{} files, {} each, {} duplicated\n",
            group.count(),
            format_size(group.size),
            format_size(group.wasted_bytes)
        ));
    }

    if !groups.is_empty() {
        out.push_str(&separator);
        out.push('\n');
    }
    out
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
