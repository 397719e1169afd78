//! dupehunt - find byte-identical files in a directory tree.
//!
//! Usage:
//!   dupehunt -p PATH                 Scan PATH and report duplicates
//!   dupehunt -p PATH -a sha256 -u mb Pick the digest and the size unit
//!   dupehunt -p PATH -v              Also list every duplicate group
//!   dupehunt --help                  Show help

mod logging;

use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use chrono::Local;
use clap::Parser;
use color_eyre::eyre::{Context, Result};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, error, info, warn};

use dupehunt_analyze::{
    DuplicateFinder, FinderConfig, Hasher, ReportBuilder, ReportInput, StageTimings,
    append_report, render_groups,
};
use dupehunt_core::{DEFAULT_WORKERS, SizeUnit};
use dupehunt_scan::{ScanConfig, ScanProgress, Scanner};

#[derive(Parser)]
#[command(
    name = "dupehunt",
    version,
    about = "Find byte-identical files in a directory tree",
    long_about = "dupehunt walks a directory, keeps files that share a size with \
                  another file, hashes those and reports every group of files \
                  with identical content.\n\n\
                  Each run appends one JSON line to the results file."
)]
struct Cli {
    /// Directory to search for duplicates
    #[arg(short, long)]
    path: PathBuf,

    /// Hash algorithm: sha1, sha256, sha512, md5 or blake3
    #[arg(short, long, default_value = "sha1")]
    alg: String,

    /// Unit for reported sizes: kb, mb, gb or tb
    #[arg(short, long, default_value = "gb")]
    unit: String,

    /// Stop after this many files (0 = no limit)
    #[arg(short, long, default_value_t = 0)]
    max: usize,

    /// File that receives one JSON line per run
    #[arg(short, long, default_value = "results.txt")]
    output: PathBuf,

    /// Log file
    #[arg(short, long, default_value = "log.txt")]
    log: PathBuf,

    /// Number of hashing threads
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Print nothing to the console (wins over --verbose)
    #[arg(short, long)]
    quiet: bool,

    /// Print every duplicate group and debug logs
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let _log_guard = logging::init(&cli.log, cli.quiet, cli.verbose);

    let result = run(&cli);
    if let Err(err) = &result {
        error!("{err:#}");
    }
    result
}

/// Scan, analyze, persist and print one run.
fn run(cli: &Cli) -> Result<()> {
    let started_at = Local::now();
    let run_start = Instant::now();

    let unit = SizeUnit::parse(&cli.unit).wrap_err("Invalid --unit")?;
    let algorithm = Hasher::from_name(&cli.alg).algorithm();

    let scan_config = ScanConfig::builder()
        .root(cli.path.clone())
        .max_files(cli.max)
        .build()
        .wrap_err("Invalid scan configuration")?;
    let finder_config = FinderConfig::builder()
        .algorithm(algorithm)
        .workers(cli.workers)
        .build()
        .wrap_err("Invalid --workers")?;

    let scanner = Scanner::new();
    let progress = spawn_progress_logger(scanner.subscribe());
    let files = scanner
        .scan(&scan_config)
        .wrap_err_with(|| format!("Cannot scan {}", cli.path.display()))?;
    if files.has_warnings() {
        warn!(count = files.warnings.len(), "Scan finished with warnings");
    }
    // Dropping the scanner closes the progress channel.
    drop(scanner);
    if progress.join().is_err() {
        warn!("Progress logger thread panicked");
    }

    let finder = DuplicateFinder::with_config(finder_config);
    let analysis = finder.find_duplicates(&files);
    if !analysis.has_duplicates() {
        info!("No duplicate files found");
    }

    let timings = StageTimings::from_stages(files.scan_duration, &analysis, run_start.elapsed());
    let report = ReportBuilder::new(unit).build(&ReportInput::new(
        &files,
        &analysis,
        timings,
        finder.algorithm(),
        finder.workers(),
        started_at,
    ));

    if let Err(err) = append_report(&cli.output, &report) {
        error!("{err}");
    }

    info!(
        groups = report.duplicates_found,
        duplicate_files = report.duplicate_files,
        "Run finished in {:.2}s",
        timings.total.as_secs_f64()
    );

    if !cli.quiet {
        if cli.verbose {
            print!("{}", render_groups(&analysis.groups));
        }
        print!("{}", report.render());
    }

    Ok(())
}

/// Log scan progress until the scanner is dropped.
fn spawn_progress_logger(mut rx: broadcast::Receiver<ScanProgress>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        loop {
            match rx.blocking_recv() {
                Ok(progress) => debug!(
                    files = progress.files_scanned,
                    bytes = progress.bytes_scanned,
                    warnings = progress.errors_count,
                    "Scanned {:.0} files/s",
                    progress.files_per_second()
                ),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    })
}
