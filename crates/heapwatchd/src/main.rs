//! heapwatchd - Heap snapshot leak-detection daemon.
//!
//! Watches a spool directory for V8 heap snapshot payloads dropped by
//! an external capture layer, analyzes each one for WebGL resource and
//! constructor counts, persists per-cycle reports, and warns when a
//! resource category grows for several consecutive snapshots.

use tikv_jemallocator::Jemalloc;
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

/// Releases unused memory back to the operating system.
/// Uses jemalloc's arena purge to reduce RSS after memory-intensive operations.
fn release_memory_to_os() {
    // SAFETY: We're calling jemalloc's mallctl with valid arguments.
    // arena.0.purge tells jemalloc to return unused pages to the OS.
    unsafe {
        tikv_jemalloc_sys::mallctl(
            c"arena.0.purge".as_ptr().cast(),
            std::ptr::null_mut(),
            std::ptr::null_mut(),
            std::ptr::null_mut(),
            0,
        );
    }
}

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime};

use clap::Parser;
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use heapwatch_core::analysis::{ConstructorCounts, LeakDetector, ResourceCounts, SnapshotAnalyzer};
use heapwatch_core::classify::Classifier;
use heapwatch_core::report::{Report, ReportStore};

const SNAPSHOT_EXTENSION: &str = "heapsnapshot";

/// Heap snapshot leak-detection daemon.
#[derive(Parser)]
#[command(name = "heapwatchd", about = "Heap snapshot leak-detection daemon", version)]
struct Args {
    /// Directory where the capture layer drops *.heapsnapshot payloads.
    #[arg(short, long, default_value = "./spool")]
    spool_dir: PathBuf,

    /// Analysis interval in seconds.
    #[arg(short, long, default_value = "10")]
    interval: u64,

    /// Consecutive increases required before a resource category is
    /// flagged as a suspected leak.
    #[arg(short, long, default_value = "3")]
    threshold: u32,

    /// Maximum number of report files to retain. Oldest are removed.
    #[arg(long, default_value = "20")]
    max_reports: usize,

    /// Output directory for report files.
    #[arg(short, long, default_value = "./reports")]
    reports_dir: PathBuf,

    /// Path to a comma-separated list of additional constructor names
    /// to exclude from reports.
    #[arg(long, value_name = "PATH")]
    denylist: Option<PathBuf>,

    /// Delete all existing report files before starting.
    #[arg(long)]
    clear_reports: bool,

    /// Analyze the given snapshot files in order and exit instead of
    /// watching the spool directory.
    #[arg(long, value_name = "FILES", num_args = 1..)]
    replay: Option<Vec<PathBuf>>,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber with the appropriate log level.
/// Default level is INFO. Use -q for quiet mode (errors only).
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("heapwatchd={}", level).parse().unwrap())
        .add_directive(format!("heapwatch_core={}", level).parse().unwrap());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// One-line summary of a cycle's resource counts for logging.
fn describe_counts(counts: &ResourceCounts) -> String {
    format!(
        "geometries={} materials={} textures={} render_targets={} meshes={} groups={}",
        counts.geometry_count,
        counts.material_count,
        counts.texture_count,
        counts.render_target_count,
        counts.mesh_count,
        counts.group_count,
    )
}

/// Finds the newest `*.heapsnapshot` file in the spool directory,
/// newest by modification time with the filename as tiebreaker.
/// A missing directory reads as empty.
fn find_newest_snapshot(dir: &Path) -> std::io::Result<Option<PathBuf>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };

    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(SNAPSHOT_EXTENSION) {
            continue;
        }
        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        let candidate = (modified, path);
        if newest.as_ref().is_none_or(|best| candidate > *best) {
            newest = Some(candidate);
        }
    }
    Ok(newest.map(|(_, path)| path))
}

/// Shared per-snapshot pipeline state for the watch loop and replay.
struct Pipeline {
    analyzer: SnapshotAnalyzer,
    store: ReportStore,
    detector: LeakDetector,
    previous_counts: Option<ConstructorCounts>,
    max_reports: usize,
    cycle: u64,
}

impl Pipeline {
    /// Runs one snapshot payload through analyze, report, persist, and
    /// trend detection. Persistence failure is logged; the cycle's
    /// in-memory state still advances.
    fn process(&mut self, snapshot_json: &str) {
        self.cycle += 1;

        let result = self.analyzer.analyze(snapshot_json);
        info!(
            "Cycle #{}: {}",
            self.cycle,
            describe_counts(&result.node_counts)
        );

        let report = Report::from_analysis(&result, self.previous_counts.as_ref());
        if let Err(e) = self.store.save(&report, self.max_reports) {
            error!("Failed to save report: {}", e);
        }

        for warning in self.detector.observe(&result.node_counts) {
            warn!(
                "Potential leak: {} count increased {} times in a row",
                warning.kind.label(),
                warning.streak
            );
        }

        self.previous_counts = Some(result.constructor_counts);
    }
}

fn main() {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    info!("heapwatchd {} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "Config: interval={}s, threshold={}, spool={}, reports={}",
        args.interval,
        args.threshold,
        args.spool_dir.display(),
        args.reports_dir.display()
    );

    let classifier = match &args.denylist {
        Some(path) => {
            info!("Loading constructor denylist from {}", path.display());
            Classifier::with_denylist(path)
        }
        None => Classifier::new(),
    };

    let store = match ReportStore::new(&args.reports_dir) {
        Ok(store) => store,
        Err(e) => {
            error!(
                "Failed to initialize report directory {}: {}",
                args.reports_dir.display(),
                e
            );
            std::process::exit(1);
        }
    };

    if args.clear_reports {
        match store.clear() {
            Ok(deleted) => info!("Cleared {} existing reports", deleted),
            Err(e) => error!("Failed to clear reports: {}", e),
        }
    }

    let mut pipeline = Pipeline {
        analyzer: SnapshotAnalyzer::new(classifier),
        store,
        detector: LeakDetector::new(args.threshold),
        previous_counts: None,
        max_reports: args.max_reports,
        cycle: 0,
    };

    if let Some(files) = &args.replay {
        replay(&mut pipeline, files);
        return;
    }

    // Setup graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    let interval = Duration::from_secs(args.interval);

    info!("Starting watch loop on {}", args.spool_dir.display());

    while running.load(Ordering::SeqCst) {
        match find_newest_snapshot(&args.spool_dir) {
            Ok(Some(path)) => {
                debug!("Picked up snapshot {}", path.display());
                match std::fs::read_to_string(&path) {
                    Ok(json) => {
                        pipeline.process(&json);
                        // Consume the payload so it is not analyzed twice.
                        if let Err(e) = std::fs::remove_file(&path) {
                            warn!(
                                "Failed to remove processed snapshot {}: {}",
                                path.display(),
                                e
                            );
                        }
                        // Snapshot payloads run to hundreds of megabytes.
                        release_memory_to_os();
                    }
                    Err(e) => {
                        error!("Failed to read snapshot {}: {}", path.display(), e);
                    }
                }
            }
            Ok(None) => {
                debug!("No snapshot in spool, skipping cycle");
            }
            Err(e) => {
                error!(
                    "Failed to scan spool directory {}: {}",
                    args.spool_dir.display(),
                    e
                );
            }
        }

        // Sleep with periodic checks for shutdown signal
        let sleep_interval = Duration::from_millis(100);
        let mut remaining = interval;
        while remaining > Duration::ZERO && running.load(Ordering::SeqCst) {
            let sleep_time = remaining.min(sleep_interval);
            std::thread::sleep(sleep_time);
            remaining = remaining.saturating_sub(sleep_time);
        }
    }

    info!("Shutdown complete after {} cycles", pipeline.cycle);
}

/// Analyzes the given snapshot files in order, as one session, then
/// exits. Unreadable files are skipped so a batch keeps going.
fn replay(pipeline: &mut Pipeline, files: &[PathBuf]) {
    info!("Replaying {} snapshot files", files.len());
    for path in files {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                info!("Replaying {}", path.display());
                pipeline.process(&json);
                release_memory_to_os();
            }
            Err(e) => {
                error!("Failed to read snapshot {}: {}", path.display(), e);
            }
        }
    }
    info!("Replay complete: {} cycles", pipeline.cycle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn describe_counts_lists_all_categories() {
        let counts = ResourceCounts {
            geometry_count: 1,
            mesh_count: 3,
            ..ResourceCounts::default()
        };
        let desc = describe_counts(&counts);
        assert!(desc.contains("geometries=1"));
        assert!(desc.contains("meshes=3"));
        assert!(desc.contains("textures=0"));
    }

    #[test]
    fn find_newest_snapshot_ignores_other_files() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
        assert!(find_newest_snapshot(dir.path()).unwrap().is_none());

        std::fs::write(dir.path().join("a.heapsnapshot"), "{}").unwrap();
        let found = find_newest_snapshot(dir.path()).unwrap().unwrap();
        assert_eq!(found.file_name().unwrap(), "a.heapsnapshot");
    }

    #[test]
    fn find_newest_snapshot_missing_dir_is_empty() {
        let dir = tempdir().unwrap();
        let gone = dir.path().join("nope");
        assert!(find_newest_snapshot(&gone).unwrap().is_none());
    }

    #[test]
    fn pipeline_persists_a_report_per_snapshot() {
        let reports = tempdir().unwrap();
        let mut pipeline = Pipeline {
            analyzer: SnapshotAnalyzer::new(Classifier::new()),
            store: ReportStore::new(reports.path()).unwrap(),
            detector: LeakDetector::new(3),
            previous_counts: None,
            max_reports: 20,
            cycle: 0,
        };

        // Invalid payload still produces a (zero) report.
        pipeline.process("{not json");
        assert_eq!(pipeline.cycle, 1);
        let saved = pipeline.store.load_all().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].node_counts.mesh_count, 0);
    }
}
