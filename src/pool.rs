//! The worker pool and the run that ties the pipeline together.
//!
//! The walker runs on the calling thread and feeds a bounded queue; a fixed
//! number of scoped worker threads drain it. Dropping the sender once the
//! walk is over is the only stop signal, so every published path is handled
//! by exactly one worker before [`run`] returns.

use crate::config::Config;
use crate::errors::{Error, Result};
use crate::hidden;
use crate::output_formatter::OutputFormat;
use crate::replacer::{ProcessOptions, Replacer};
use crate::stats::{RunStats, Summary};
use crate::walker::Walker;
use crossbeam::channel::{bounded, Receiver};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Capacity of the queue between the walker and the workers.
pub const QUEUE_CAPACITY: usize = 1000;

/// Runs a full search-and-replace pass described by `config`.
///
/// Fails only when the root is missing or not a directory, when the walk of
/// the root itself fails, or when a worker panics. Errors on individual
/// entries and files are counted in the returned [`Summary`].
pub fn run(config: &Config) -> Result<Summary> {
    check_root(config.root())?;

    let replacer = Replacer::new(config.search(), config.replacement())?;
    let walker = Walker::new(config.root(), hidden::for_current_platform());
    let stats = RunStats::new();
    let options = ProcessOptions {
        dry_run: config.dry_run(),
    };
    let report = config.format() == OutputFormat::Text;

    info!(
        root = %config.root().display(),
        workers = config.workers().get(),
        dry_run = config.dry_run(),
        "starting run"
    );

    let (work_tx, work_rx) = bounded::<PathBuf>(QUEUE_CAPACITY);

    let walk_result = crossbeam::thread::scope(|s| {
        for worker_id in 0..config.workers().get() {
            let work_rx = work_rx.clone();
            let replacer = &replacer;
            let stats = &stats;
            s.spawn(move |_| worker(worker_id, &work_rx, replacer, options, report, stats));
        }
        drop(work_rx);

        let result = walker.walk(&stats, |path| {
            work_tx.send(path).map_err(|_| Error::QueueClosed)
        });
        // Closing the queue lets the workers finish once it is drained.
        drop(work_tx);
        result
    })
    .map_err(|_| Error::WorkerPanic)?;

    walk_result?;

    let summary = stats.snapshot();
    info!(
        found = summary.files_found,
        matched = summary.files_matched,
        matches = summary.matches,
        errors = summary.errors,
        "run complete"
    );
    Ok(summary)
}

fn check_root(root: &Path) -> Result<()> {
    let metadata = fs::metadata(root).map_err(|_| Error::RootNotFound(root.to_path_buf()))?;
    if !metadata.is_dir() {
        return Err(Error::NotADirectory(root.to_path_buf()));
    }
    Ok(())
}

/// Drains the queue until it is closed and empty.
fn worker(
    worker_id: usize,
    work_rx: &Receiver<PathBuf>,
    replacer: &Replacer,
    options: ProcessOptions,
    report: bool,
    stats: &RunStats,
) {
    for path in work_rx.iter() {
        stats.add_processed();

        match replacer.process_file(&path, options) {
            Ok(result) if result.matches > 0 => {
                stats.add_matched_file(result.matches);
                let line = if result.modified {
                    format!(
                        "replaced {} occurrence(s): {}",
                        result.matches,
                        path.display()
                    )
                } else {
                    format!(
                        "[dry-run] would replace {} occurrence(s): {}",
                        result.matches,
                        path.display()
                    )
                };
                if report {
                    println!("{line}");
                } else {
                    info!("{line}");
                }
            }
            Ok(_) => {}
            Err(e) => {
                stats.add_error();
                warn!(
                    "worker {}: error processing file {}: {}",
                    worker_id,
                    path.display(),
                    e
                );
            }
        }
    }
    debug!("worker {} finished", worker_id);
}
