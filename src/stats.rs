use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Run-wide counters shared by the walker and every worker.
///
/// Only additions are exposed. No counter is ever updated based on the value
/// of another, so `Relaxed` increments are sufficient; the totals are read
/// with [`RunStats::snapshot`] once all workers have been joined.
#[derive(Debug, Default)]
pub struct RunStats {
    files_found: AtomicU64,
    files_processed: AtomicU64,
    files_matched: AtomicU64,
    matches: AtomicU64,
    errors: AtomicU64,
}

/// The totals of a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Candidate files published by the walker.
    pub files_found: u64,
    /// Files picked up by a worker, whether or not processing succeeded.
    pub files_processed: u64,
    /// Files with at least one match.
    pub files_matched: u64,
    /// Occurrences found (dry run) or replaced.
    pub matches: u64,
    /// Failed traversal entries plus failed files.
    pub errors: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_found(&self) {
        self.files_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_processed(&self) {
        self.files_processed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one file that had `count` matches.
    pub fn add_matched_file(&self, count: u64) {
        self.files_matched.fetch_add(1, Ordering::Relaxed);
        self.matches.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Loads all five counters.
    pub fn snapshot(&self) -> Summary {
        Summary {
            files_found: self.files_found.load(Ordering::Relaxed),
            files_processed: self.files_processed.load(Ordering::Relaxed),
            files_matched: self.files_matched.load(Ordering::Relaxed),
            matches: self.matches.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }
}
