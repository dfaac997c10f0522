use crate::detect::{self, FileType};
use crate::errors::{Error, Result};
use crate::hidden::HiddenPredicate;
use crate::replacer;
use crate::stats::RunStats;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// The producer side of the pipeline: a single pass over the directory tree
/// that publishes every candidate file.
///
/// Hidden directories are pruned together with their subtree, hidden and
/// binary files are skipped, and anything that is neither a directory nor a
/// regular file (symlinks, sockets, devices) is ignored without being counted.
/// Temporary siblings left by an in-flight rewrite are never published, even
/// where the hidden policy would not hide them.
pub struct Walker {
    root: PathBuf,
    hidden: Box<dyn HiddenPredicate>,
}

impl Walker {
    pub fn new(root: impl Into<PathBuf>, hidden: Box<dyn HiddenPredicate>) -> Self {
        Self {
            root: root.into(),
            hidden,
        }
    }

    /// Walks the tree and hands each candidate file to `emit`.
    ///
    /// Errors on individual entries are counted in `stats` and the walk moves
    /// on. The walk itself fails only when the root cannot be read or when
    /// `emit` fails; in the latter case the error from `emit` is returned.
    pub fn walk<F>(&self, stats: &RunStats, mut emit: F) -> Result<()>
    where
        F: FnMut(PathBuf) -> Result<()>,
    {
        debug!(root = %self.root.display(), policy = self.hidden.name(), "starting walk");

        let mut entries = WalkDir::new(&self.root).into_iter();
        while let Some(entry) = entries.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => return Err(Error::Walk(err)),
                Err(err) => {
                    stats.add_error();
                    warn!("error while walking {}: {}", describe(&err), err);
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                if entry.depth() > 0 && self.is_hidden(&entry, stats) {
                    debug!("skipping hidden directory: {}", entry.path().display());
                    entries.skip_current_dir();
                }
                continue;
            }

            if !file_type.is_file() {
                continue;
            }

            // Workers rewrite files while the walk is still running.
            if replacer::is_temp_file_name(entry.file_name()) {
                debug!("skipping temporary file: {}", entry.path().display());
                continue;
            }

            if self.is_hidden(&entry, stats) {
                debug!("skipping hidden file: {}", entry.path().display());
                continue;
            }

            if classify(entry.path()) == FileType::Binary {
                debug!("skipping binary file: {}", entry.path().display());
                continue;
            }

            stats.add_found();
            emit(entry.into_path())?;
        }

        Ok(())
    }

    /// Applies the hidden predicate to an entry.
    ///
    /// A metadata failure is a per-entry error and the entry is reported as
    /// hidden so the caller skips it; a failure of the predicate itself is
    /// only logged and the entry is treated as visible.
    fn is_hidden(&self, entry: &DirEntry, stats: &RunStats) -> bool {
        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(err) => {
                stats.add_error();
                warn!("cannot stat {}: {}", entry.path().display(), err);
                return true;
            }
        };

        match self.hidden.is_hidden(entry.path(), &metadata) {
            Ok(hidden) => hidden,
            Err(err) => {
                warn!(
                    "cannot check hidden attribute of {}: {}",
                    entry.path().display(),
                    err
                );
                false
            }
        }
    }
}

/// Runs the classifier, falling back to `Unknown` when the file cannot be read.
fn classify(path: &Path) -> FileType {
    detect::detect_file_type(path).unwrap_or_else(|err| {
        warn!("cannot classify {}: {}", path.display(), err);
        FileType::Unknown
    })
}

fn describe(err: &walkdir::Error) -> String {
    err.path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<unknown path>".to_string())
}
