use crate::cli::Args;
use crate::errors::Result;
use crate::output_formatter::OutputFormat;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// The validated settings for one run.
///
/// A `Config` can only be obtained through [`Config::new`] (or
/// [`Config::from_args`]), so holding one means every precondition of the
/// pipeline already holds: the root is absolute, both strings are non-empty
/// and there is at least one worker.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    search: String,
    replacement: String,
    workers: NonZeroUsize,
    dry_run: bool,
    verbose: bool,
    format: OutputFormat,
}

impl Config {
    /// Validates the raw settings and resolves `root` to an absolute path.
    ///
    /// The root is not required to exist here; that is checked when the run
    /// starts.
    pub fn new(
        root: &Path,
        search: impl Into<String>,
        replacement: impl Into<String>,
        workers: usize,
        dry_run: bool,
        verbose: bool,
    ) -> Result<Self> {
        let search = search.into();
        let replacement = replacement.into();

        if search.is_empty() {
            return Err("the search string (--from) must not be empty".into());
        }
        if replacement.is_empty() {
            return Err("the replacement string (--to) must not be empty".into());
        }
        let workers = NonZeroUsize::new(workers)
            .ok_or("the worker count (--workers) must be greater than 0")?;

        let root = std::path::absolute(root).map_err(|e| {
            format!("cannot resolve an absolute path for {}: {e}", root.display())
        })?;

        Ok(Self {
            root,
            search,
            replacement,
            workers,
            dry_run,
            verbose,
            format: OutputFormat::Text,
        })
    }

    /// Builds a `Config` from parsed command-line arguments.
    pub fn from_args(args: &Args) -> Result<Self> {
        Ok(Self::new(
            &args.dir,
            args.from.as_str(),
            args.to.as_str(),
            args.workers,
            args.dry_run,
            args.verbose,
        )?
        .with_format(args.format))
    }

    /// Sets the summary output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn workers(&self) -> NonZeroUsize {
        self.workers
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}
