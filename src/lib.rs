//! `restr` is a library for recursive, literal search-and-replace over a
//! directory tree.
//!
//! It provides the core logic for the `restr` command-line tool but can also be
//! used as a standalone library. The main components are:
//!
//! - `walker`: A single pass over the tree that prunes hidden directories and
//!   skips hidden and binary files.
//! - `detect`: Classifies a file as text or binary from its extension and a
//!   sample of its content.
//! - `replacer`: Counts and replaces a literal string in one file, rewriting it
//!   through a temporary sibling that is renamed into place.
//! - `pool`: Runs the walker against a fixed number of worker threads connected
//!   by a bounded queue and returns the run `Summary`.
//!
//! ```no_run
//! use std::path::Path;
//!
//! let config = restr::Config::new(Path::new("src"), "old_name", "new_name", 4, true, false)?;
//! let summary = restr::run(&config)?;
//! println!("{} matches in {} files", summary.matches, summary.files_matched);
//! # Ok::<(), restr::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod detect;
pub mod errors;
pub mod hidden;
pub mod logging;
pub mod output_formatter;
pub mod pool;
pub mod replacer;
pub mod stats;
pub mod walker;

// Re-export main types for easier access by library users.
pub use config::Config;
pub use errors::{Error, Result};
pub use output_formatter::{OutputFormat, OutputFormatter};
pub use pool::run;
pub use replacer::Replacer;
pub use stats::{RunStats, Summary};
pub use walker::Walker;
