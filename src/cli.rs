use crate::output_formatter::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Recursive literal search-and-replace for text files.
///
/// `restr` walks a directory tree, skips hidden entries and binary files, and
/// replaces every occurrence of a literal string in the remaining files using
/// a pool of worker threads.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Recursive literal search-and-replace for text files",
    long_about = "restr - replace a literal string in every text file under a directory.

Hidden files and directories are skipped (dot-prefixed names on Unix, the
hidden attribute on Windows), as are files that look binary. Each changed
file is rewritten through a temporary sibling and renamed into place.

EXAMPLES:
  restr -f TODO -t DONE                   # Replace in the current directory
  restr -d src -f old_name -t new_name    # Replace under src/
  restr -d . -f foo -t bar --dry-run      # Preview without touching files
  restr -f foo -t bar -w 16 --format json # 16 workers, JSON summary"
)]
pub struct Args {
    /// The directory to process.
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// The literal string to search for.
    #[arg(short, long, required = true)]
    pub from: String,

    /// The string to replace each occurrence with.
    #[arg(short, long, required = true)]
    pub to: String,

    /// The number of worker threads.
    #[arg(short, long, default_value_t = 4, env = "RESTR_WORKERS")]
    pub workers: usize,

    /// Report matches without modifying any file.
    #[arg(short = 'n', long, visible_alias = "test")]
    pub dry_run: bool,

    /// Print a diagnostic line for every skipped entry and every error.
    #[arg(short, long)]
    pub verbose: bool,

    /// The format of the final summary.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Parses command-line arguments and returns the populated `Args` struct.
pub fn parse_args() -> Args {
    Args::parse()
}
