//! The main entry point for the `restr` command-line application.
//!
//! This file parses the arguments, validates them into a `Config` and runs the
//! pipeline, printing the banner and the summary around it.

use anyhow::Context;
use restr::cli;
use restr::{logging, pool, Config, OutputFormatter};
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::parse_args();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    logging::init(config.verbose());

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> anyhow::Result<()> {
    let formatter = OutputFormatter::new(config.format());
    let stdout = io::stdout();

    formatter
        .write_banner(&mut stdout.lock(), config)
        .context("failed to write the banner")?;

    let summary = pool::run(config)
        .with_context(|| format!("replacement failed in {}", config.root().display()))?;

    let mut out = stdout.lock();
    formatter
        .write_summary(&mut out, &summary, config.dry_run())
        .context("failed to write the summary")?;
    out.flush()?;
    Ok(())
}
