//! # acde CLI entry point
//!
//! Parses command-line arguments, installs logging, and runs the
//! validator. Logs go to stderr; stdout carries only the report.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use acde_cli::validate::{run_validate, ValidateArgs};

/// Validate prompt, chatmode, instructions, and pattern files.
///
/// Checks file naming, front-matter metadata, and content structure for
/// every asset type, prints a report, and exits non-zero if any error
/// was found.
#[derive(Parser, Debug)]
#[command(name = "acde", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    args: ValidateArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.args.verbose { "info" } else { "warn" })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(root = %cli.args.root.display(), "acde starting");

    match run_validate(&cli.args) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
