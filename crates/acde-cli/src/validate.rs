//! # Validate Command
//!
//! Loads the registry, runs the engine over the asset tree (or over the
//! files named on the command line), prints the report, and maps the
//! summary to an exit status.

use std::io::Write;
use std::path::{Path, PathBuf};

use acde_core::{Report, RunSummary};
use acde_schema::{validate_paths, validate_tree, Registry};
use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

/// Arguments for a validation run.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Accepted for compatibility. Fixing is not implemented; no file is modified.
    #[arg(long)]
    pub fix: bool,

    /// Print a progress line before each asset type is processed.
    #[arg(long)]
    pub verbose: bool,

    /// Print the summary as JSON instead of the text report.
    #[arg(long)]
    pub json: bool,

    /// Directory the asset directories are resolved against.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// YAML registry file replacing the built-in asset types.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Validate only these files instead of the whole tree.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

#[derive(Serialize)]
struct JsonOut<'a> {
    ok: bool,
    data: &'a RunSummary,
}

/// Execute a run, printing to stdout.
///
/// Returns exit code: 0 on success, 1 if any error was reported.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_validate_to(args, &mut out)
}

/// Execute a run, writing the report to `out`.
pub fn run_validate_to<W: Write>(args: &ValidateArgs, out: &mut W) -> Result<u8> {
    let registry = load_registry(args.config.as_deref(), &args.root)?;

    tracing::info!(
        asset_types = registry.len(),
        root = %args.root.display(),
        "loaded asset registry"
    );

    if args.fix {
        tracing::warn!("--fix is not implemented; no files will be modified");
    }

    if !args.json {
        writeln!(out, "🔍 Validating asset files...\n")?;
    }

    let summary = if args.paths.is_empty() {
        let mut write_err = None;
        let summary = validate_tree(&registry, &args.root, |config| {
            tracing::info!(asset_type = config.name(), "processing asset type");
            if args.verbose && !args.json && write_err.is_none() {
                if let Err(e) = writeln!(out, "Processing {}...", config.name()) {
                    write_err = Some(e);
                }
            }
        });
        if let Some(e) = write_err {
            return Err(e).context("failed to write progress output");
        }
        summary
    } else {
        let paths: Vec<PathBuf> = args
            .paths
            .iter()
            .map(|p| crate::resolve_input(p, &args.root))
            .collect();
        validate_paths(&registry, &args.root, &paths)
    };

    if args.json {
        let body = JsonOut {
            ok: !summary.has_errors(),
            data: &summary,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
    } else {
        write!(out, "{}", Report(&summary))?;
    }

    Ok(summary.exit_code())
}

fn load_registry(config: Option<&Path>, root: &Path) -> Result<Registry> {
    match config {
        Some(path) => {
            let resolved = crate::resolve_input(path, root);
            Registry::load(&resolved)
                .with_context(|| format!("failed to load registry from {}", resolved.display()))
        }
        None => Registry::builtin().context("built-in registry is invalid"),
    }
}
