//! # Directory Walking
//!
//! Recursively visits an asset directory and dispatches every file whose
//! name matches the asset type's pattern to the validator. Non-matching
//! files are skipped silently: they are neither counted nor reported.
//!
//! Subdirectories are always descended into. Entries are visited in
//! sorted order so the issue sequence is the same on every platform.
//!
//! A missing root is tolerated: it yields one `directory` warning and no
//! traversal. A subdirectory that cannot be listed yields a `directory`
//! warning for itself and the walk carries on with its siblings.
//!
//! Each directory is visited once, keyed by its canonical path, so a
//! symlink that loops back or aliases another directory never makes a file
//! count twice.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use acde_core::{FileOutcome, IssueKind, RunSummary, ValidationIssue};

use crate::registry::{AssetTypeConfig, Registry};
use crate::validate::validate_file;

/// Walk `root` for one asset type, recording results into `summary`.
pub fn walk_directory(root: &Path, config: &AssetTypeConfig, summary: &mut RunSummary) {
    if !root.exists() {
        summary.record_issue(ValidationIssue::new(
            root,
            IssueKind::Directory,
            format!("Directory does not exist: {}", root.display()),
        ));
        return;
    }
    if !root.is_dir() {
        summary.record_issue(ValidationIssue::new(
            root,
            IssueKind::Directory,
            format!("Not a directory: {}", root.display()),
        ));
        return;
    }

    let mut seen = HashSet::new();
    walk_inner(root, config, summary, &mut seen);
}

fn walk_inner(
    dir: &Path,
    config: &AssetTypeConfig,
    summary: &mut RunSummary,
    seen: &mut HashSet<PathBuf>,
) {
    // Symlinked directories may alias or enclose one another.
    let canonical = match std::fs::canonicalize(dir) {
        Ok(p) => p,
        Err(e) => {
            record_unreadable(dir, &e, summary);
            return;
        }
    };
    if !seen.insert(canonical) {
        tracing::debug!(dir = %dir.display(), "directory already visited, skipping");
        return;
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            record_unreadable(dir, &e, summary);
            return;
        }
    };

    let paths = sorted_entries(dir, entries.map(|r| r.map(|e| e.path())), summary);

    for path in paths {
        if path.is_dir() {
            walk_inner(&path, config, summary, seen);
            continue;
        }

        let matched = path
            .file_name()
            .is_some_and(|name| config.matches_name(&name.to_string_lossy()));
        if matched {
            tracing::debug!(
                file = %path.display(),
                asset_type = config.name(),
                "validating file"
            );
            summary.record_file(validate_file(&path, config));
        }
    }
}

/// Collect listed paths in sorted order. An entry that cannot be read is a
/// `directory` warning; the rest of the listing is still used.
fn sorted_entries<I>(dir: &Path, entries: I, summary: &mut RunSummary) -> Vec<PathBuf>
where
    I: IntoIterator<Item = std::io::Result<PathBuf>>,
{
    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => paths.push(path),
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                summary.record_issue(ValidationIssue::new(
                    dir,
                    IssueKind::Directory,
                    format!("Cannot read entry in directory {}: {e}", dir.display()),
                ));
            }
        }
    }
    paths.sort();
    paths
}

fn record_unreadable(dir: &Path, e: &std::io::Error, summary: &mut RunSummary) {
    tracing::warn!(
        dir = %dir.display(),
        error = %e,
        "failed to read directory during walk"
    );
    summary.record_issue(ValidationIssue::new(
        dir,
        IssueKind::Directory,
        format!("Cannot read directory {}: {e}", dir.display()),
    ));
}

/// Validate every asset type's directory under `root`.
///
/// `on_asset_type` is called before each traversal. Returns a fresh
/// summary owned by the caller.
pub fn validate_tree<F>(registry: &Registry, root: &Path, mut on_asset_type: F) -> RunSummary
where
    F: FnMut(&AssetTypeConfig),
{
    let mut summary = RunSummary::new();
    for config in registry.iter() {
        on_asset_type(config);
        walk_directory(&root.join(config.directory()), config, &mut summary);
    }

    tracing::info!(
        total = summary.total_files(),
        errors = summary.error_count(),
        warnings = summary.warning_count(),
        "validation run complete"
    );
    summary
}

/// Validate explicitly named files.
///
/// Each path is checked against the asset type that owns it (see
/// [`Registry::resolve`]). Paths are not pre-filtered by name, so a
/// misnamed file inside an asset directory reports a `naming` error.
pub fn validate_paths(registry: &Registry, root: &Path, paths: &[PathBuf]) -> RunSummary {
    let mut summary = RunSummary::new();
    for path in paths {
        let outcome = match registry.resolve(root, path) {
            Some(config) => validate_file(path, config),
            None => FileOutcome::new(
                path.as_path(),
                vec![ValidationIssue::new(
                    path.as_path(),
                    IssueKind::FileError,
                    "No asset type matches this path",
                )],
            ),
        };
        summary.record_file(outcome);
    }
    summary
}
