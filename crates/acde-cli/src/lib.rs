//! # acde-cli: Asset Validator CLI
//!
//! Provides the `acde` command. Argument parsing and output live here;
//! every check is delegated to `acde-schema`.
//!
//! ```bash
//! acde                       # validate every asset directory under .
//! acde --verbose             # print a progress line per asset type
//! acde --json                # machine-readable summary
//! acde chatmodes/de/x.chatmode.md
//! ```
//!
//! ## Exit Status
//!
//! - `0`: no errors (warnings allowed)
//! - `1`: at least one error
//! - `2`: the registry could not be loaded

pub mod validate;

use std::path::{Path, PathBuf};

/// Locate a file named on the command line.
///
/// A path that exists as given (absolute, or relative to the working
/// directory) is used unchanged. Any other relative path is taken to be
/// under `root`, so `acde --root repo prompts/de/x.prompt.md` works from
/// outside the repository.
pub fn resolve_input(path: &Path, root: &Path) -> PathBuf {
    if path.is_absolute() || path.exists() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
