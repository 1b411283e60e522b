//! # acde-schema: Asset Validation Engine
//!
//! Checks a tree of declarative asset files (a YAML front-matter header
//! followed by free-form body text) against per-asset-type schemas.
//!
//! ## Components
//!
//! - [`registry`]: asset type → directory, filename pattern, required and
//!   optional metadata fields, content probes.
//! - [`frontmatter`]: header extraction and decoding as two separate steps.
//! - [`validate`]: the per-file checks, pure over document text.
//! - [`walk`]: recursive collection and whole-run entry points
//!   ([`validate_tree`], [`validate_paths`]).
//!
//! ## Failure Policy
//!
//! Nothing below the registry aborts a run. Unreadable files, malformed
//! headers and missing directories all become issues in the
//! [`RunSummary`](acde_core::RunSummary); the caller decides the exit
//! status once every file has been seen.

pub mod frontmatter;
pub mod registry;
pub mod validate;
pub mod walk;

pub use frontmatter::{decode_header, parse_document, split_header, HeaderSplit, ParsedDocument};
pub use registry::{AssetTypeConfig, AssetTypeSpec, ContentProbe, Registry};
pub use validate::{validate_file, validate_text};
pub use walk::{validate_paths, validate_tree, walk_directory};
