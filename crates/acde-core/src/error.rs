//! # Error Types
//!
//! Errors that cross crate boundaries. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Header decoding failures carry the decoder's message verbatim.
//! - Registry errors name the offending asset type so a bad configuration
//!   file can be fixed without guessing.
//! - Per-file and per-directory failures are not errors at this level;
//!   they are converted into [`ValidationIssue`](crate::ValidationIssue)s
//!   by the engine and never abort a run.

use thiserror::Error;

/// Failure to decode a front-matter block into a mapping.
///
/// Produced only when the `---` delimiters are present. A document with no
/// header block at all is not a parse error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The enclosed text is not valid YAML.
    #[error("Invalid YAML front-matter: {0}")]
    InvalidYaml(String),

    /// The delimiters enclose nothing but whitespace or comments.
    #[error("Empty front-matter block")]
    Empty,

    /// The header decoded, but not to a mapping.
    #[error("Front-matter must be a mapping, found {found}")]
    NotAMapping {
        /// YAML kind that was found instead (e.g. "sequence").
        found: &'static str,
    },
}

/// Failure to build or load the asset-type registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// An asset type declared no required fields.
    #[error("asset type '{asset_type}' must declare at least one required field")]
    NoRequiredFields {
        /// Name of the asset type.
        asset_type: String,
    },

    /// An asset type's filename pattern does not compile.
    #[error("asset type '{asset_type}' has an invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// Name of the asset type.
        asset_type: String,
        /// The pattern as written.
        pattern: String,
        /// Compiler message.
        reason: String,
    },

    /// Two entries share a name.
    #[error("asset type '{0}' is declared more than once")]
    DuplicateAssetType(String),

    /// A content probe has no needles to look for.
    #[error("asset type '{asset_type}' has a content probe with no needles")]
    EmptyProbe {
        /// Name of the asset type.
        asset_type: String,
    },

    /// The registry file could not be decoded.
    #[error("invalid registry file '{path}': {reason}")]
    InvalidConfig {
        /// Path to the registry file.
        path: String,
        /// Decoder message.
        reason: String,
    },

    /// IO error reading the registry file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
