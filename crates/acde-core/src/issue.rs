//! # Issue Taxonomy
//!
//! Every finding the validator reports is a [`ValidationIssue`]. Severity is
//! not chosen by the caller: it is fixed by the [`IssueKind`], so the
//! taxonomy cannot drift between checks.
//!
//! | Kind | Severity |
//! |------|----------|
//! | `naming` | error |
//! | `missing_frontmatter` | error |
//! | `required_field` | error |
//! | `field_type` | error |
//! | `file_error` | error |
//! | `unknown_field` | warning |
//! | `content_structure` | warning |
//! | `directory` | warning |

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Whether an issue affects validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Makes the file invalid and the run fail.
    Error,
    /// Reported only.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

/// The category of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// File name does not match the asset type's pattern.
    Naming,
    /// No header block, or one that failed to decode.
    MissingFrontmatter,
    /// A required field is absent or falsy.
    RequiredField,
    /// A list-valued field holds a scalar or mapping.
    FieldType,
    /// A metadata key outside the asset type's capability set.
    UnknownField,
    /// A heuristic body check did not find what it probes for.
    ContentStructure,
    /// The file could not be read; no other checks ran.
    FileError,
    /// An asset directory is missing or could not be listed.
    Directory,
}

impl IssueKind {
    /// The fixed severity for this kind.
    pub fn severity(self) -> Severity {
        match self {
            Self::Naming
            | Self::MissingFrontmatter
            | Self::RequiredField
            | Self::FieldType
            | Self::FileError => Severity::Error,
            Self::UnknownField | Self::ContentStructure | Self::Directory => Severity::Warning,
        }
    }

    /// Stable snake_case name, as used in JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Naming => "naming",
            Self::MissingFrontmatter => "missing_frontmatter",
            Self::RequiredField => "required_field",
            Self::FieldType => "field_type",
            Self::UnknownField => "unknown_field",
            Self::ContentStructure => "content_structure",
            Self::FileError => "file_error",
            Self::Directory => "directory",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported finding. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    file: PathBuf,
    kind: IssueKind,
    message: String,
    severity: Severity,
}

impl ValidationIssue {
    /// Create an issue; severity is derived from `kind`.
    pub fn new(file: impl Into<PathBuf>, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            kind,
            message: message.into(),
            severity: kind.severity(),
        }
    }

    /// The file (or directory) the issue is about.
    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn kind(&self) -> IssueKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}
