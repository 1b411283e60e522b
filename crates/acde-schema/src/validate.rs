//! # File Validation
//!
//! Runs every check for one file against its asset type's rules and
//! returns a [`FileOutcome`]. Checks run in a fixed order and never
//! short-circuit one another:
//!
//! 1. naming: the base name matches the type's pattern
//! 2. header presence: a header block exists and decodes
//! 3. required fields: each is present and truthy
//! 4. field typing: list-valued fields hold sequences
//! 5. unknown fields: keys outside the capability set (warning)
//! 6. content structure: the type's text probes (warning)
//!
//! Checks 3 to 5 need a decoded mapping and are skipped when check 2 fails.
//! A file that cannot be read produces a single `file_error` and nothing
//! else.

use std::path::Path;

use acde_core::{FileOutcome, IssueKind, ValidationIssue};
use serde_yaml::Mapping;

use crate::frontmatter::{is_truthy, parse_document};
use crate::registry::AssetTypeConfig;

/// Fields that must decode as a sequence when present.
pub const LIST_FIELDS: [&str; 3] = ["inputs", "capabilities", "rules"];

/// Read and validate one file.
pub fn validate_file(path: &Path, config: &AssetTypeConfig) -> FileOutcome {
    match std::fs::read_to_string(path) {
        Ok(text) => validate_text(path, &text, config),
        Err(e) => {
            tracing::debug!(file = %path.display(), error = %e, "failed to read file");
            FileOutcome::new(
                path,
                vec![ValidationIssue::new(
                    path,
                    IssueKind::FileError,
                    format!("Error reading file: {e}"),
                )],
            )
        }
    }
}

/// Validate already-read document text. No I/O.
pub fn validate_text(path: &Path, text: &str, config: &AssetTypeConfig) -> FileOutcome {
    let mut issues = Vec::new();

    check_name(path, config, &mut issues);

    match parse_document(text) {
        Ok(doc) => match doc.metadata {
            Some(metadata) => {
                check_required_fields(path, &metadata, config, &mut issues);
                check_field_types(path, &metadata, &mut issues);
                check_unknown_fields(path, &metadata, config, &mut issues);
            }
            None => issues.push(ValidationIssue::new(
                path,
                IssueKind::MissingFrontmatter,
                "Missing or invalid front-matter",
            )),
        },
        Err(e) => issues.push(ValidationIssue::new(
            path,
            IssueKind::MissingFrontmatter,
            e.to_string(),
        )),
    }

    check_content(path, text, config, &mut issues);

    FileOutcome::new(path, issues)
}

fn check_name(path: &Path, config: &AssetTypeConfig, issues: &mut Vec<ValidationIssue>) {
    let matches = path
        .file_name()
        .is_some_and(|name| config.matches_name(&name.to_string_lossy()));
    if !matches {
        issues.push(ValidationIssue::new(
            path,
            IssueKind::Naming,
            format!(
                "File name does not match pattern: {}",
                config.name_pattern().as_str()
            ),
        ));
    }
}

fn check_required_fields(
    path: &Path,
    metadata: &Mapping,
    config: &AssetTypeConfig,
    issues: &mut Vec<ValidationIssue>,
) {
    for field in config.required_fields() {
        let present = metadata.get(field.as_str()).is_some_and(is_truthy);
        if !present {
            issues.push(ValidationIssue::new(
                path,
                IssueKind::RequiredField,
                format!("Missing required field: {field}"),
            ));
        }
    }
}

fn check_field_types(path: &Path, metadata: &Mapping, issues: &mut Vec<ValidationIssue>) {
    for field in LIST_FIELDS {
        let Some(value) = metadata.get(field) else {
            continue;
        };
        if is_truthy(value) && !value.is_sequence() {
            issues.push(ValidationIssue::new(
                path,
                IssueKind::FieldType,
                format!("{field} field must be an array"),
            ));
        }
    }
}

fn check_unknown_fields(
    path: &Path,
    metadata: &Mapping,
    config: &AssetTypeConfig,
    issues: &mut Vec<ValidationIssue>,
) {
    for key in config.unknown_fields(metadata) {
        issues.push(ValidationIssue::new(
            path,
            IssueKind::UnknownField,
            format!("Unknown field: {key}"),
        ));
    }
}

// Probes look at the raw text, header included.
fn check_content(
    path: &Path,
    text: &str,
    config: &AssetTypeConfig,
    issues: &mut Vec<ValidationIssue>,
) {
    for probe in config.content_probes() {
        if !probe.is_satisfied_by(text) {
            issues.push(ValidationIssue::new(
                path,
                IssueKind::ContentStructure,
                probe.message(),
            ));
        }
    }
}
