//! # Run Summary
//!
//! A [`RunSummary`] is created empty at the start of a run and grows as
//! each file is validated. It is an ordinary value passed by `&mut` through
//! the walker, never process-wide state, so two runs in the same process
//! cannot see each other's results.
//!
//! ## Invariants
//!
//! - Every recorded [`FileOutcome`] increments `total_files` exactly once.
//! - A file is valid iff its outcome holds no error-severity issue.
//!   Warnings never affect validity or the exit code.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::issue::ValidationIssue;

/// The result of validating one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    path: PathBuf,
    issues: Vec<ValidationIssue>,
}

impl FileOutcome {
    pub fn new(path: impl Into<PathBuf>, issues: Vec<ValidationIssue>) -> Self {
        Self {
            path: path.into(),
            issues,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Issues in the order the checks ran.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// True iff no error-severity issue was produced.
    pub fn is_valid(&self) -> bool {
        !self.issues.iter().any(ValidationIssue::is_error)
    }

    pub fn has_warnings(&self) -> bool {
        self.issues.iter().any(|i| !i.is_error())
    }
}

/// Aggregated counts and issues for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    total_files: usize,
    valid_files: usize,
    error_files: usize,
    warning_files: usize,
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one validated file and take ownership of its issues.
    pub fn record_file(&mut self, outcome: FileOutcome) {
        self.total_files += 1;
        if outcome.is_valid() {
            self.valid_files += 1;
        } else {
            self.error_files += 1;
        }
        if outcome.has_warnings() {
            self.warning_files += 1;
        }
        for issue in outcome.issues {
            self.push(issue);
        }
    }

    /// Record an issue that is not tied to a validated file, such as a
    /// missing asset directory. File counts are unchanged.
    pub fn record_issue(&mut self, issue: ValidationIssue) {
        self.push(issue);
    }

    /// Append another summary's counts and issues after this one's.
    pub fn merge(&mut self, other: RunSummary) {
        self.total_files += other.total_files;
        self.valid_files += other.valid_files;
        self.error_files += other.error_files;
        self.warning_files += other.warning_files;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    fn push(&mut self, issue: ValidationIssue) {
        if issue.is_error() {
            self.errors.push(issue);
        } else {
            self.warnings.push(issue);
        }
    }

    pub fn total_files(&self) -> usize {
        self.total_files
    }

    pub fn valid_files(&self) -> usize {
        self.valid_files
    }

    pub fn error_files(&self) -> usize {
        self.error_files
    }

    /// Validated files carrying at least one warning.
    pub fn warning_files(&self) -> usize {
        self.warning_files
    }

    pub fn errors(&self) -> &[ValidationIssue] {
        &self.errors
    }

    pub fn warnings(&self) -> &[ValidationIssue] {
        &self.warnings
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Process exit status: 1 if any error was accumulated, else 0.
    pub fn exit_code(&self) -> u8 {
        u8::from(self.has_errors())
    }
}
