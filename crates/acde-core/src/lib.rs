//! # acde-core: Foundational Types for the Asset Validator
//!
//! Leaf crate of the workspace. Defines what a validation finding is, how
//! findings from many files are aggregated into one run, and how a finished
//! run is rendered for a human.
//!
//! ## Key Design Principles
//!
//! 1. **Severity is a function of kind.** [`ValidationIssue::new`] derives
//!    the severity from the [`IssueKind`]; no call site can report a
//!    `naming` problem as a warning.
//!
//! 2. **Explicit accumulator.** [`RunSummary`] is a plain value threaded
//!    through a run by the caller. There is no global result state.
//!
//! 3. **Validity is derived.** A file is valid iff its [`FileOutcome`]
//!    carries no error-severity issue; it is never tracked separately.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `acde-*` crates.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod issue;
pub mod report;
pub mod summary;

pub use error::{ParseError, RegistryError};
pub use issue::{IssueKind, Severity, ValidationIssue};
pub use report::{render, Report};
pub use summary::{FileOutcome, RunSummary};
