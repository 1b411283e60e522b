//! # Text Report
//!
//! Renders a [`RunSummary`] as the human-readable report: totals, every
//! error, every warning, then the verdict.

use std::fmt;

use crate::summary::RunSummary;

/// Display adapter for a finished run.
pub struct Report<'a>(pub &'a RunSummary);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;

        writeln!(f, "\n=== Validation Report ===\n")?;
        writeln!(f, "Total files processed: {}", summary.total_files())?;
        writeln!(f, "Valid files: {}", summary.valid_files())?;
        writeln!(f, "Files with errors: {}", summary.error_files())?;
        writeln!(f, "Files with warnings: {}", summary.warning_files())?;

        if !summary.errors().is_empty() {
            writeln!(f, "\n=== Errors ===")?;
            for issue in summary.errors() {
                writeln!(f, "❌ {issue}")?;
            }
        }

        if !summary.warnings().is_empty() {
            writeln!(f, "\n=== Warnings ===")?;
            for issue in summary.warnings() {
                writeln!(f, "⚠️  {issue}")?;
            }
        }

        writeln!(f, "\n=== Summary ===")?;
        if summary.has_errors() {
            writeln!(f, "❌ {} error(s) need to be fixed.", summary.error_count())?;
        } else {
            writeln!(f, "✅ All files passed validation!")?;
        }

        if summary.warning_count() > 0 {
            writeln!(f, "⚠️  {} warning(s).", summary.warning_count())?;
        }

        Ok(())
    }
}

/// Render the full report to a string.
pub fn render(summary: &RunSummary) -> String {
    Report(summary).to_string()
}
