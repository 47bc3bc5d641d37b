//! Export report: warnings collected alongside a successful artifact.
//!
//! Recoverable per-image failures (asset copies during YOLO export) do not
//! abort the export; they accumulate here and travel with the artifact so
//! callers can surface them.

use serde::Serialize;
use std::fmt;

/// Machine-readable warning classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum WarningCode {
    /// An image's stored payload could not be copied into the archive.
    ImageCopyFailed,
}

/// A single recoverable issue observed during export.
#[derive(Clone, Debug, Serialize)]
pub struct ExportWarning {
    pub code: WarningCode,
    /// Human-readable description of what went wrong.
    pub message: String,
    /// The image filename the warning applies to.
    pub context: String,
}

impl ExportWarning {
    /// Records a failed payload copy for one image.
    pub fn image_copy_failed(file_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: WarningCode::ImageCopyFailed,
            message: message.into(),
            context: file_name.into(),
        }
    }
}

impl fmt::Display for ExportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}: {}", self.code, self.context, self.message)
    }
}

/// Warnings accumulated over one export call.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ExportReport {
    pub warnings: Vec<ExportWarning>,
}

impl ExportReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning to the report.
    pub fn add(&mut self, warning: ExportWarning) {
        self.warnings.push(warning);
    }

    /// Number of warnings collected.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Returns true when the export completed without warnings.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

impl fmt::Display for ExportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.warnings.is_empty() {
            return writeln!(f, "Export completed with no warnings");
        }
        writeln!(f, "Export completed with {} warning(s):", self.warnings.len())?;
        for warning in &self.warnings {
            writeln!(f, "  {}", warning)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_clean() {
        let report = ExportReport::new();
        assert!(report.is_clean());
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn test_warnings_accumulate() {
        let mut report = ExportReport::new();
        report.add(ExportWarning::image_copy_failed("a.jpg", "file missing"));
        report.add(ExportWarning::image_copy_failed("b.jpg", "permission denied"));

        assert!(!report.is_clean());
        assert_eq!(report.warning_count(), 2);

        let text = report.to_string();
        assert!(text.contains("2 warning(s)"));
        assert!(text.contains("a.jpg"));
    }
}
