//! The export engine: dispatcher plus the two format exporters.
//!
//! Flow: the dispatcher resolves the dataset through the provider (scoped
//! to the requesting principal), validates the format tag, and delegates to
//! [`coco`] or [`yolo`]. Each invocation is synchronous and self-contained;
//! nothing is cached or shared across calls.

pub mod coco;
pub mod coord;
pub mod index;
mod report;
pub mod yolo;

pub use report::{ExportReport, ExportWarning, WarningCode};

use std::str::FromStr;

use crate::error::ExportError;
use crate::model::DatasetId;
use crate::provider::{DatasetProvider, ImageFileProvider, Principal};

/// A requested export format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Coco,
    Yolo,
}

impl ExportFormat {
    /// Format tag as it appears in requests.
    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Coco => "coco",
            ExportFormat::Yolo => "yolo",
        }
    }

    /// Content type of this format's artifact.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Coco => "application/json",
            ExportFormat::Yolo => "application/zip",
        }
    }

    /// Suggested attachment filename for a dataset exported in this format.
    pub fn attachment_name(&self, dataset_name: &str) -> String {
        match self {
            ExportFormat::Coco => format!("{}_coco.json", dataset_name),
            ExportFormat::Yolo => format!("{}_yolo.zip", dataset_name),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coco" => Ok(ExportFormat::Coco),
            "yolo" => Ok(ExportFormat::Yolo),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Parameters of one export invocation.
#[derive(Clone, Debug)]
pub struct ExportRequest {
    pub dataset_id: DatasetId,
    pub format: ExportFormat,
    /// YOLO only: byte-copy stored image payloads into the archive.
    /// Ignored for COCO.
    pub include_images: bool,
}

/// The result of a successful export: a downloadable payload plus metadata.
#[derive(Clone, Debug)]
pub struct ExportArtifact {
    /// Suggested attachment filename (`<dataset>_coco.json` / `<dataset>_yolo.zip`).
    pub file_name: String,
    /// `application/json` or `application/zip`.
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
    /// Recoverable issues collected during export (empty for COCO).
    pub report: ExportReport,
}

/// Resolves a dataset for the principal and exports it in the requested format.
///
/// Fails with [`ExportError::DatasetNotFound`] when the dataset is absent or
/// not owned by the principal, before any export work happens. Format
/// validation happens at request construction ([`ExportFormat::from_str`]),
/// so an unsupported tag never reaches this function with side effects
/// pending.
pub fn export_dataset(
    datasets: &impl DatasetProvider,
    files: &impl ImageFileProvider,
    principal: &Principal,
    request: &ExportRequest,
) -> Result<ExportArtifact, ExportError> {
    let snapshot = datasets
        .dataset_for_owner(request.dataset_id, principal)
        .ok_or(ExportError::DatasetNotFound {
            dataset_id: request.dataset_id,
        })?;

    let file_name = request.format.attachment_name(&snapshot.dataset.name);
    let content_type = request.format.content_type();

    let (bytes, report) = match request.format {
        ExportFormat::Coco => (coco::export_coco(&snapshot)?, ExportReport::new()),
        ExportFormat::Yolo => yolo::export_yolo(&snapshot, files, request.include_images)?,
    };

    Ok(ExportArtifact {
        file_name,
        content_type,
        bytes,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tags_parse() {
        assert_eq!("coco".parse::<ExportFormat>().unwrap(), ExportFormat::Coco);
        assert_eq!("yolo".parse::<ExportFormat>().unwrap(), ExportFormat::Yolo);
    }

    #[test]
    fn test_unknown_format_tag_rejected() {
        let err = "voc".parse::<ExportFormat>().unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedFormat(tag) if tag == "voc"));
    }

    #[test]
    fn test_attachment_names() {
        assert_eq!(ExportFormat::Coco.attachment_name("animals"), "animals_coco.json");
        assert_eq!(ExportFormat::Yolo.attachment_name("animals"), "animals_yolo.zip");
    }

    #[test]
    fn test_content_types() {
        assert_eq!(ExportFormat::Coco.content_type(), "application/json");
        assert_eq!(ExportFormat::Yolo.content_type(), "application/zip");
    }
}
