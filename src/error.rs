use std::path::PathBuf;
use thiserror::Error;

use crate::model::{AnnotationId, CategoryId, DatasetId, ImageId};

/// The main error type for labelport operations.
///
/// Data-inconsistency variants (`ZeroImageDimensions`, `UnknownCategory`,
/// `AnnotationCapacityExceeded`) fail the whole export: a partially-correct
/// document is never emitted. Per-image asset copy failures during YOLO
/// export are not errors; they are collected as warnings in
/// [`ExportReport`](crate::export::ExportReport).
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset {dataset_id} not found")]
    DatasetNotFound { dataset_id: DatasetId },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Image {image_id} ('{file_name}') has zero width or height")]
    ZeroImageDimensions {
        image_id: ImageId,
        file_name: String,
    },

    #[error("Annotation {annotation_id} references unknown category {category_id}")]
    UnknownCategory {
        annotation_id: AnnotationId,
        category_id: CategoryId,
    },

    #[error(
        "Image {image_id} has {count} bbox annotations; the COCO id scheme \
         supports at most {limit} per image"
    )]
    AnnotationCapacityExceeded {
        image_id: ImageId,
        count: usize,
        limit: u64,
    },

    #[error("Failed to serialize COCO JSON: {source}")]
    CocoJsonWrite {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to assemble export archive: {source}")]
    Archive {
        #[from]
        source: zip::result::ZipError,
    },

    #[error("Failed to parse snapshot from {path}: {source}")]
    SnapshotParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to probe image dimensions from {path}: {message}")]
    ImageProbe { path: PathBuf, message: String },
}
