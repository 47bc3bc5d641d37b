//! COCO JSON exporter.
//!
//! Builds a single COCO document (`info` / `images` / `annotations` /
//! `categories`) from a dataset snapshot.
//!
//! # COCO Format Reference
//!
//! COCO bounding boxes use `[x, y, width, height]` format where `(x, y)` is
//! the top-left corner in absolute pixel coordinates. The store uses the
//! same convention, so boxes pass through unchanged; `area` is width x
//! height in pixel units and is deliberately not clamped to image bounds.
//!
//! # Deterministic Output
//!
//! Categories, images, and annotations are emitted in snapshot order with
//! sequential ids, so exporting an unchanged snapshot twice yields a
//! byte-identical document.

use serde::Serialize;

use super::index::CategoryIndex;
use crate::error::ExportError;
use crate::provider::DatasetSnapshot;

/// Version constant written into the COCO `info` block.
pub const COCO_SCHEMA_VERSION: &str = "1.0";

/// Year constant written into the COCO `info` block.
pub const COCO_EXPORT_YEAR: u32 = 2024;

/// Placeholder supercategory for every exported category.
pub const COCO_SUPERCATEGORY: &str = "object";

/// Stride of the synthesized annotation id scheme.
///
/// Annotation ids are `local_index + image_seq_id * stride`, which encodes
/// both the owning image and the position within it but caps an image at
/// `stride - 1` bbox annotations. Exceeding the cap is a reported error,
/// never a silent wraparound.
pub const COCO_ANNOTATION_ID_STRIDE: u64 = 1000;

// ============================================================================
// COCO Schema Types (internal to this module)
// ============================================================================

/// Top-level COCO document. Field order matches the emitted key order.
#[derive(Debug, Serialize)]
struct CocoExport {
    info: CocoInfo,
    images: Vec<CocoImage>,
    annotations: Vec<CocoAnnotation>,
    categories: Vec<CocoCategory>,
}

/// COCO dataset info block.
#[derive(Debug, Serialize)]
struct CocoInfo {
    description: String,
    version: &'static str,
    year: u32,
}

/// COCO image entry.
#[derive(Debug, Serialize)]
struct CocoImage {
    id: u64,
    width: u32,
    height: u32,
    file_name: String,
}

/// COCO annotation entry.
#[derive(Debug, Serialize)]
struct CocoAnnotation {
    id: u64,
    image_id: u64,
    category_id: u32,

    /// COCO bbox format: [x, y, width, height] with (x,y) as top-left corner.
    bbox: [f64; 4],

    area: f64,
    iscrowd: u8,
}

/// COCO category entry.
#[derive(Debug, Serialize)]
struct CocoCategory {
    id: u32,
    name: String,
    supercategory: &'static str,
}

// ============================================================================
// Export
// ============================================================================

/// Exports a dataset snapshot as a COCO JSON document.
///
/// Output is pretty-printed with a 2-space indent. Errors on zero image
/// dimensions, annotations referencing categories outside the project's
/// set, and images exceeding the annotation id capacity; a partial document
/// is never produced.
pub fn export_coco(snapshot: &DatasetSnapshot) -> Result<Vec<u8>, ExportError> {
    let document = build_document(snapshot)?;
    serde_json::to_vec_pretty(&document).map_err(|source| ExportError::CocoJsonWrite { source })
}

/// Exports a dataset snapshot as a COCO JSON string.
///
/// Useful for testing without byte-level handling.
pub fn to_coco_string(snapshot: &DatasetSnapshot) -> Result<String, ExportError> {
    let document = build_document(snapshot)?;
    serde_json::to_string_pretty(&document).map_err(|source| ExportError::CocoJsonWrite { source })
}

fn build_document(snapshot: &DatasetSnapshot) -> Result<CocoExport, ExportError> {
    let index = CategoryIndex::coco(&snapshot.categories);

    let categories = index
        .entries()
        .map(|(id, name)| CocoCategory {
            id,
            name: name.to_string(),
            supercategory: COCO_SUPERCATEGORY,
        })
        .collect();

    let mut images = Vec::with_capacity(snapshot.dataset.images.len());
    let mut annotations = Vec::new();

    for (image_idx, image) in snapshot.dataset.images.iter().enumerate() {
        if image.width == 0 || image.height == 0 {
            return Err(ExportError::ZeroImageDimensions {
                image_id: image.id,
                file_name: image.file_name.clone(),
            });
        }

        let image_seq_id = image_idx as u64 + 1;
        images.push(CocoImage {
            id: image_seq_id,
            width: image.width,
            height: image.height,
            file_name: image.file_name.clone(),
        });

        let bbox_count = image.bbox_annotations().count();
        if bbox_count as u64 >= COCO_ANNOTATION_ID_STRIDE {
            return Err(ExportError::AnnotationCapacityExceeded {
                image_id: image.id,
                count: bbox_count,
                limit: COCO_ANNOTATION_ID_STRIDE - 1,
            });
        }

        for (local_idx, (ann, bbox)) in image.bbox_annotations().enumerate() {
            let category_id =
                index
                    .get(ann.category_id)
                    .ok_or_else(|| ExportError::UnknownCategory {
                        annotation_id: ann.id,
                        category_id: ann.category_id,
                    })?;

            annotations.push(CocoAnnotation {
                id: local_idx as u64 + image_seq_id * COCO_ANNOTATION_ID_STRIDE,
                image_id: image_seq_id,
                category_id,
                bbox: [bbox.x, bbox.y, bbox.width, bbox.height],
                area: bbox.area(),
                iscrowd: 0,
            });
        }
    }

    Ok(CocoExport {
        info: CocoInfo {
            description: snapshot.dataset.description.clone(),
            version: COCO_SCHEMA_VERSION,
            year: COCO_EXPORT_YEAR,
        },
        images,
        annotations,
        categories,
    })
}
