//! Entities of the labeling store consumed by the export engine.
//!
//! These types are a read-only snapshot of the relational store: the engine
//! never creates, mutates, or deletes them. Bounding boxes are stored as
//! top-left corner + size in absolute pixel units; format-specific
//! coordinate conventions are applied at export time.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AnnotationId, CategoryId, DatasetId, ImageId};

/// An axis-aligned bounding box in pixel units (top-left corner + size).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelBox {
    /// Creates a new box from top-left corner and size.
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Area of the box in pixel units.
    ///
    /// Not clamped to the owning image's bounds; a box that extends past
    /// the image contributes its full width x height.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// The geometric payload of an annotation.
///
/// Bounding-box coordinates are present exactly when the annotation is
/// bbox-shaped; the other shapes carry a point-sequence payload that the
/// exporters do not emit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Shape {
    #[serde(rename = "bbox")]
    BBox(PixelBox),
    #[serde(rename = "polygon")]
    Polygon { points: Vec<[f64; 2]> },
    #[serde(rename = "keypoint")]
    Keypoint { points: Vec<[f64; 2]> },
    #[serde(rename = "classification")]
    Classification,
    #[serde(rename = "segmentation")]
    Segmentation { points: Vec<[f64; 2]> },
}

impl Shape {
    /// Returns the bounding box if this is a bbox-shaped annotation.
    #[inline]
    pub fn as_bbox(&self) -> Option<&PixelBox> {
        match self {
            Shape::BBox(bbox) => Some(bbox),
            _ => None,
        }
    }
}

/// A single annotation on an image.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Annotation {
    /// Unique identifier for this annotation in the store.
    pub id: AnnotationId,

    /// The label category this annotation carries.
    pub category_id: CategoryId,

    /// Geometric payload, tagged by annotation type.
    #[serde(flatten)]
    pub shape: Shape,

    /// Optional confidence score (e.g., from model-assisted labeling).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Annotation {
    /// Creates a new annotation.
    pub fn new(
        id: impl Into<AnnotationId>,
        category_id: impl Into<CategoryId>,
        shape: Shape,
    ) -> Self {
        Self {
            id: id.into(),
            category_id: category_id.into(),
            shape,
            confidence: None,
        }
    }

    /// Creates a new bbox annotation.
    pub fn bbox(
        id: impl Into<AnnotationId>,
        category_id: impl Into<CategoryId>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Self {
        Self::new(id, category_id, Shape::BBox(PixelBox::new(x, y, width, height)))
    }

    /// Adds a confidence score to the annotation.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

impl From<u64> for AnnotationId {
    fn from(id: u64) -> Self {
        AnnotationId::new(id)
    }
}

/// An image in a dataset, with its annotations.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Image {
    /// Unique identifier for this image in the store.
    pub id: ImageId,

    /// Filename as stored (used for label-file stems and archive entries).
    #[serde(rename = "filename")]
    pub file_name: String,

    /// Width of the image in pixels.
    pub width: u32,

    /// Height of the image in pixels.
    pub height: u32,

    /// Stored payload size in bytes.
    #[serde(rename = "size", default)]
    pub size_bytes: u64,

    /// Whether the labeling workflow has marked this image as annotated.
    #[serde(default)]
    pub is_annotated: bool,

    /// Optional on-disk payload path, relative to the store's media root.
    #[serde(rename = "file", default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Annotations on this image, in stored order.
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl Image {
    /// Creates a new image with the given properties.
    pub fn new(
        id: impl Into<ImageId>,
        file_name: impl Into<String>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            width,
            height,
            size_bytes: 0,
            is_annotated: false,
            file: None,
            annotations: Vec::new(),
        }
    }

    /// Sets the relative payload path for this image.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Appends an annotation and marks the image annotated.
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self.is_annotated = true;
        self
    }

    /// Iterates the bbox-shaped annotations of this image in stored order.
    pub fn bbox_annotations(&self) -> impl Iterator<Item = (&Annotation, &PixelBox)> {
        self.annotations
            .iter()
            .filter_map(|ann| ann.shape.as_bbox().map(|bbox| (ann, bbox)))
    }
}

impl From<u64> for ImageId {
    fn from(id: u64) -> Self {
        ImageId::new(id)
    }
}

/// Dataset content type tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    #[default]
    Image,
    Video,
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetKind::Image => write!(f, "Image"),
            DatasetKind::Video => write!(f, "Video"),
        }
    }
}

/// A dataset: an ordered collection of images under one project.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Dataset {
    /// Unique identifier for this dataset in the store.
    pub id: DatasetId,

    /// Display name (also the stem of export attachment filenames).
    pub name: String,

    /// Free-text description, passed through verbatim to COCO `info`.
    #[serde(default)]
    pub description: String,

    /// Content type of the dataset.
    #[serde(rename = "dataset_type", default)]
    pub kind: DatasetKind,

    /// Last-update timestamp as stored (ISO 8601 or similar).
    #[serde(default)]
    pub updated_at: String,

    /// Images in provider order.
    #[serde(default)]
    pub images: Vec<Image>,
}

impl Dataset {
    /// Creates a new, empty dataset.
    pub fn new(id: impl Into<DatasetId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            kind: DatasetKind::Image,
            updated_at: String::new(),
            images: Vec::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the last-update timestamp.
    pub fn with_updated_at(mut self, updated_at: impl Into<String>) -> Self {
        self.updated_at = updated_at.into();
        self
    }

    /// Appends an image.
    pub fn with_image(mut self, image: Image) -> Self {
        self.images.push(image);
        self
    }
}

impl From<u64> for DatasetId {
    fn from(id: u64) -> Self {
        DatasetId::new(id)
    }
}

/// A label category belonging to a project.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LabelCategory {
    /// Unique identifier for this category in the store.
    pub id: CategoryId,

    /// Category name (e.g., "person", "car", "dog").
    pub name: String,
}

impl LabelCategory {
    /// Creates a new category.
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl From<u64> for CategoryId {
    fn from(id: u64) -> Self {
        CategoryId::new(id)
    }
}
