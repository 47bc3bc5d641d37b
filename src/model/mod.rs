//! Read-only data model consumed by the export engine.

mod dataset;
mod ids;

pub use dataset::{Annotation, Dataset, DatasetKind, Image, LabelCategory, PixelBox, Shape};
pub use ids::{AnnotationId, CategoryId, DatasetId, ImageId, ProjectId};
