//! Coordinate transforms between stored pixel boxes and format conventions.
//!
//! The store keeps boxes as top-left corner + size in absolute pixels. YOLO
//! wants center coordinates normalized by image size; COCO takes the pixel
//! values through unchanged. Only the YOLO direction lives here, as a pure
//! function of one box and the owning image's dimensions.

use crate::model::PixelBox;

/// A bounding box in YOLO convention: normalized center + size, all in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedBox {
    pub cx: f64,
    pub cy: f64,
    pub width: f64,
    pub height: f64,
}

impl NormalizedBox {
    /// Normalizes a pixel box against its image's dimensions.
    ///
    /// Each output component is clamped to [0, 1] after normalization so
    /// that boxes extending past the image bounds (upstream edit errors)
    /// stay representable. Returns `None` when either dimension is zero;
    /// callers surface that as a data inconsistency rather than letting
    /// NaN/Inf propagate.
    pub fn from_pixel(bbox: &PixelBox, image_width: u32, image_height: u32) -> Option<Self> {
        if image_width == 0 || image_height == 0 {
            return None;
        }
        let w = image_width as f64;
        let h = image_height as f64;

        Some(Self {
            cx: ((bbox.x + bbox.width / 2.0) / w).clamp(0.0, 1.0),
            cy: ((bbox.y + bbox.height / 2.0) / h).clamp(0.0, 1.0),
            width: (bbox.width / w).clamp(0.0, 1.0),
            height: (bbox.height / h).clamp(0.0, 1.0),
        })
    }

    /// Formats the box as a YOLO label line body with 6 decimal digits.
    pub fn label_fields(&self) -> String {
        format!(
            "{:.6} {:.6} {:.6} {:.6}",
            self.cx, self.cy, self.width, self.height
        )
    }
}
