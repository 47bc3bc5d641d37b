#![allow(dead_code)]

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use labelport::model::{Annotation, Dataset, Image, LabelCategory, Shape};
use labelport::provider::{DatasetSnapshot, ImageFileProvider};

pub fn bmp_bytes(width: u32, height: u32) -> Vec<u8> {
    let row_stride = (width * 3).div_ceil(4) * 4;
    let pixel_array_size = row_stride * height;
    let file_size = 54 + pixel_array_size;

    let mut bytes = Vec::with_capacity(file_size as usize);
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&file_size.to_le_bytes());
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes.extend_from_slice(&54u32.to_le_bytes());

    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&(width as i32).to_le_bytes());
    bytes.extend_from_slice(&(height as i32).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&pixel_array_size.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());

    bytes.resize(file_size as usize, 0);
    bytes
}

pub fn write_bmp(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bmp_bytes(width, height)).expect("write bmp file");
}

/// Resolves image payloads against a media directory, like a real store would.
pub struct MediaDir(pub PathBuf);

impl ImageFileProvider for MediaDir {
    fn resolve(&self, image: &Image) -> io::Result<PathBuf> {
        let rel = image.file.as_deref().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("image '{}' has no stored payload", image.file_name),
            )
        })?;
        Ok(self.0.join(rel))
    }
}

/// A snapshot covering the interesting shapes: bbox annotations, a non-bbox
/// annotation, and an image with no annotations at all.
///
/// Categories arrive name-ascending (provider default ordering):
/// bird, cat, dog.
pub fn sample_snapshot() -> DatasetSnapshot {
    let dataset = Dataset::new(100u64, "animals")
        .with_description("field photos")
        .with_updated_at("2024-06-01 12:00:00")
        .with_image(
            Image::new(1u64, "a.bmp", 800, 600)
                .with_file("media/a.bmp")
                .with_annotation(Annotation::bbox(11u64, 20u64, 100.0, 150.0, 200.0, 300.0)),
        )
        .with_image(
            Image::new(2u64, "b.bmp", 640, 480)
                .with_file("media/b.bmp")
                .with_annotation(Annotation::bbox(12u64, 30u64, 0.0, 0.0, 64.0, 48.0))
                .with_annotation(Annotation::bbox(13u64, 20u64, 32.0, 24.0, 64.0, 48.0))
                .with_annotation(Annotation::new(
                    14u64,
                    10u64,
                    Shape::Polygon {
                        points: vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]],
                    },
                )),
        )
        // No annotations; still gets an (empty) label file in YOLO exports.
        .with_image(Image::new(3u64, "c.bmp", 320, 240).with_file("media/c.bmp"));

    DatasetSnapshot {
        dataset,
        categories: vec![
            LabelCategory::new(10u64, "bird"),
            LabelCategory::new(20u64, "cat"),
            LabelCategory::new(30u64, "dog"),
        ],
    }
}
