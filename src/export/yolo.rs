//! YOLO archive exporter.
//!
//! Builds an Ultralytics-style dataset tree (`classes.txt`, `data.yaml`,
//! one label file per image under `labels/`, optional image payloads under
//! `images/`, and a `README.txt` report), then seals it into a deflate zip.
//!
//! The tree is staged in a [`tempfile::TempDir`], which is removed when the
//! guard drops on every exit path, success or failure. Temp directory names
//! are unique per call, so concurrent exports never share staging state.
//! Per-image payload copy failures are recoverable: they become
//! [`ExportReport`] warnings and the export continues.

use std::fs::{self, File};
use std::io::{self, Cursor, Write};
use std::path::Path;

use tempfile::TempDir;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::coord::NormalizedBox;
use super::index::CategoryIndex;
use super::report::{ExportReport, ExportWarning};
use crate::error::ExportError;
use crate::model::Image;
use crate::provider::{DatasetSnapshot, ImageFileProvider};

/// Exports a dataset snapshot as a YOLO zip archive.
///
/// Every image gets a label file under `labels/`, empty when it has no
/// bbox annotations, so downstream trainers can pair images and labels by
/// stem name. With `include_images`, stored payloads are byte-copied under
/// `images/`. Returns the archive bytes and the warnings collected along
/// the way.
pub fn export_yolo(
    snapshot: &DatasetSnapshot,
    files: &dyn ImageFileProvider,
    include_images: bool,
) -> Result<(Vec<u8>, ExportReport), ExportError> {
    let index = CategoryIndex::yolo(&snapshot.categories);
    let mut report = ExportReport::new();

    // Staging tree; removed when the guard drops, on every exit path.
    let staging = TempDir::new()?;
    let root = staging.path();

    let labels_dir = root.join("labels");
    fs::create_dir_all(&labels_dir)?;

    let images_dir = root.join("images");
    if include_images {
        fs::create_dir_all(&images_dir)?;
    }

    write_classes_txt(root, &index)?;
    write_data_yaml(root, &snapshot.dataset.name, &index)?;

    for image in &snapshot.dataset.images {
        if image.width == 0 || image.height == 0 {
            return Err(ExportError::ZeroImageDimensions {
                image_id: image.id,
                file_name: image.file_name.clone(),
            });
        }

        if include_images {
            if let Err(e) = copy_image_payload(files, image, &images_dir) {
                report.add(ExportWarning::image_copy_failed(
                    &image.file_name,
                    e.to_string(),
                ));
            }
        }

        write_label_file(&labels_dir, image, &index)?;
    }

    write_readme(root, snapshot, &index, include_images)?;

    let bytes = pack_archive(root)?;
    Ok((bytes, report))
}

/// One category name per line, in class-id order.
fn write_classes_txt(root: &Path, index: &CategoryIndex) -> Result<(), ExportError> {
    let mut content = String::new();
    for name in index.names() {
        content.push_str(name);
        content.push('\n');
    }
    fs::write(root.join("classes.txt"), content)?;
    Ok(())
}

/// Dataset-config file consumed by external YOLO-compatible trainers.
fn write_data_yaml(
    root: &Path,
    dataset_name: &str,
    index: &CategoryIndex,
) -> Result<(), ExportError> {
    let mut yaml = String::new();
    yaml.push_str(&format!("# Dataset configuration for {}\n", dataset_name));
    yaml.push_str("path: ./  # dataset root dir\n");
    yaml.push_str("train: images/  # train images (relative to 'path')\n");
    yaml.push_str("val: images/  # val images (relative to 'path')\n");
    yaml.push_str("test:  # test images (optional)\n\n");
    yaml.push_str("# Classes\n");
    yaml.push_str(&format!("nc: {}  # number of classes\n", index.len()));

    let names: Vec<String> = index.names().map(yaml_single_quoted).collect();
    yaml.push_str(&format!("names: [{}]\n", names.join(", ")));

    fs::write(root.join("data.yaml"), yaml)?;
    Ok(())
}

fn yaml_single_quoted(raw: &str) -> String {
    format!("'{}'", raw.replace('\'', "''"))
}

/// Writes `labels/<stem>.txt` with one line per bbox annotation.
fn write_label_file(
    labels_dir: &Path,
    image: &Image,
    index: &CategoryIndex,
) -> Result<(), ExportError> {
    let label_name = Path::new(&image.file_name).with_extension("txt");
    let mut label_file = File::create(labels_dir.join(label_name))?;

    for (ann, bbox) in image.bbox_annotations() {
        let class_id = index
            .get(ann.category_id)
            .ok_or_else(|| ExportError::UnknownCategory {
                annotation_id: ann.id,
                category_id: ann.category_id,
            })?;

        let norm = NormalizedBox::from_pixel(bbox, image.width, image.height).ok_or_else(
            || ExportError::ZeroImageDimensions {
                image_id: image.id,
                file_name: image.file_name.clone(),
            },
        )?;

        writeln!(label_file, "{} {}", class_id, norm.label_fields())?;
    }

    Ok(())
}

fn copy_image_payload(
    files: &dyn ImageFileProvider,
    image: &Image,
    images_dir: &Path,
) -> io::Result<()> {
    let source = files.resolve(image)?;
    fs::copy(&source, images_dir.join(&image.file_name))?;
    Ok(())
}

/// Human-readable export report; descriptive only, nothing parses it.
fn write_readme(
    root: &Path,
    snapshot: &DatasetSnapshot,
    index: &CategoryIndex,
    include_images: bool,
) -> Result<(), ExportError> {
    let dataset = &snapshot.dataset;
    let total_images = dataset.images.len();
    let annotated_images = dataset.images.iter().filter(|img| img.is_annotated).count();
    let total_annotations: usize = dataset
        .images
        .iter()
        .map(|img| img.bbox_annotations().count())
        .sum();

    let mut text = String::new();
    text.push_str(&format!("YOLO Dataset Export - {}\n", dataset.name));
    text.push_str(&format!("{}\n\n", "=".repeat(50)));
    text.push_str("Generated by labelport\n");
    text.push_str(&format!("Export Date: {}\n", dataset.updated_at));
    text.push_str(&format!("Dataset Type: {}\n\n", dataset.kind));

    text.push_str("OVERVIEW\n");
    text.push_str(&format!("{}\n", "-".repeat(20)));
    text.push_str("This export contains annotation files in YOLO format, ready for training\n");
    text.push_str("YOLO (You Only Look Once) object detection models.\n\n");

    text.push_str("FILE STRUCTURE\n");
    text.push_str(&format!("{}\n", "-".repeat(20)));
    text.push_str("labels/          YOLO annotation files (.txt)\n");
    if include_images {
        text.push_str("images/          Training images\n");
    }
    text.push_str("classes.txt      Class names (one per line)\n");
    text.push_str("data.yaml        YOLO dataset configuration\n");
    text.push_str("README.txt       This documentation\n\n");

    text.push_str("YOLO ANNOTATION FORMAT\n");
    text.push_str(&format!("{}\n", "-".repeat(20)));
    text.push_str("Each annotation file (.txt) contains one line per object:\n");
    text.push_str("Format: class_id center_x center_y width height\n\n");
    text.push_str("Where:\n");
    text.push_str("  class_id    Integer class identifier (0-based)\n");
    text.push_str("  center_x    X-coordinate of bounding box center (0.0-1.0)\n");
    text.push_str("  center_y    Y-coordinate of bounding box center (0.0-1.0)\n");
    text.push_str("  width       Bounding box width (0.0-1.0)\n");
    text.push_str("  height      Bounding box height (0.0-1.0)\n\n");
    text.push_str("All coordinates are normalized relative to image dimensions.\n\n");

    text.push_str("DATASET STATISTICS\n");
    text.push_str(&format!("{}\n", "-".repeat(20)));
    text.push_str(&format!("Total Images:        {}\n", total_images));
    text.push_str(&format!("Annotated Images:    {}\n", annotated_images));
    text.push_str(&format!("Total Annotations:   {}\n", total_annotations));
    text.push_str(&format!("Number of Classes:   {}\n\n", index.len()));

    text.push_str("CLASS MAPPING\n");
    text.push_str(&format!("{}\n", "-".repeat(20)));
    text.push_str("ID | Class Name\n");
    text.push_str("---|------------\n");
    for (class_id, name) in index.entries() {
        text.push_str(&format!("{:2} | {}\n", class_id, name));
    }
    text.push('\n');

    text.push_str("USAGE WITH YOLO\n");
    text.push_str(&format!("{}\n", "-".repeat(20)));
    text.push_str("1. Use the data.yaml file to configure your YOLO training\n");
    text.push_str("2. Place this dataset in your YOLO project directory\n");
    text.push_str("3. Update the paths in data.yaml if needed\n");
    text.push_str("4. Train your model: yolo train data=data.yaml\n\n");

    if !include_images {
        text.push_str("NOTE: This export contains labels only. Add your images to the\n");
        text.push_str("'images/' directory to complete the dataset structure.\n\n");
    }

    text.push_str("For more information about YOLO format and training, visit:\n");
    text.push_str("https://github.com/ultralytics/ultralytics\n");

    fs::write(root.join("README.txt"), text)?;
    Ok(())
}

/// Seals the staging tree into an in-memory deflate zip.
fn pack_archive(root: &Path) -> Result<Vec<u8>, ExportError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| ExportError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(root)
            .map_err(|_| ExportError::Io(io::Error::other("staging entry outside staging root")))?;
        let name = rel.to_string_lossy().replace('\\', "/");

        writer.start_file(name, options)?;
        let mut file = File::open(entry.path())?;
        io::copy(&mut file, &mut writer)?;
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}
