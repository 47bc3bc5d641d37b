//! Integration tests for snapshot loading and dimension probing.

use std::fs;

use labelport::error::ExportError;
use labelport::export::{export_dataset, ExportFormat, ExportRequest};
use labelport::model::DatasetId;
use labelport::provider::{DatasetProvider, Principal};
use labelport::store::SnapshotStore;

mod common;
use common::write_bmp;

fn snapshot_json(width: u32, height: u32, file: Option<&str>) -> String {
    let file_field = match file {
        Some(f) => format!(r#""file": "{}","#, f),
        None => String::new(),
    };
    format!(
        r#"{{
            "projects": [
                {{
                    "id": 1,
                    "name": "wildlife",
                    "owner": "alice",
                    "categories": [{{"id": 10, "name": "cat"}}],
                    "datasets": [
                        {{
                            "id": 100,
                            "name": "animals",
                            "images": [
                                {{
                                    "id": 1,
                                    "filename": "x.bmp",
                                    "width": {width},
                                    "height": {height},
                                    {file_field}
                                    "annotations": [
                                        {{"id": 11, "category_id": 10, "type": "bbox",
                                         "x": 100.0, "y": 150.0, "width": 200.0, "height": 300.0}}
                                    ]
                                }}
                            ]
                        }}
                    ]
                }}
            ]
        }}"#
    )
}

#[test]
fn missing_dimensions_probed_from_payload() {
    let temp = tempfile::tempdir().expect("create temp dir");
    write_bmp(&temp.path().join("media/x.bmp"), 800, 600);

    let store_path = temp.path().join("store.json");
    fs::write(&store_path, snapshot_json(0, 0, Some("media/x.bmp"))).expect("write snapshot");

    let store = SnapshotStore::load(&store_path).expect("load snapshot");
    let snapshot = store
        .dataset_for_owner(DatasetId::new(100), &Principal::new("alice"))
        .expect("dataset for owner");

    assert_eq!(snapshot.dataset.images[0].width, 800);
    assert_eq!(snapshot.dataset.images[0].height, 600);
}

#[test]
fn probed_dimensions_feed_the_exporters() {
    let temp = tempfile::tempdir().expect("create temp dir");
    write_bmp(&temp.path().join("media/x.bmp"), 800, 600);

    let store_path = temp.path().join("store.json");
    fs::write(&store_path, snapshot_json(0, 0, Some("media/x.bmp"))).expect("write snapshot");

    let store = SnapshotStore::load(&store_path).expect("load snapshot");
    let artifact = export_dataset(
        &store,
        &store,
        &Principal::new("alice"),
        &ExportRequest {
            dataset_id: DatasetId::new(100),
            format: ExportFormat::Coco,
            include_images: false,
        },
    )
    .expect("export coco");

    let json: serde_json::Value = serde_json::from_slice(&artifact.bytes).expect("parse bytes");
    assert_eq!(json["images"][0]["width"], 800);
    assert_eq!(json["images"][0]["height"], 600);
}

#[test]
fn unreadable_payload_is_a_probe_error() {
    let temp = tempfile::tempdir().expect("create temp dir");
    fs::create_dir_all(temp.path().join("media")).expect("create media dir");
    fs::write(temp.path().join("media/x.bmp"), b"not an image").expect("write junk");

    let store_path = temp.path().join("store.json");
    fs::write(&store_path, snapshot_json(0, 0, Some("media/x.bmp"))).expect("write snapshot");

    let err = SnapshotStore::load(&store_path).unwrap_err();
    assert!(matches!(err, ExportError::ImageProbe { .. }));
}

#[test]
fn zero_dimensions_without_payload_reach_the_exporter() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let store_path = temp.path().join("store.json");
    fs::write(&store_path, snapshot_json(0, 0, None)).expect("write snapshot");

    // Nothing to probe; the inconsistency surfaces at export time.
    let store = SnapshotStore::load(&store_path).expect("load snapshot");
    let err = export_dataset(
        &store,
        &store,
        &Principal::new("alice"),
        &ExportRequest {
            dataset_id: DatasetId::new(100),
            format: ExportFormat::Yolo,
            include_images: false,
        },
    )
    .unwrap_err();
    assert!(matches!(err, ExportError::ZeroImageDimensions { .. }));
}

#[test]
fn stored_dimensions_are_not_reprobed() {
    let temp = tempfile::tempdir().expect("create temp dir");
    // Payload says 800x600 but the store says 640x480; stored wins.
    write_bmp(&temp.path().join("media/x.bmp"), 800, 600);

    let store_path = temp.path().join("store.json");
    fs::write(&store_path, snapshot_json(640, 480, Some("media/x.bmp"))).expect("write snapshot");

    let store = SnapshotStore::load(&store_path).expect("load snapshot");
    let snapshot = store
        .dataset_for_owner(DatasetId::new(100), &Principal::new("alice"))
        .expect("dataset for owner");
    assert_eq!(snapshot.dataset.images[0].width, 640);
}
