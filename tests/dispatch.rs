//! Integration tests for the export dispatcher over the snapshot store.

use labelport::error::ExportError;
use labelport::export::{export_dataset, ExportFormat, ExportRequest};
use labelport::model::DatasetId;
use labelport::provider::Principal;
use labelport::store::SnapshotStore;

const SNAPSHOT: &str = r#"{
    "projects": [
        {
            "id": 1,
            "name": "wildlife",
            "owner": "alice",
            "categories": [
                {"id": 10, "name": "cat"},
                {"id": 20, "name": "dog"}
            ],
            "datasets": [
                {
                    "id": 100,
                    "name": "animals",
                    "description": "field photos",
                    "updated_at": "2024-06-01 12:00:00",
                    "images": [
                        {
                            "id": 1,
                            "filename": "a.jpg",
                            "width": 800,
                            "height": 600,
                            "is_annotated": true,
                            "annotations": [
                                {"id": 11, "category_id": 10, "type": "bbox",
                                 "x": 100.0, "y": 150.0, "width": 200.0, "height": 300.0}
                            ]
                        }
                    ]
                }
            ]
        }
    ]
}"#;

fn store() -> SnapshotStore {
    SnapshotStore::from_str(SNAPSHOT, ".").expect("parse snapshot")
}

fn request(format: ExportFormat) -> ExportRequest {
    ExportRequest {
        dataset_id: DatasetId::new(100),
        format,
        include_images: false,
    }
}

#[test]
fn coco_artifact_has_json_metadata() {
    let store = store();
    let artifact = export_dataset(
        &store,
        &store,
        &Principal::new("alice"),
        &request(ExportFormat::Coco),
    )
    .expect("export coco");

    assert_eq!(artifact.file_name, "animals_coco.json");
    assert_eq!(artifact.content_type, "application/json");
    assert!(artifact.report.is_clean());

    let json: serde_json::Value = serde_json::from_slice(&artifact.bytes).expect("parse bytes");
    assert_eq!(json["annotations"].as_array().unwrap().len(), 1);
}

#[test]
fn yolo_artifact_has_zip_metadata() {
    let store = store();
    let artifact = export_dataset(
        &store,
        &store,
        &Principal::new("alice"),
        &request(ExportFormat::Yolo),
    )
    .expect("export yolo");

    assert_eq!(artifact.file_name, "animals_yolo.zip");
    assert_eq!(artifact.content_type, "application/zip");
    // Zip local-file-header magic.
    assert_eq!(&artifact.bytes[..4], b"PK\x03\x04");
}

#[test]
fn include_images_is_ignored_for_coco() {
    let store = store();
    let mut req = request(ExportFormat::Coco);
    req.include_images = true;

    // The only image has no stored payload; COCO must not care.
    let artifact =
        export_dataset(&store, &store, &Principal::new("alice"), &req).expect("export coco");
    assert!(artifact.report.is_clean());
}

#[test]
fn missing_dataset_is_not_found() {
    let store = store();
    let mut req = request(ExportFormat::Coco);
    req.dataset_id = DatasetId::new(999);

    let err = export_dataset(&store, &store, &Principal::new("alice"), &req).unwrap_err();
    assert!(matches!(
        err,
        ExportError::DatasetNotFound { dataset_id } if dataset_id.as_u64() == 999
    ));
}

#[test]
fn foreign_owner_is_not_found() {
    let store = store();
    let err = export_dataset(
        &store,
        &store,
        &Principal::new("mallory"),
        &request(ExportFormat::Coco),
    )
    .unwrap_err();
    assert!(matches!(err, ExportError::DatasetNotFound { .. }));
}

#[test]
fn unknown_format_tag_is_a_distinct_client_error() {
    let err = "voc".parse::<ExportFormat>().unwrap_err();
    let message = err.to_string();
    assert!(matches!(err, ExportError::UnsupportedFormat(tag) if tag == "voc"));

    // Error messages for the two rejection classes must be distinguishable.
    let not_found = ExportError::DatasetNotFound {
        dataset_id: DatasetId::new(1),
    };
    assert_ne!(message, not_found.to_string());
}
