//! JSON snapshot store: the bundled provider implementation.
//!
//! A snapshot file captures the relational store at a point in time:
//! projects (with owner and label categories) containing datasets, images,
//! and annotations. The CLI and integration tests load exports from such
//! snapshots; a deployment embedding the engine supplies its own providers
//! instead.
//!
//! Images whose snapshot entry lacks dimensions but carries a payload path
//! get their width/height probed from the file via `imagesize` at load time.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ExportError;
use crate::model::{Dataset, DatasetId, Image, LabelCategory, ProjectId};
use crate::provider::{DatasetProvider, DatasetSnapshot, ImageFileProvider, Principal};

/// A project row in the snapshot.
#[derive(Clone, Debug, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    /// Username of the owning principal.
    pub owner: String,
    #[serde(default)]
    pub categories: Vec<LabelCategory>,
    #[serde(default)]
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Deserialize)]
struct Snapshot {
    projects: Vec<Project>,
}

/// In-memory store over a parsed snapshot file.
#[derive(Debug)]
pub struct SnapshotStore {
    projects: Vec<Project>,
    media_root: PathBuf,
}

impl SnapshotStore {
    /// Loads a snapshot from a JSON file.
    ///
    /// Relative image payload paths resolve against the snapshot's parent
    /// directory unless overridden with [`with_media_root`](Self::with_media_root).
    pub fn load(path: &Path) -> Result<Self, ExportError> {
        let data = fs::read_to_string(path)?;
        let snapshot: Snapshot =
            serde_json::from_str(&data).map_err(|source| ExportError::SnapshotParse {
                path: path.to_path_buf(),
                source,
            })?;

        let media_root = path.parent().unwrap_or(Path::new(".")).to_path_buf();
        let mut store = Self {
            projects: snapshot.projects,
            media_root,
        };
        store.probe_missing_dimensions()?;
        Ok(store)
    }

    /// Parses a snapshot from a JSON string, with an explicit media root.
    pub fn from_str(data: &str, media_root: impl Into<PathBuf>) -> Result<Self, ExportError> {
        let snapshot: Snapshot =
            serde_json::from_str(data).map_err(|source| ExportError::SnapshotParse {
                path: PathBuf::from("<inline>"),
                source,
            })?;

        let mut store = Self {
            projects: snapshot.projects,
            media_root: media_root.into(),
        };
        store.probe_missing_dimensions()?;
        Ok(store)
    }

    /// Overrides the directory image payload paths resolve against.
    pub fn with_media_root(mut self, media_root: impl Into<PathBuf>) -> Self {
        self.media_root = media_root.into();
        self
    }

    /// Projects in the snapshot, in stored order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Fills in zero dimensions from the image payload where one exists.
    ///
    /// Dimension decoding is delegated entirely to `imagesize`; images with
    /// zero dimensions and no payload are left as-is for the exporters to
    /// reject.
    fn probe_missing_dimensions(&mut self) -> Result<(), ExportError> {
        let media_root = self.media_root.clone();
        for project in &mut self.projects {
            for dataset in &mut project.datasets {
                for image in &mut dataset.images {
                    if image.width > 0 && image.height > 0 {
                        continue;
                    }
                    let Some(rel) = &image.file else { continue };
                    let path = media_root.join(rel);
                    let size = imagesize::size(&path).map_err(|e| ExportError::ImageProbe {
                        path: path.clone(),
                        message: e.to_string(),
                    })?;
                    image.width = size.width as u32;
                    image.height = size.height as u32;
                }
            }
        }
        Ok(())
    }
}

impl DatasetProvider for SnapshotStore {
    fn dataset_for_owner(
        &self,
        dataset_id: DatasetId,
        owner: &Principal,
    ) -> Option<DatasetSnapshot> {
        for project in &self.projects {
            if project.owner != owner.0 {
                continue;
            }
            if let Some(dataset) = project.datasets.iter().find(|d| d.id == dataset_id) {
                // Provider default ordering: name-ascending.
                let mut categories = project.categories.clone();
                categories.sort_by(|a, b| a.name.cmp(&b.name));
                return Some(DatasetSnapshot {
                    dataset: dataset.clone(),
                    categories,
                });
            }
        }
        None
    }
}

impl ImageFileProvider for SnapshotStore {
    fn resolve(&self, image: &Image) -> io::Result<PathBuf> {
        let rel = image.file.as_deref().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("image '{}' has no stored payload", image.file_name),
            )
        })?;
        Ok(self.media_root.join(rel))
    }
}
