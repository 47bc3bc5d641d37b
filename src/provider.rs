//! Collaborator contracts the export engine depends on.
//!
//! The engine never queries the relational store directly: a
//! [`DatasetProvider`] hands it a consistent read snapshot of one dataset
//! (with the parent project's categories), and an [`ImageFileProvider`]
//! resolves stored image payloads. Both are read-only; the engine holds no
//! state across calls.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::model::{Dataset, DatasetId, Image, LabelCategory};

/// The identity of the caller requesting an export.
///
/// Authorization is delegated to the provider: the engine only ever exports
/// datasets the provider attributes to this principal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Principal(pub String);

impl Principal {
    /// Creates a principal from a username.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One dataset together with its parent project's label categories.
///
/// Categories arrive in the provider's default ordering (name-ascending)
/// and include categories with no annotations; the exporters index every
/// one of them.
#[derive(Clone, Debug)]
pub struct DatasetSnapshot {
    pub dataset: Dataset,
    pub categories: Vec<LabelCategory>,
}

/// Supplies dataset snapshots scoped to an owning principal.
pub trait DatasetProvider {
    /// Resolves a dataset by id for the given principal.
    ///
    /// Returns `None` when the dataset does not exist or does not belong to
    /// a project owned by the principal; the two cases are indistinguishable
    /// to the caller.
    fn dataset_for_owner(&self, dataset_id: DatasetId, owner: &Principal)
        -> Option<DatasetSnapshot>;
}

/// Resolves stored image payloads to readable filesystem paths.
pub trait ImageFileProvider {
    /// Returns the on-disk location of an image's stored payload.
    ///
    /// May fail independently of the image's metadata (missing file,
    /// permission error); callers treat a failure as recoverable per image.
    fn resolve(&self, image: &Image) -> io::Result<PathBuf>;
}
