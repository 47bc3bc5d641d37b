//! Per-call category indexing.
//!
//! Interchange formats replace the store's opaque category identifiers with
//! small integers. The assignment is built fresh for every export call from
//! the provider-ordered category list and is never persisted: the same
//! category may receive a different index in a later export.

use std::collections::BTreeMap;

use crate::model::{CategoryId, LabelCategory};

/// An ordered mapping from store category ids to format-specific indices.
#[derive(Clone, Debug)]
pub struct CategoryIndex {
    by_id: BTreeMap<CategoryId, u32>,
    /// `(index, name)` pairs in index order.
    entries: Vec<(u32, String)>,
}

impl CategoryIndex {
    /// Builds a COCO index: ids start at 1, assigned in input order.
    pub fn coco(categories: &[LabelCategory]) -> Self {
        Self::with_base(categories, 1)
    }

    /// Builds a YOLO index: class ids start at 0, assigned in input order.
    pub fn yolo(categories: &[LabelCategory]) -> Self {
        Self::with_base(categories, 0)
    }

    fn with_base(categories: &[LabelCategory], base: u32) -> Self {
        let mut by_id = BTreeMap::new();
        let mut entries = Vec::with_capacity(categories.len());

        for (offset, category) in categories.iter().enumerate() {
            let index = base + offset as u32;
            by_id.insert(category.id, index);
            entries.push((index, category.name.clone()));
        }

        Self { by_id, entries }
    }

    /// Looks up the index assigned to a category.
    ///
    /// `None` means the annotation references a category outside the
    /// project's set; callers must treat that as a data inconsistency, not
    /// substitute a default.
    pub fn get(&self, category_id: CategoryId) -> Option<u32> {
        self.by_id.get(&category_id).copied()
    }

    /// Number of categories indexed (includes unreferenced categories).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no categories were indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(index, name)` pairs in index order.
    pub fn entries(&self) -> impl Iterator<Item = (u32, &str)> {
        self.entries.iter().map(|(idx, name)| (*idx, name.as_str()))
    }

    /// Iterates category names in index order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, name)| name.as_str())
    }
}
