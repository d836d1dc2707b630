//! Immutable description of the working list used to drive export.

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::rotation::{Rotation, file_name_of};

/// One page of the document to be exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotEntry {
    /// Path of the source document.
    pub source_path: PathBuf,
    /// Zero-based page number within the source.
    pub source_index: usize,
    /// Absolute rotation to set on the exported page.
    pub rotation: Rotation,
}

impl SnapshotEntry {
    /// Create an entry.
    pub fn new(source_path: impl Into<PathBuf>, source_index: usize, rotation: Rotation) -> Self {
        Self {
            source_path: source_path.into(),
            source_index,
            rotation,
        }
    }

    /// File name of the source, falling back to the full path.
    pub fn file_name(&self) -> String {
        file_name_of(&self.source_path)
    }
}

/// Ordered pages with the rotation each one carried when the snapshot was
/// taken.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: Vec<SnapshotEntry>,
}

impl Snapshot {
    /// Build a snapshot from entries in export order.
    pub fn new(entries: Vec<SnapshotEntry>) -> Self {
        Self { entries }
    }

    /// Entries in export order.
    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.entries
    }

    /// Iterate over entries in export order.
    pub fn iter(&self) -> std::slice::Iter<'_, SnapshotEntry> {
        self.entries.iter()
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot has no pages.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct source paths in order of first appearance.
    pub fn sources(&self) -> Vec<&Path> {
        let mut sources: Vec<&Path> = Vec::new();
        for entry in &self.entries {
            if !sources.contains(&entry.source_path.as_path()) {
                sources.push(&entry.source_path);
            }
        }
        sources
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a SnapshotEntry;
    type IntoIter = std::slice::Iter<'a, SnapshotEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
