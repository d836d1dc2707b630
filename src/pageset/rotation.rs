//! Page identity and rotation state.
//!
//! Rotation is keyed by where a page came from, not by where it currently
//! sits in the working list. Deleting or moving a page never touches its
//! rotation entry.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Identity of an original page: the source file plus its zero-based index
/// in that unedited file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PageKey {
    /// Path of the source document.
    pub source_path: PathBuf,
    /// Zero-based page number within the source.
    pub source_index: usize,
}

impl PageKey {
    /// Create a key for page `source_index` of `source_path`.
    pub fn new(source_path: impl Into<PathBuf>, source_index: usize) -> Self {
        Self {
            source_path: source_path.into(),
            source_index,
        }
    }

    /// File name of the source, falling back to the full path.
    pub fn file_name(&self) -> String {
        file_name_of(&self.source_path)
    }
}

pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Absolute page rotation in degrees, always within `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct Rotation(u16);

impl Rotation {
    /// No rotation.
    pub const NONE: Self = Self(0);

    /// Normalize any degree value into `[0, 360)`.
    ///
    /// ```
    /// use pdfdeck::pageset::Rotation;
    ///
    /// assert_eq!(Rotation::from_degrees(-90).degrees(), 270);
    /// assert_eq!(Rotation::from_degrees(720).degrees(), 0);
    /// ```
    pub fn from_degrees(degrees: i64) -> Self {
        Self(degrees.rem_euclid(360) as u16)
    }

    /// Rotation after turning by `delta` degrees (either sign).
    pub fn rotated_by(self, delta: i64) -> Self {
        // Reducing delta first keeps the sum far from i64 overflow.
        Self::from_degrees(i64::from(self.0) + delta % 360)
    }

    /// Degrees in `[0, 360)`.
    pub fn degrees(self) -> u16 {
        self.0
    }

    /// Whether width and height trade places at this rotation.
    pub fn swaps_axes(self) -> bool {
        (self.0 / 90) % 2 == 1
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// Rotation state for every original page that was loaded.
#[derive(Debug, Clone, Default)]
pub struct RotationTable {
    entries: HashMap<PageKey, Rotation>,
}

impl RotationTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page at 0°, keeping any existing entry.
    pub fn register(&mut self, key: PageKey) {
        self.entries.entry(key).or_insert(Rotation::NONE);
    }

    /// Rotation stored for `key`.
    pub fn get(&self, key: &PageKey) -> Option<Rotation> {
        self.entries.get(key).copied()
    }

    /// Turn the page by `delta` degrees and return the new rotation.
    ///
    /// Returns `None` if the key was never registered.
    pub fn rotate(&mut self, key: &PageKey, delta: i64) -> Option<Rotation> {
        let entry = self.entries.get_mut(key)?;
        *entry = entry.rotated_by(delta);
        Some(*entry)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of registered pages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
