//! The working document: an ordered list of page references into source
//! PDFs, their rotation state, and the cursor of the page being shown.
//!
//! A [`PageSet`] is either *empty* (no pages, cursor inactive) or
//! *populated*. Loading non-empty sources is the only way in, deleting the
//! last page the only way out. Navigation and rotation on an empty set are
//! no-ops rather than errors.
//!
//! # Examples
//!
//! ```
//! use pdfdeck::io::SourceDocument;
//! use pdfdeck::pageset::{OrderSpec, PageSet, ReorderPolicy};
//! use std::path::{Path, PathBuf};
//!
//! struct Stub(PathBuf, usize);
//!
//! impl SourceDocument for Stub {
//!     fn path(&self) -> &Path { &self.0 }
//!     fn page_count(&self) -> usize { self.1 }
//! }
//!
//! let mut pages = PageSet::new();
//! pages.load(&[Stub("a.pdf".into(), 2), Stub("b.pdf".into(), 1)]);
//! pages.rotate_current(-90);
//! pages.reorder(&OrderSpec::parse("3,1,2").unwrap(), ReorderPolicy::Lenient).unwrap();
//!
//! let snapshot = pages.snapshot();
//! assert_eq!(snapshot.len(), 3);
//! assert_eq!(snapshot.entries()[1].rotation.degrees(), 270);
//! ```

mod order;
mod rotation;
mod snapshot;

pub use order::{OrderSpec, ReorderPolicy};
pub use rotation::{PageKey, Rotation, RotationTable};
pub use snapshot::{Snapshot, SnapshotEntry};

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::error::Result;
use crate::io::SourceDocument;

/// A page in the working list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PageRef {
    key: PageKey,
}

impl PageRef {
    /// Reference page `source_index` of `source_path`.
    pub fn new(source_path: impl Into<PathBuf>, source_index: usize) -> Self {
        Self {
            key: PageKey::new(source_path, source_index),
        }
    }

    /// Identity of the original page.
    pub fn key(&self) -> &PageKey {
        &self.key
    }

    /// Path of the source document.
    pub fn source_path(&self) -> &std::path::Path {
        &self.key.source_path
    }

    /// Zero-based page number in the source.
    pub fn source_index(&self) -> usize {
        self.key.source_index
    }
}

/// What a load did, for refreshing the display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    /// Number of sources read.
    pub sources: usize,
    /// Number of pages now in the working list.
    pub pages: usize,
}

/// Display state of the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PageView {
    /// Nothing loaded, or every page deleted.
    Empty,
    /// A page is being shown.
    Page {
        /// 1-based position in the working list.
        position: usize,
        /// Number of pages in the working list.
        total: usize,
        /// File name of the source.
        file_name: String,
        /// 1-based page number within the source.
        source_page: usize,
        /// Current rotation.
        rotation: Rotation,
    },
}

impl fmt::Display for PageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "No pages to display"),
            Self::Page {
                position,
                total,
                file_name,
                source_page,
                rotation,
            } => write!(
                f,
                "[{position}/{total}] File: {file_name}, Page: {source_page}, Rotation: {rotation}"
            ),
        }
    }
}

/// The document under construction.
#[derive(Debug, Clone, Default)]
pub struct PageSet {
    pages: Vec<PageRef>,
    rotations: RotationTable,
    cursor: Option<usize>,
}

impl PageSet {
    /// Create an empty page set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the working list with every page of `sources`, in order.
    ///
    /// Returns `None` and leaves the set untouched when `sources` is empty.
    /// Sources with zero pages contribute nothing.
    pub fn load<S: SourceDocument>(&mut self, sources: &[S]) -> Option<LoadSummary> {
        if sources.is_empty() {
            return None;
        }

        self.pages.clear();
        self.rotations.clear();

        for source in sources {
            for index in 0..source.page_count() {
                let page = PageRef::new(source.path(), index);
                self.rotations.register(page.key().clone());
                self.pages.push(page);
            }
        }

        self.cursor = if self.pages.is_empty() { None } else { Some(0) };

        Some(LoadSummary {
            sources: sources.len(),
            pages: self.pages.len(),
        })
    }

    /// The page under the cursor.
    pub fn current_page(&self) -> Option<&PageRef> {
        self.cursor.and_then(|cursor| self.pages.get(cursor))
    }

    /// Cursor position, `None` when empty.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Number of pages in the working list.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the working list is empty.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Pages in display order.
    pub fn pages(&self) -> &[PageRef] {
        &self.pages
    }

    /// Rotation stored for `key`.
    pub fn rotation_of(&self, key: &PageKey) -> Option<Rotation> {
        self.rotations.get(key)
    }

    /// Move the cursor one step back (`-1`) or forward (`+1`), staying in
    /// bounds. Returns whether the cursor moved.
    pub fn move_cursor(&mut self, delta: isize) -> bool {
        let Some(cursor) = self.cursor else {
            return false;
        };

        let last = self.pages.len() - 1;
        let target = cursor.saturating_add_signed(delta.signum()).min(last);
        self.cursor = Some(target);
        target != cursor
    }

    /// Move to the previous page.
    pub fn previous(&mut self) -> bool {
        self.move_cursor(-1)
    }

    /// Move to the next page.
    pub fn next(&mut self) -> bool {
        self.move_cursor(1)
    }

    /// Remove the page under the cursor and return it.
    ///
    /// The page's rotation entry is kept. The cursor stays at the same
    /// position, or moves to the new last page.
    pub fn delete_current(&mut self) -> Option<PageRef> {
        let cursor = self.cursor?;
        let removed = self.pages.remove(cursor);

        self.cursor = match self.pages.len() {
            0 => None,
            len => Some(cursor.min(len - 1)),
        };

        Some(removed)
    }

    /// Turn the current page by `delta_degrees` and return its new rotation.
    pub fn rotate_current(&mut self, delta_degrees: i64) -> Option<Rotation> {
        let key = self.current_page()?.key().clone();
        self.rotations.rotate(&key, delta_degrees)
    }

    /// Re-sequence the working list.
    ///
    /// On success the list becomes `[old[p - 1] for p in order]` and the
    /// cursor returns to the first page. On failure nothing changes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PdfDeckError::InvalidOrder`] when `order` does not
    /// fit the current list under `policy`.
    pub fn reorder(&mut self, order: &OrderSpec, policy: ReorderPolicy) -> Result<()> {
        order.validate(self.pages.len(), policy)?;

        self.pages = order
            .positions()
            .iter()
            .map(|&position| self.pages[position - 1].clone())
            .collect();
        self.cursor = if self.pages.is_empty() { None } else { Some(0) };

        Ok(())
    }

    /// Pages and their rotations as they are right now.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.pages
                .iter()
                .map(|page| {
                    SnapshotEntry::new(
                        page.source_path(),
                        page.source_index(),
                        self.rotations.get(page.key()).unwrap_or_default(),
                    )
                })
                .collect(),
        )
    }

    /// Display state of the current page.
    pub fn view(&self) -> PageView {
        match (self.cursor, self.current_page()) {
            (Some(cursor), Some(page)) => PageView::Page {
                position: cursor + 1,
                total: self.pages.len(),
                file_name: page.key().file_name(),
                source_page: page.source_index() + 1,
                rotation: self.rotations.get(page.key()).unwrap_or_default(),
            },
            _ => PageView::Empty,
        }
    }
}
