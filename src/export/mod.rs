//! Export of a snapshot to a new PDF.
//!
//! Pages are always read back from the source files on disk, never from
//! whatever was loaded when the sources were selected. Sources are opened
//! lazily and reused for the rest of one export; nothing is kept between
//! exports.
//!
//! # Examples
//!
//! ```no_run
//! use pdfdeck::export::Exporter;
//! use pdfdeck::io::LopdfBackend;
//! use pdfdeck::pageset::{Rotation, Snapshot, SnapshotEntry};
//! use std::path::Path;
//!
//! # fn example() -> pdfdeck::Result<()> {
//! let snapshot = Snapshot::new(vec![
//!     SnapshotEntry::new("a.pdf", 0, Rotation::from_degrees(90)),
//!     SnapshotEntry::new("b.pdf", 2, Rotation::NONE),
//! ]);
//! let stats = Exporter::new(LopdfBackend::new()).export(&snapshot, Path::new("out.pdf"))?;
//! println!("Wrote {} pages", stats.pages);
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{PdfDeckError, Result};
use crate::io::{PdfBackend, Thumbnail};
use crate::pageset::{Snapshot, SnapshotEntry};

/// Result of a successful export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportStatistics {
    /// Pages written.
    pub pages: usize,
    /// Distinct sources read.
    pub sources: usize,
    /// Size of the written file in bytes.
    pub bytes: u64,
    /// Wall time of the whole export.
    #[serde(serialize_with = "serialize_millis")]
    pub elapsed: Duration,
    /// Where the file was written.
    pub destination: PathBuf,
}

fn serialize_millis<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u128(duration.as_millis())
}

/// Writes snapshots out through a [`PdfBackend`].
#[derive(Debug, Clone, Default)]
pub struct Exporter<B> {
    backend: B,
}

impl<B: PdfBackend> Exporter<B> {
    /// Create an exporter on top of `backend`.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The backend in use.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Write the pages of `snapshot`, in order and with their stored
    /// rotation, to `destination`.
    ///
    /// An empty snapshot produces a document with no pages.
    ///
    /// # Errors
    ///
    /// Returns [`PdfDeckError::SourceUnavailable`] if a source can no longer
    /// be opened or no longer has the page asked for. Nothing is written in
    /// that case. Errors from writing the destination are passed through.
    pub fn export(&self, snapshot: &Snapshot, destination: &Path) -> Result<ExportStatistics> {
        let start = Instant::now();
        let mut handles: HashMap<&Path, B::Source> = HashMap::new();
        let mut output = self.backend.new_output();

        for entry in snapshot {
            let source = match handles.entry(entry.source_path.as_path()) {
                Entry::Occupied(slot) => slot.into_mut(),
                Entry::Vacant(slot) => slot.insert(self.open(&entry.source_path)?),
            };

            let mut page = self.read(source, entry)?;
            self.backend.set_absolute_rotation(&mut page, entry.rotation);
            self.backend.append_page(&mut output, page)?;
        }

        let sources = handles.len();
        drop(handles);

        let written = self.backend.write_output(output, destination)?;

        Ok(ExportStatistics {
            pages: snapshot.len(),
            sources,
            bytes: written.file_size,
            elapsed: start.elapsed(),
            destination: written.output_path,
        })
    }

    /// Preview geometry of one snapshot entry at its stored rotation.
    ///
    /// # Errors
    ///
    /// Same as [`Exporter::export`] for opening and reading the page.
    pub fn preview(
        &self,
        entry: &SnapshotEntry,
        max_width: u32,
        max_height: u32,
    ) -> Result<Thumbnail> {
        let source = self.open(&entry.source_path)?;
        let mut page = self.read(&source, entry)?;
        self.backend.set_absolute_rotation(&mut page, entry.rotation);
        self.backend.render_thumbnail(&page, max_width, max_height)
    }

    fn open(&self, path: &Path) -> Result<B::Source> {
        self.backend.open_source(path).map_err(|err| match err {
            PdfDeckError::UnreadableSource { path, reason } => {
                PdfDeckError::source_unavailable(path, reason)
            }
            other => other,
        })
    }

    // The file may have changed on disk since it was selected.
    fn read(&self, source: &B::Source, entry: &SnapshotEntry) -> Result<B::Page> {
        self.backend
            .read_page(source, entry.source_index)
            .map_err(|err| match err {
                PdfDeckError::IndexOutOfRange { .. } | PdfDeckError::Pdf(_) => {
                    PdfDeckError::source_unavailable(&entry.source_path, err.to_string())
                }
                other => other,
            })
    }
}
