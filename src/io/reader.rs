//! Opening source PDFs.
//!
//! # Examples
//!
//! ```no_run
//! use pdfdeck::io::{LopdfSource, SourceDocument};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = LopdfSource::open(Path::new("scan.pdf"))?;
//! println!("{} has {} pages", source.path().display(), source.page_count());
//! # Ok(())
//! # }
//! ```

use lopdf::{Document, ObjectId};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::SourceDocument;
use crate::error::{PdfDeckError, Result};

/// A source PDF loaded into memory.
#[derive(Debug, Clone)]
pub struct LopdfSource {
    path: PathBuf,
    document: Arc<Document>,
    page_ids: Vec<ObjectId>,
}

impl LopdfSource {
    /// Load the PDF at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfDeckError::UnreadableSource`] if:
    /// - The file does not exist or is a directory
    /// - The file is not a valid PDF
    /// - The PDF is encrypted
    pub fn open(path: &Path) -> Result<Self> {
        if path.is_dir() {
            return Err(PdfDeckError::unreadable_source(path, "Not a file"));
        }

        let document = Document::load(path).map_err(|e| {
            let err_msg = e.to_string();
            if err_msg.contains("encrypt") || err_msg.contains("password") {
                PdfDeckError::unreadable_source(
                    path,
                    "PDF is encrypted; decrypt it first (e.g. 'qpdf --decrypt')",
                )
            } else {
                PdfDeckError::unreadable_source(path, err_msg)
            }
        })?;

        let page_ids = document.get_pages().into_values().collect();

        Ok(Self {
            path: path.to_path_buf(),
            document: Arc::new(document),
            page_ids,
        })
    }

    /// The parsed document.
    pub fn document(&self) -> &Arc<Document> {
        &self.document
    }

    /// Object id of page `index`, if it exists.
    pub fn page_id(&self, index: usize) -> Option<ObjectId> {
        self.page_ids.get(index).copied()
    }
}

impl SourceDocument for LopdfSource {
    fn path(&self) -> &Path {
        &self.path
    }

    fn page_count(&self) -> usize {
        self.page_ids.len()
    }
}

/// Open every path in order, stopping at the first unreadable one.
pub fn open_all(paths: &[PathBuf]) -> Result<Vec<LopdfSource>> {
    paths.iter().map(|path| LopdfSource::open(path)).collect()
}
