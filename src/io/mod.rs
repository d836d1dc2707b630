//! PDF input/output.
//!
//! The page set and the exporter only talk to PDFs through the traits in
//! this module. [`LopdfBackend`] implements them on top of `lopdf`:
//!
//! - [`reader`]: open a source file and index its pages
//! - [`page`]: a page detached from its source, ready to be rotated and
//!   copied
//! - [`assembler`]: build the output document page by page
//! - [`writer`]: serialize the output atomically

pub mod assembler;
pub mod backend;
pub mod page;
pub mod reader;
pub mod writer;

pub use assembler::OutputDocument;
pub use backend::LopdfBackend;
pub use page::LopdfPage;
pub use reader::LopdfSource;
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};

use serde::Serialize;
use std::path::Path;

use crate::error::Result;
use crate::pageset::Rotation;

/// An opened source PDF.
pub trait SourceDocument {
    /// Path the source was opened from.
    fn path(&self) -> &Path;

    /// Number of pages in the source.
    fn page_count(&self) -> usize;
}

/// Preview geometry of a page with its rotation applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thumbnail {
    /// Preview width in pixels.
    pub width: u32,
    /// Preview height in pixels.
    pub height: u32,
    /// Rotation the preview was measured at.
    pub rotation: Rotation,
}

/// The PDF capabilities the core needs.
pub trait PdfBackend {
    /// An opened source document.
    type Source: SourceDocument;
    /// A page read from a source.
    type Page;
    /// A document being assembled.
    type Output;

    /// Open the source at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PdfDeckError::UnreadableSource`] if the file is
    /// missing or not a readable PDF.
    fn open_source(&self, path: &Path) -> Result<Self::Source>;

    /// Read page `index` of `source`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PdfDeckError::IndexOutOfRange`] if `index` is not
    /// below the source's page count.
    fn read_page(&self, source: &Self::Source, index: usize) -> Result<Self::Page>;

    /// Set the page's rotation to exactly `rotation`.
    fn set_absolute_rotation(&self, page: &mut Self::Page, rotation: Rotation);

    /// Start an empty output document.
    fn new_output(&self) -> Self::Output;

    /// Append `page` as the last page of `output`.
    fn append_page(&self, output: &mut Self::Output, page: Self::Page) -> Result<()>;

    /// Serialize `output` to `destination`.
    fn write_output(&self, output: Self::Output, destination: &Path) -> Result<WriteStatistics>;

    /// Preview geometry of `page` fitted into `max_width` x `max_height`.
    fn render_thumbnail(&self, page: &Self::Page, max_width: u32, max_height: u32)
    -> Result<Thumbnail>;
}
