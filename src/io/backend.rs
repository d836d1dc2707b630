//! The `lopdf` implementation of [`PdfBackend`].

use std::path::Path;

use super::{
    LopdfPage, LopdfSource, OutputDocument, PdfBackend, PdfWriter, Thumbnail, WriteOptions,
    WriteStatistics,
};
use crate::error::Result;
use crate::pageset::Rotation;

/// Reads, assembles and writes PDFs with `lopdf`.
#[derive(Debug, Clone, Default)]
pub struct LopdfBackend {
    writer: PdfWriter,
}

impl LopdfBackend {
    /// Create a backend with default write options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that writes with `options`.
    pub fn with_write_options(options: WriteOptions) -> Self {
        Self {
            writer: PdfWriter::with_options(options),
        }
    }

    /// Options used when writing the output.
    pub fn write_options(&self) -> &WriteOptions {
        self.writer.options()
    }
}

impl PdfBackend for LopdfBackend {
    type Source = LopdfSource;
    type Page = LopdfPage;
    type Output = OutputDocument;

    fn open_source(&self, path: &Path) -> Result<Self::Source> {
        LopdfSource::open(path)
    }

    fn read_page(&self, source: &Self::Source, index: usize) -> Result<Self::Page> {
        LopdfPage::read(source, index)
    }

    fn set_absolute_rotation(&self, page: &mut Self::Page, rotation: Rotation) {
        page.set_rotation(rotation);
    }

    fn new_output(&self) -> Self::Output {
        OutputDocument::new()
    }

    fn append_page(&self, output: &mut Self::Output, page: Self::Page) -> Result<()> {
        output.append(&page);
        Ok(())
    }

    fn write_output(&self, output: Self::Output, destination: &Path) -> Result<WriteStatistics> {
        self.writer.save(output.finish(), destination)
    }

    fn render_thumbnail(
        &self,
        page: &Self::Page,
        max_width: u32,
        max_height: u32,
    ) -> Result<Thumbnail> {
        Ok(page.thumbnail(max_width, max_height))
    }
}
