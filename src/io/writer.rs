//! Writing the assembled PDF to disk.
//!
//! Writes are atomic by default: the document is serialized to a temporary
//! sibling file which is renamed over the destination only once everything
//! was written. A failed export never leaves a partial destination behind.
//!
//! # Examples
//!
//! ```no_run
//! use pdfdeck::io::{OutputDocument, PdfWriter};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! let stats = writer.save(OutputDocument::new().finish(), Path::new("empty.pdf"))?;
//! println!("Wrote {} bytes", stats.file_size);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::{CompressionLevel, OverwriteMode};
use crate::error::{PdfDeckError, Result};

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Write to a temporary file, then rename.
    pub atomic: bool,

    /// Compression applied before writing.
    pub compression: CompressionLevel,

    /// What to do when the destination exists.
    pub overwrite: OverwriteMode,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            compression: CompressionLevel::Standard,
            overwrite: OverwriteMode::Force,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,

    /// Compression that was applied.
    pub compression: CompressionLevel,
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// The writer's options.
    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    /// Serialize `doc` to `path`.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The destination exists and overwriting is disabled
    /// - The destination or its directory cannot be created
    /// - Serialization or the final rename fails
    pub fn save(&self, mut doc: Document, path: &Path) -> Result<WriteStatistics> {
        let start = Instant::now();

        if self.options.overwrite == OverwriteMode::NoClobber && path.exists() {
            return Err(PdfDeckError::OutputExists {
                path: path.to_path_buf(),
            });
        }

        match self.options.compression {
            CompressionLevel::None => {}
            CompressionLevel::Standard => doc.compress(),
            CompressionLevel::Maximum => {
                doc.prune_objects();
                doc.compress();
            }
        }
        doc.renumber_objects();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| PdfDeckError::io(parent, e))?;
        }

        let write_path = if self.options.atomic {
            temp_path_for(path)
        } else {
            path.to_path_buf()
        };

        if let Err(err) = self.write_to(&mut doc, &write_path) {
            if self.options.atomic {
                let _ = std::fs::remove_file(&write_path);
            }
            return Err(err);
        }

        if self.options.atomic {
            std::fs::rename(&write_path, path).map_err(|e| {
                let _ = std::fs::remove_file(&write_path);
                PdfDeckError::io(path, e)
            })?;
        }

        let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

        Ok(WriteStatistics {
            write_time: start.elapsed(),
            file_size,
            output_path: path.to_path_buf(),
            compression: self.options.compression,
        })
    }

    fn write_to(&self, doc: &mut Document, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path).map_err(|e| PdfDeckError::io(path, e))?;
        let mut writer = std::io::BufWriter::with_capacity(self.options.buffer_size, file);

        doc.save_to(&mut writer)
            .map_err(|e| PdfDeckError::io(path, std::io::Error::other(e)))?;

        writer.flush().map_err(|e| PdfDeckError::io(path, e))
    }
}

/// `out.pdf` -> `out.pdf.tmp`, next to the destination.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".tmp");
    path.with_file_name(name)
}
