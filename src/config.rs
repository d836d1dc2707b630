//! Configuration module for pdfdeck.
//!
//! Turns CLI arguments into a validated, normalized configuration that
//! drives a session:
//! - Sources loaded at start-up
//! - Where commands come from (stdin or a script)
//! - How exports are written (destination, compression, overwrite)
//! - How strictly reorder requests are checked
//! - How responses are printed

use anyhow::{Context, Result, bail};

use crate::PdfDeckError;
use crate::pageset::ReorderPolicy;
use std::{path::PathBuf, str::FromStr};

/// Compression level for the exported PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression - streams are written as read.
    None,
    /// Compress streams.
    #[default]
    Standard,
    /// Compress streams and drop unreferenced objects.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = PdfDeckError;

    /// Parse compression level from "none", "standard" or "maximum".
    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(PdfDeckError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

/// Destination overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Replace an existing destination (default).
    #[default]
    Force,
    /// Never overwrite, error if the destination exists.
    NoClobber,
}

/// Bounding box for page previews, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewSize {
    /// Maximum preview width.
    pub max_width: u32,
    /// Maximum preview height.
    pub max_height: u32,
}

impl Default for PreviewSize {
    fn default() -> Self {
        Self {
            max_width: 400,
            max_height: 600,
        }
    }
}

impl PreviewSize {
    /// Parse a `WIDTHxHEIGHT` string.
    ///
    /// ```
    /// use pdfdeck::config::PreviewSize;
    ///
    /// let size = PreviewSize::parse("200x300").unwrap();
    /// assert_eq!((size.max_width, size.max_height), (200, 300));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let Some((width, height)) = s.trim().split_once(['x', 'X']) else {
            bail!("Invalid preview size: {s}. Expected format like '400x600'");
        };

        let max_width: u32 = width
            .trim()
            .parse()
            .with_context(|| format!("Invalid preview width: {width}"))?;
        let max_height: u32 = height
            .trim()
            .parse()
            .with_context(|| format!("Invalid preview height: {height}"))?;

        if max_width == 0 || max_height == 0 {
            bail!("Preview dimensions must be positive");
        }

        Ok(Self {
            max_width,
            max_height,
        })
    }
}

/// Complete configuration for a pdfdeck session.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Sources to load at start-up (in order).
    pub sources: Vec<PathBuf>,

    /// Default export destination.
    pub output: Option<PathBuf>,

    /// Command script; stdin is read when unset.
    pub script: Option<PathBuf>,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Print responses as JSON lines.
    pub json: bool,

    /// Destination overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Compression level for exports.
    pub compression: CompressionLevel,

    /// Reorder validation policy.
    pub reorder_policy: ReorderPolicy,

    /// Preview bounding box.
    pub preview_size: PreviewSize,
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Verbose and quiet modes are both enabled
    /// - A preview dimension is zero
    /// - The default destination is also a source
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if self.preview_size.max_width == 0 || self.preview_size.max_height == 0 {
            bail!("Preview dimensions must be positive");
        }

        if let Some(ref output) = self.output
            && self.sources.contains(output)
        {
            bail!(
                "Output file cannot be the same as a source file: {}",
                output.display()
            );
        }

        Ok(())
    }

    /// Whether informational output should be displayed.
    pub fn should_print(&self) -> bool {
        !self.quiet
    }
}
