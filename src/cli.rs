//! CLI argument parsing for pdfdeck.
//!
//! This module defines the command-line interface structure using `clap`,
//! turns it into a [`Config`], and feeds command lines from stdin or a
//! script into a [`Session`].
//!
//! # Examples
//!
//! ```no_run
//! use pdfdeck::cli::Cli;
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! println!("Starting with {} source(s)", cli.sources.len());
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::config::{CompressionLevel, Config, OverwriteMode, PreviewSize};
use crate::error::{PdfDeckError, Result};
use crate::io::PdfBackend;
use crate::output::{OutputFormatter, display_response};
use crate::pageset::ReorderPolicy;
use crate::session::{Response, Session};
use crate::utils::collect_paths_for_patterns;

/// Arrange pages from several PDFs into a new one.
///
/// pdfdeck loads the pages of the given PDFs into a working list, then
/// reads commands (one per line, from stdin or --script) to navigate,
/// rotate, delete and reorder pages, and to export the result.
#[derive(Parser, Debug)]
#[command(name = "pdfdeck")]
#[command(version)]
#[command(about = "Arrange pages from several PDFs into a new one", long_about = None)]
#[command(author)]
pub struct Cli {
    /// Source PDF files to load at start-up (in order)
    ///
    /// Glob patterns are expanded. The working list can be replaced later
    /// with the `select` command.
    ///
    /// Examples:
    ///   pdfdeck scan1.pdf scan2.pdf
    ///   pdfdeck 'chapters/*.pdf' -o book.pdf
    #[arg(value_name = "FILE")]
    pub sources: Vec<String>,

    /// Default export destination
    ///
    /// Used by `export` when no destination is given. `.pdf` is appended
    /// when the name has no extension.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Read commands from a file instead of stdin
    ///
    /// One command per line. Lines starting with '#' and blank lines are
    /// skipped.
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Verbose output - show per-source and export details
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print every response as one JSON object per line
    #[arg(long)]
    pub json: bool,

    /// Never overwrite an existing export destination
    #[arg(long)]
    pub no_clobber: bool,

    /// Compression level for exported PDFs
    ///
    /// - none: No compression
    /// - standard: Compress streams (default)
    /// - maximum: Compress streams and drop unreferenced objects
    #[arg(short, long, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,

    /// Require every page exactly once in `reorder`
    ///
    /// By default a reorder may repeat or drop pages as long as it names
    /// as many positions as there are pages.
    #[arg(long)]
    pub strict_reorder: bool,

    /// Bounding box for page previews, as WIDTHxHEIGHT
    #[arg(long, value_name = "SIZE", default_value = "400x600")]
    pub preview: String,
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// Source patterns are expanded here, so the config holds concrete
    /// paths.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Compression level or preview size is invalid
    /// - A source pattern is malformed
    /// - Configuration validation fails
    pub fn to_config(&self) -> Result<Config> {
        let compression = CompressionLevel::from_str(&self.compression)?;

        let preview_size = PreviewSize::parse(&self.preview)
            .map_err(|e| PdfDeckError::invalid_config(e.to_string()))?;

        let overwrite_mode = if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Force
        };

        let reorder_policy = if self.strict_reorder {
            ReorderPolicy::Strict
        } else {
            ReorderPolicy::Lenient
        };

        let config = Config {
            sources: collect_paths_for_patterns(&self.sources)?,
            output: self.output.clone(),
            script: self.script.clone(),
            verbose: self.verbose,
            quiet: self.quiet,
            json: self.json,
            overwrite_mode,
            compression,
            reorder_policy,
            preview_size,
        };

        config.validate().map_err(|e| {
            PdfDeckError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }

    /// Validate CLI arguments before processing.
    ///
    /// # Errors
    ///
    /// Returns an error if flags conflict or a value is malformed.
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            return Err(PdfDeckError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        if !["none", "standard", "maximum"].contains(&self.compression.as_str()) {
            return Err(PdfDeckError::invalid_config(format!(
                "Invalid compression level: {}",
                self.compression
            )));
        }

        PreviewSize::parse(&self.preview).map_err(|e| PdfDeckError::invalid_config(e.to_string()))?;

        Ok(())
    }
}

/// Counts of what a run of commands did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Commands executed, including failed ones.
    pub executed: usize,
    /// Commands that were rejected.
    pub failed: usize,
}

/// Read command lines from `reader` and execute them one at a time until
/// `quit` or end of input.
///
/// Blank lines and lines starting with '#' are skipped. Each response is
/// displayed before the next line is read.
///
/// # Errors
///
/// Returns [`PdfDeckError::FailedToReadScript`] if reading fails, or an
/// invariant breach reported by the session.
pub async fn run_commands<B, R>(
    session: &mut Session<B>,
    formatter: &OutputFormatter,
    reader: R,
    origin: PathBuf,
) -> Result<RunSummary>
where
    B: PdfBackend,
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut summary = RunSummary::default();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|source| PdfDeckError::FailedToReadScript {
            path: origin.clone(),
            source,
        })?
    {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        formatter.debug(&format!("> {line}"));
        let response = session.execute_line(line)?;
        summary.executed += 1;
        if response.is_failure() {
            summary.failed += 1;
        }

        display_response(formatter, &response);
        if matches!(response, Response::Quit) {
            break;
        }
    }

    Ok(summary)
}
