//! Error types for pdfdeck.
//!
//! Errors fall into two groups:
//!
//! - **User errors**: an unreadable source, a malformed reorder request, a
//!   source that vanished or changed before export, an unwritable
//!   destination. These are caught at the command boundary and shown to the
//!   user; the page set is left untouched.
//! - **Invariant breaches**: [`PdfDeckError::IndexOutOfRange`] from a backend
//!   called directly means a page reference points past the end of a source
//!   it was built from. The exporter reports a source that shrank on disk as
//!   [`PdfDeckError::SourceUnavailable`] instead.

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfdeck operations.
pub type Result<T> = std::result::Result<T, PdfDeckError>;

/// Main error type for pdfdeck operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfDeckError {
    /// A selected source file could not be opened or parsed.
    #[error("Cannot read PDF: {}\n  Reason: {reason}", .path.display())]
    UnreadableSource {
        /// Path to the source file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// A page index past the end of its source document.
    #[error(
        "Page index {index} is out of range for {} ({page_count} page(s))",
        .path.display()
    )]
    IndexOutOfRange {
        /// Path to the source file.
        path: PathBuf,
        /// Zero-based page index that was requested.
        index: usize,
        /// Number of pages the source actually has.
        page_count: usize,
    },

    /// Reorder input is malformed or out of range.
    #[error("Invalid order '{input}': {reason}\n  Please enter a valid order of pages.")]
    InvalidOrder {
        /// The order as the user supplied it.
        input: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A source referenced by a snapshot can no longer be read.
    #[error(
        "Source is no longer available: {}\n  Reason: {reason}",
        .path.display()
    )]
    SourceUnavailable {
        /// Path to the missing source.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// The destination could not be written.
    #[error("Failed to write output file: {}\n  Reason: {source}", .path.display())]
    Io {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Destination exists and overwriting is disabled.
    #[error(
        "Output file already exists: {}\n  Remove --no-clobber or choose a different destination",
        .path.display()
    )]
    OutputExists {
        /// Path to the existing file.
        path: PathBuf,
    },

    /// A command line could not be understood.
    #[error("Invalid command '{line}': {reason}")]
    InvalidCommand {
        /// The offending line.
        line: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// Failed to read a command script.
    #[error("Failed to read command script: {}\n  Reason: {source}", .path.display())]
    FailedToReadScript {
        /// Path to the script.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Structural error reported by the PDF library.
    #[error("PDF structure error: {0}")]
    Pdf(#[from] lopdf::Error),
}

impl PdfDeckError {
    /// Create an UnreadableSource error.
    pub fn unreadable_source(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::UnreadableSource {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidOrder error.
    pub fn invalid_order(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOrder {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a SourceUnavailable error.
    pub fn source_unavailable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an Io error for a destination path.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an InvalidCommand error.
    pub fn invalid_command(line: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCommand {
            line: line.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Check if this error is a user error that the command boundary reports
    /// without aborting the session.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::UnreadableSource { .. }
                | Self::InvalidOrder { .. }
                | Self::SourceUnavailable { .. }
                | Self::Io { .. }
                | Self::OutputExists { .. }
                | Self::InvalidCommand { .. }
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnreadableSource { .. } => 3,
            Self::IndexOutOfRange { .. } => 70,
            Self::InvalidOrder { .. } => 1,
            Self::SourceUnavailable { .. } => 3,
            Self::Io { .. } => 5,
            Self::OutputExists { .. } => 4,
            Self::InvalidCommand { .. } => 1,
            Self::InvalidConfig { .. } => 1,
            Self::FailedToReadScript { .. } => 2,
            Self::Pdf(_) => 6,
        }
    }
}
