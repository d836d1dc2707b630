//! pdfdeck - arrange pages from several PDFs into a new one.
//!
//! Pages of one or more source PDFs are loaded into a working list. The
//! list can be navigated, pages rotated, deleted and reordered, and the
//! result exported as a new PDF. Source files are never modified.
//!
//! # Architecture
//!
//! - [`pageset`]: the working list, rotation state and cursor
//! - [`export`]: writing a snapshot of the working list to a new PDF
//! - [`io`]: the PDF backend, implemented with `lopdf`
//! - [`session`]: command parsing and dispatch around one page set
//! - [`cli`], [`config`], [`output`]: the command-line front end
//! - [`error`]: error types
//!
//! # Examples
//!
//! ```no_run
//! use pdfdeck::config::Config;
//! use pdfdeck::session::Session;
//!
//! # fn example() -> pdfdeck::Result<()> {
//! let mut session = Session::new(&Config::default());
//! session.execute_line("select a.pdf b.pdf")?;
//! session.execute_line("reorder 3,1,2")?;
//! session.execute_line("export merged.pdf")?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod io;
pub mod output;
pub mod pageset;
pub mod session;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{PdfDeckError, Result};
pub use export::{ExportStatistics, Exporter};
pub use pageset::{PageSet, Rotation, Snapshot, SnapshotEntry};
pub use session::{Command, Response, Session};

/// Version of pdfdeck.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the application.
pub const NAME: &str = env!("CARGO_PKG_NAME");
