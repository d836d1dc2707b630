//! An editing session: one [`PageSet`] driven by a stream of commands.
//!
//! Every command runs to completion before the next one is accepted. A
//! command that fails because of something the user did (a bad path, a
//! malformed order, a vanished source) produces [`Response::Failed`] and
//! leaves the page set exactly as it was. Only invariant breaches surface
//! as `Err`.
//!
//! # Examples
//!
//! ```no_run
//! use pdfdeck::config::Config;
//! use pdfdeck::session::{Response, Session};
//!
//! # fn example() -> pdfdeck::Result<()> {
//! let mut session = Session::new(&Config::default());
//! session.execute_line("select scans/*.pdf")?;
//! session.execute_line("rotate-right")?;
//! if let Response::Exported { statistics, .. } = session.execute_line("export merged")? {
//!     println!("{} pages", statistics.pages);
//! }
//! # Ok(())
//! # }
//! ```

pub mod command;

pub use command::{Command, HELP};

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::{Config, PreviewSize};
use crate::error::{PdfDeckError, Result};
use crate::export::{ExportStatistics, Exporter};
use crate::io::{LopdfBackend, PdfBackend, SourceDocument, Thumbnail, WriteOptions};
use crate::pageset::{LoadSummary, OrderSpec, PageSet, PageView, ReorderPolicy, Rotation, Snapshot};
use crate::utils::{collect_paths_for_patterns, is_pdf, same_file, with_pdf_extension};

/// Message shown after a successful export.
pub const EXPORT_SUCCESS: &str = "PDF saved successfully!";

/// A source that was loaded, for verbose output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedSource {
    /// Path of the source.
    pub path: PathBuf,
    /// Number of pages it contributed.
    pub pages: usize,
}

/// What a command produced.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Response {
    /// The current page after a navigation or edit.
    View {
        view: PageView,
    },
    /// New sources replaced the working list.
    Loaded {
        summary: LoadSummary,
        sources: Vec<LoadedSource>,
        /// Matched paths that were not PDFs.
        skipped: Vec<PathBuf>,
        view: PageView,
    },
    /// Every page with its rotation.
    Listing {
        pages: Snapshot,
    },
    /// Preview geometry of the current page.
    Preview {
        view: PageView,
        thumbnail: Option<Thumbnail>,
    },
    /// The working list was written out.
    Exported {
        message: &'static str,
        statistics: ExportStatistics,
    },
    /// Command summary.
    Help {
        text: &'static str,
    },
    /// The command was rejected; nothing changed.
    Failed {
        message: String,
    },
    /// The session is over.
    Quit,
}

/// Session state: the page set plus the settings commands need.
#[derive(Debug)]
pub struct Session<B: PdfBackend = LopdfBackend> {
    pages: PageSet,
    exporter: Exporter<B>,
    default_destination: Option<PathBuf>,
    reorder_policy: ReorderPolicy,
    preview_size: PreviewSize,
}

impl Session<LopdfBackend> {
    /// Create a session that reads and writes with `lopdf`.
    pub fn new(config: &Config) -> Self {
        let backend = LopdfBackend::with_write_options(WriteOptions {
            compression: config.compression,
            overwrite: config.overwrite_mode,
            ..Default::default()
        });
        Self::with_backend(backend, config)
    }
}

impl<B: PdfBackend> Session<B> {
    /// Create a session on top of `backend`.
    pub fn with_backend(backend: B, config: &Config) -> Self {
        Self {
            pages: PageSet::new(),
            exporter: Exporter::new(backend),
            default_destination: config.output.clone(),
            reorder_policy: config.reorder_policy,
            preview_size: config.preview_size,
        }
    }

    /// The page set being edited.
    pub fn pages(&self) -> &PageSet {
        &self.pages
    }

    /// Parse and run one command line.
    ///
    /// # Errors
    ///
    /// Only invariant breaches are returned as errors; see
    /// [`Session::execute`].
    pub fn execute_line(&mut self, line: &str) -> Result<Response> {
        match line.parse::<Command>() {
            Ok(command) => self.execute(command),
            Err(err) => Self::recover(err),
        }
    }

    /// Run one command.
    ///
    /// # Errors
    ///
    /// User errors become [`Response::Failed`]. Anything else, such as a
    /// page index past the end of its source, is returned.
    pub fn execute(&mut self, command: Command) -> Result<Response> {
        match self.apply(command) {
            Ok(response) => Ok(response),
            Err(err) => Self::recover(err),
        }
    }

    /// Load every page of `paths`, replacing the working list.
    ///
    /// Sources are all opened before the page set is touched, so one
    /// unreadable file leaves the previous list in place. Non-PDF paths are
    /// skipped; if nothing is left the call is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`PdfDeckError::UnreadableSource`] for the first source that
    /// cannot be opened.
    pub fn select(&mut self, paths: &[PathBuf]) -> Result<Response> {
        let (selected, skipped): (Vec<&PathBuf>, Vec<&PathBuf>) =
            paths.iter().partition(|path| is_pdf(path));
        let skipped = skipped.into_iter().cloned().collect();

        let sources = selected
            .iter()
            .map(|path| self.exporter.backend().open_source(path))
            .collect::<Result<Vec<_>>>()?;

        let Some(summary) = self.pages.load(&sources) else {
            return Ok(Response::View {
                view: self.pages.view(),
            });
        };

        Ok(Response::Loaded {
            summary,
            sources: sources
                .iter()
                .map(|source| LoadedSource {
                    path: source.path().to_path_buf(),
                    pages: source.page_count(),
                })
                .collect(),
            skipped,
            view: self.pages.view(),
        })
    }

    /// Write the current working list to `destination`, or to the
    /// configured default.
    ///
    /// # Errors
    ///
    /// Returns [`PdfDeckError::InvalidCommand`] when there is no destination
    /// or the destination is one of the sources, and passes export errors
    /// through.
    pub fn export(&self, destination: Option<&Path>) -> Result<ExportStatistics> {
        let destination = destination
            .or(self.default_destination.as_deref())
            .map(with_pdf_extension)
            .ok_or_else(|| {
                PdfDeckError::invalid_command("export", "no destination given and no --output set")
            })?;

        let snapshot = self.pages.snapshot();
        if snapshot
            .sources()
            .iter()
            .any(|source| same_file(source, &destination))
        {
            return Err(PdfDeckError::invalid_command(
                format!("export {}", destination.display()),
                "destination is one of the sources",
            ));
        }

        self.exporter.export(&snapshot, &destination)
    }

    fn apply(&mut self, command: Command) -> Result<Response> {
        let response = match command {
            Command::Select { patterns } => {
                let paths = collect_paths_for_patterns(&patterns)?;
                return self.select(&paths);
            }
            Command::Show => self.view(),
            Command::Prev => {
                self.pages.previous();
                self.view()
            }
            Command::Next => {
                self.pages.next();
                self.view()
            }
            Command::Delete => {
                self.pages.delete_current();
                self.view()
            }
            Command::Rotate { degrees } => {
                self.pages.rotate_current(degrees);
                self.view()
            }
            Command::Reorder { order } => {
                self.reorder(&order)?;
                self.view()
            }
            Command::Export { destination } => Response::Exported {
                message: EXPORT_SUCCESS,
                statistics: self.export(destination.as_deref())?,
            },
            Command::List => Response::Listing {
                pages: self.pages.snapshot(),
            },
            Command::Preview => Response::Preview {
                view: self.pages.view(),
                thumbnail: self.preview()?,
            },
            Command::Help => Response::Help { text: HELP },
            Command::Quit => Response::Quit,
        };

        Ok(response)
    }

    fn reorder(&mut self, order: &OrderSpec) -> Result<()> {
        self.pages.reorder(order, self.reorder_policy)
    }

    fn preview(&self) -> Result<Option<Thumbnail>> {
        let Some(cursor) = self.pages.cursor() else {
            return Ok(None);
        };

        let snapshot = self.pages.snapshot();
        let Some(entry) = snapshot.entries().get(cursor) else {
            return Ok(None);
        };

        let PreviewSize {
            max_width,
            max_height,
        } = self.preview_size;
        self.exporter
            .preview(entry, max_width, max_height)
            .map(Some)
    }

    fn view(&self) -> Response {
        Response::View {
            view: self.pages.view(),
        }
    }

    fn recover(err: PdfDeckError) -> Result<Response> {
        if err.is_user_error() {
            Ok(Response::Failed {
                message: err.to_string(),
            })
        } else {
            Err(err)
        }
    }
}

impl Response {
    /// Whether the command was rejected.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Rotation of the shown page, if the response shows one.
    pub fn rotation(&self) -> Option<Rotation> {
        match self {
            Self::View { view } | Self::Loaded { view, .. } | Self::Preview { view, .. } => {
                match view {
                    PageView::Page { rotation, .. } => Some(*rotation),
                    PageView::Empty => None,
                }
            }
            _ => None,
        }
    }
}
