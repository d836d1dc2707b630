//! Output formatting and display for pdfdeck.
//!
//! This module handles all user-facing output:
//! - Formatted status messages
//! - Session responses, as text or one JSON object per line
//! - Quiet and verbose modes
//!
//! # Examples
//!
//! ```no_run
//! use pdfdeck::config::Config;
//! use pdfdeck::output::{OutputFormatter, display_response};
//! use pdfdeck::session::Session;
//!
//! # fn example(config: Config) -> pdfdeck::Result<()> {
//! let formatter = OutputFormatter::from_config(&config);
//! let mut session = Session::new(&config);
//! display_response(&formatter, &session.execute_line("show")?);
//! # Ok(())
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::export::ExportStatistics;
use crate::pageset::{PageView, Snapshot, SnapshotEntry};
use crate::session::Response;
use crate::utils::format_file_size;

/// Display the result of one command.
pub fn display_response(formatter: &OutputFormatter, response: &Response) {
    if formatter.is_json() {
        formatter.json_line(response, response.is_failure());
        return;
    }

    match response {
        Response::View { view } => display_view(formatter, view),
        Response::Loaded {
            summary,
            sources,
            skipped,
            view,
        } => {
            for path in skipped {
                formatter.warning(&format!("Skipped {} (not a PDF)", path.display()));
            }
            formatter.info(&format!(
                "Loaded {} file(s): {} pages",
                summary.sources, summary.pages
            ));
            for source in sources {
                formatter.detail(&source.path.display().to_string(), &format!("{} pages", source.pages));
            }
            display_view(formatter, view);
        }
        Response::Listing { pages } => display_listing(formatter, pages),
        Response::Preview { view, thumbnail } => {
            display_view(formatter, view);
            if let Some(thumbnail) = thumbnail {
                formatter.info(&format!(
                    "Preview: {}x{} px at {}",
                    thumbnail.width, thumbnail.height, thumbnail.rotation
                ));
            }
        }
        Response::Exported {
            message,
            statistics,
        } => display_export_statistics(formatter, message, statistics),
        Response::Help { text } => formatter.info(text),
        Response::Failed { message } => formatter.error(message),
        Response::Quit => formatter.debug("Session ended"),
    }
}

/// Display the current page.
pub fn display_view(formatter: &OutputFormatter, view: &PageView) {
    formatter.info(&view.to_string());
}

/// Display every page of `pages` as a numbered list.
pub fn display_listing(formatter: &OutputFormatter, pages: &Snapshot) {
    if pages.is_empty() {
        formatter.info(&PageView::Empty.to_string());
        return;
    }

    formatter.section(&format!("Pages ({})", pages.len()));
    for (index, entry) in pages.iter().enumerate() {
        formatter.list_item(index + 1, &describe_entry(entry));
    }
}

/// Display export statistics to the user.
pub fn display_export_statistics(
    formatter: &OutputFormatter,
    message: &str,
    stats: &ExportStatistics,
) {
    formatter.success(message);
    formatter.detail("Destination", &stats.destination.display().to_string());
    formatter.detail("Pages", &stats.pages.to_string());
    formatter.detail("Sources read", &stats.sources.to_string());
    formatter.detail("Size", &format_file_size(stats.bytes));
    formatter.detail("Time", &format!("{:.2}s", stats.elapsed.as_secs_f64()));
}

/// One listing line, e.g. `File: a.pdf, Page: 2, Rotation: 90°`.
pub fn describe_entry(entry: &SnapshotEntry) -> String {
    format!(
        "File: {}, Page: {}, Rotation: {}",
        entry.file_name(),
        entry.source_index + 1,
        entry.rotation
    )
}
