//! Parsing of one command line.

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{PdfDeckError, Result};
use crate::pageset::OrderSpec;

/// One step of an editing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the working list with the pages of these paths or globs.
    Select {
        patterns: Vec<String>,
    },
    /// Show the current page.
    Show,
    /// Step back one page.
    Prev,
    /// Step forward one page.
    Next,
    /// Delete the current page.
    Delete,
    /// Turn the current page by a number of degrees.
    Rotate {
        degrees: i64,
    },
    /// Re-sequence the working list.
    Reorder {
        order: OrderSpec,
    },
    /// Write the working list, to the configured destination when none is
    /// given.
    Export {
        destination: Option<PathBuf>,
    },
    /// Print every page with its rotation.
    List,
    /// Preview geometry of the current page.
    Preview,
    /// Print the command summary.
    Help,
    /// End the session.
    Quit,
}

/// Summary printed by `help`.
pub const HELP: &str = "\
Commands:
  select <path|glob>...   load the pages of these PDFs, replacing the current list
  show                    show the current page
  prev | next             move to the previous or next page
  delete                  remove the current page
  rotate <degrees>        turn the current page (e.g. 90, -90, 180)
  rotate-left             turn the current page by -90
  rotate-right            turn the current page by +90
  reorder <n,n,...>       new page order by 1-based position (e.g. 3,1,2)
  export [destination]    write the pages to a new PDF
  list                    print every page with its rotation
  preview                 show the preview size of the current page
  help                    show this message
  quit                    end the session";

impl FromStr for Command {
    type Err = PdfDeckError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let no_arguments = |command: Command| {
            if rest.is_empty() {
                Ok(command)
            } else {
                Err(PdfDeckError::invalid_command(
                    line,
                    format!("'{name}' takes no arguments"),
                ))
            }
        };

        match name.to_lowercase().as_str() {
            "select" | "open" => {
                let patterns: Vec<String> = rest.split_whitespace().map(str::to_string).collect();
                if patterns.is_empty() {
                    return Err(PdfDeckError::invalid_command(
                        line,
                        "expected at least one path",
                    ));
                }
                Ok(Self::Select { patterns })
            }
            "show" => no_arguments(Self::Show),
            "prev" | "previous" => no_arguments(Self::Prev),
            "next" => no_arguments(Self::Next),
            "delete" => no_arguments(Self::Delete),
            "rotate" => {
                let degrees = rest.parse::<i64>().map_err(|_| {
                    PdfDeckError::invalid_command(line, "expected a number of degrees")
                })?;
                Ok(Self::Rotate { degrees })
            }
            "rotate-left" => no_arguments(Self::Rotate { degrees: -90 }),
            "rotate-right" => no_arguments(Self::Rotate { degrees: 90 }),
            "reorder" if rest.is_empty() => Ok(Self::Reorder {
                order: OrderSpec::from_positions(Vec::new()),
            }),
            "reorder" => Ok(Self::Reorder {
                order: OrderSpec::parse(rest)?,
            }),
            "export" | "save" => Ok(Self::Export {
                destination: (!rest.is_empty()).then(|| PathBuf::from(rest)),
            }),
            "list" => no_arguments(Self::List),
            "preview" => no_arguments(Self::Preview),
            "help" | "?" => no_arguments(Self::Help),
            "quit" | "exit" => no_arguments(Self::Quit),
            "" => Err(PdfDeckError::invalid_command(line, "empty command")),
            other => Err(PdfDeckError::invalid_command(
                line,
                format!("unknown command '{other}', try 'help'"),
            )),
        }
    }
}
