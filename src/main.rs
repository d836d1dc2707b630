//! pdfdeck - arrange pages from several PDFs into a new one.

use clap::Parser;
use std::path::PathBuf;
use std::process;
use tokio::io::BufReader;

use pdfdeck::PdfDeckError;
use pdfdeck::cli::{Cli, RunSummary, run_commands};
use pdfdeck::output::{OutputFormatter, display_response};
use pdfdeck::session::Session;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(summary) if summary.failed > 0 => process::exit(1),
        Ok(_) => {}
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(err.exit_code());
        }
    }
}

/// Main application logic.
///
/// With `--script`, the returned summary decides the exit code. On stdin,
/// rejected commands are expected and do not count.
async fn run(cli: Cli) -> Result<RunSummary, PdfDeckError> {
    cli.validate()?;
    let config = cli.to_config()?;

    let formatter = OutputFormatter::from_config(&config);
    let mut session = Session::new(&config);

    if formatter.should_print() && !formatter.is_json() {
        formatter.section(&format!("{} v{}", pdfdeck::NAME, pdfdeck::VERSION));
        if config.script.is_none() {
            formatter.info("Type 'help' for a list of commands.");
        }
    }

    if !config.sources.is_empty() {
        let response = session.select(&config.sources)?;
        display_response(&formatter, &response);
    }

    match config.script {
        Some(ref path) => {
            let file = tokio::fs::File::open(path).await.map_err(|source| {
                PdfDeckError::FailedToReadScript {
                    path: path.clone(),
                    source,
                }
            })?;
            run_commands(&mut session, &formatter, BufReader::new(file), path.clone()).await
        }
        None => {
            let stdin = BufReader::new(tokio::io::stdin());
            run_commands(&mut session, &formatter, stdin, PathBuf::from("<stdin>"))
                .await
                .map(|summary| RunSummary { failed: 0, ..summary })
        }
    }
}
