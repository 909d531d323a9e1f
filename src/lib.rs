//! dupsearch - find files with identical content.
//!
//! Walks a directory tree, hashes every regular, non-hidden, non-empty file
//! with SHA-256, and reports each group of files sharing a digest.
//!
//! The pipeline is strictly forward and single-threaded:
//! [`scanner::Walker`] -> [`scanner::Hasher`] -> [`duplicates::Grouper`] ->
//! [`output`].

pub mod cli;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod scanner;
pub mod signal;

use std::io::{self, Write};

use anyhow::Result;

use crate::cli::{Cli, OutputFormat};
use crate::duplicates::DuplicateFinder;
use crate::error::{AppError, ExitCode};
use crate::output::json::JsonOutputError;
use crate::output::{JsonOutput, TextReport};

/// Run the application and write the report to stdout.
///
/// # Errors
///
/// See [`run_app_with_writer`].
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_app_with_writer(cli, &mut out)
}

/// Run the application, writing the report to `out`.
///
/// Nothing is written to `out` unless the scan completes.
///
/// # Errors
///
/// - [`AppError::Usage`] if no root was given
/// - [`duplicates::FinderError`] for a missing root, walk or read failure,
///   or interruption
/// - [`AppError::Write`] if the report cannot be written
pub fn run_app_with_writer<W: Write>(cli: Cli, out: &mut W) -> Result<ExitCode> {
    let root = cli.root.clone().ok_or(AppError::Usage)?;

    logging::init_logging(cli.verbose, cli.quiet);

    let handler = signal::install_handler()?;
    let finder = DuplicateFinder::new(cli.finder_config(Some(handler.get_flag())));
    let (groups, summary) = finder.find_duplicates(&root)?;

    let exit_code = if summary.is_partial() {
        ExitCode::PartialSuccess
    } else {
        ExitCode::Success
    };

    match cli.output {
        OutputFormat::Text => TextReport::new(&groups)
            .write_to(out)
            .map_err(AppError::Write)?,
        OutputFormat::Json => {
            JsonOutput::new(&groups, &summary, exit_code)
                .write_to(out)
                .map_err(|e| match e {
                    JsonOutputError::Io(io) => anyhow::Error::new(AppError::Write(io)),
                    other => anyhow::Error::new(other),
                })?
        }
    }

    if summary.is_partial() {
        eprintln!(
            "Warning: skipped {} unreadable entries; totals exclude them",
            summary.scan_errors.len()
        );
    }

    Ok(exit_code)
}
