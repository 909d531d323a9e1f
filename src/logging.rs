//! Logging setup on the `log` facade with the `env_logger` backend.
//!
//! Diagnostics always go to stderr so stdout carries nothing but the
//! duplicate report. The level comes from, in priority order:
//!
//! 1. `RUST_LOG`, if set
//! 2. `--quiet` (errors only)
//! 3. `-v` (debug) / `-vv` (trace)
//! 4. info
//!
//! ```rust,no_run
//! use dupsearch::logging::init_logging;
//!
//! init_logging(1, false);
//! log::debug!("visible with -v");
//! ```

use env_logger::{Builder, Target};
use log::LevelFilter;
use std::env;
use std::io::Write;

/// Initialize logging from the CLI verbosity flags.
///
/// Safe to call more than once; later calls leave the first logger in place.
pub fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();
    builder.target(Target::Stderr);

    let from_env = env::var_os("RUST_LOG").is_some();
    if from_env {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    let with_module = verbose >= 1;
    builder.format(move |buf, record| {
        let level_style = buf.default_level_style(record.level());
        if with_module {
            writeln!(
                buf,
                "{level_style}{:<5}{level_style:#} [{}] {}",
                record.level(),
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        } else {
            writeln!(
                buf,
                "{level_style}{:<5}{level_style:#} {}",
                record.level(),
                record.args()
            )
        }
    });

    if builder.try_init().is_ok() {
        log::debug!(
            "Logging initialized at level {} (RUST_LOG: {})",
            current_level_name(),
            from_env
        );
    }
}

/// Map CLI flags to a level filter. `quiet` wins over `verbose`.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Name of the current maximum log level.
pub fn current_level_name() -> &'static str {
    match log::max_level() {
        LevelFilter::Off => "off",
        LevelFilter::Error => "error",
        LevelFilter::Warn => "warn",
        LevelFilter::Info => "info",
        LevelFilter::Debug => "debug",
        LevelFilter::Trace => "trace",
    }
}
