//! Command-line interface definitions for dupsearch.
//!
//! # Example
//!
//! ```bash
//! # Report identical files under ~/Downloads
//! dupsearch ~/Downloads
//!
//! # JSON report for scripting
//! dupsearch ~/Downloads --output json
//!
//! # Skip unreadable entries instead of aborting
//! dupsearch -k /var/data
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::duplicates::FinderConfig;
use crate::scanner::WalkerConfig;

/// Find files with identical content under a directory tree.
///
/// Hidden entries, symbolic links and empty files are skipped. Files are
/// compared by SHA-256 digest of their full content.
#[derive(Debug, Parser)]
#[command(name = "dupsearch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory to scan
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Report format
    #[arg(
        short,
        long,
        value_enum,
        default_value_t = OutputFormat::Text,
        env = "DUPSEARCH_OUTPUT"
    )]
    pub output: OutputFormat,

    /// Skip unreadable entries and files instead of aborting the scan
    ///
    /// Skipped entries are excluded from every group and total, and the
    /// process exits with code 3.
    #[arg(short = 'k', long)]
    pub keep_going: bool,

    /// Print fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

impl Cli {
    /// Build the finder configuration for this invocation.
    #[must_use]
    pub fn finder_config(&self, shutdown_flag: Option<Arc<AtomicBool>>) -> FinderConfig {
        let mut config = FinderConfig::default()
            .with_keep_going(self.keep_going)
            .with_walker_config(WalkerConfig::default());
        if let Some(flag) = shutdown_flag {
            config = config.with_shutdown_flag(flag);
        }
        config
    }
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_root() {
        let cli = Cli::try_parse_from(["dupsearch", "/tmp/some"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/some")));
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert!(!cli.keep_going);
    }

    #[test]
    fn test_root_is_optional_at_parse_time() {
        let cli = Cli::try_parse_from(["dupsearch"]).unwrap();
        assert!(cli.root.is_none());
    }

    #[test]
    fn test_parse_flags() {
        let cli =
            Cli::try_parse_from(["dupsearch", "-vv", "-k", "--output", "json", "--json-errors", "."])
                .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.keep_going);
        assert!(cli.json_errors);
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["dupsearch", "-q", "-v", "."]).is_err());
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let err = Cli::try_parse_from(["dupsearch", "--bogus", "."]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_finder_config() {
        let cli = Cli::try_parse_from(["dupsearch", "-k", "."]).unwrap();
        let flag = Arc::new(AtomicBool::new(false));
        let config = cli.finder_config(Some(flag));

        assert!(config.keep_going);
        assert!(config.shutdown_flag.is_some());
        assert!(config.walker_config.skip_hidden);
        assert!(config.walker_config.skip_empty);
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Text.to_string(), "text");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
