//! Structured error handling and exit codes.

use serde::Serialize;

use crate::duplicates::FinderError;

/// Exit codes for the dupsearch application.
///
/// - 0: Success (scan completed, whether or not duplicates were found)
/// - 1: General error (missing root, walk/read/write failure)
/// - 2: Usage error (missing or invalid arguments)
/// - 3: Partial success (completed with entries skipped under `--keep-going`)
/// - 130: Interrupted by user (Ctrl+C)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: Scan completed.
    Success = 0,
    /// General error: A fatal error stopped the scan or the report.
    GeneralError = 1,
    /// Usage error: Arguments were missing or invalid.
    UsageError = 2,
    /// Partial success: Scan completed but some entries were skipped.
    PartialSuccess = 3,
    /// Interrupted: Scan was interrupted by user (Ctrl+C).
    Interrupted = 130,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DS000",
            Self::GeneralError => "DS001",
            Self::UsageError => "DS002",
            Self::PartialSuccess => "DS003",
            Self::Interrupted => "DS130",
        }
    }

    /// Pick the exit code for an error returned by [`crate::run_app`].
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        if matches!(err.downcast_ref::<AppError>(), Some(AppError::Usage)) {
            Self::UsageError
        } else if matches!(
            err.downcast_ref::<FinderError>(),
            Some(FinderError::Interrupted)
        ) {
            Self::Interrupted
        } else {
            Self::GeneralError
        }
    }
}

/// Application-level errors outside the scan pipeline.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// No root directory argument was supplied.
    #[error("No root directory specified.\nUsage: dupsearch <ROOT>")]
    Usage,

    /// The report could not be written.
    #[error("Failed to write report: {0}")]
    Write(#[source] std::io::Error),
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "DS001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
    /// Whether the operation was interrupted
    pub interrupted: bool,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: err.to_string(),
            interrupted: exit_code == ExitCode::Interrupted,
        }
    }
}
