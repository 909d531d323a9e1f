//! JSON output formatter for duplicate scan results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "groups": [
//!     {
//!       "digest": "2cf24dba...",
//!       "count": 2,
//!       "files": ["dir/a.txt", "dir/b.txt"]
//!     }
//!   ],
//!   "summary": {
//!     "files_hashed": 3,
//!     "bytes_hashed": 15,
//!     "duplicate_groups": 1,
//!     "identical_files": 2,
//!     "skipped_entries": 0,
//!     "skipped": [],
//!     "scan_duration_ms": 1,
//!     "exit_code": 0,
//!     "exit_code_name": "DS000"
//!   }
//! }
//! ```
//!
//! Paths are reported exactly as the walk produced them, matching the text
//! report.

use std::io::Write;

use serde::Serialize;

use crate::duplicates::{DuplicateGroup, ScanSummary};
use crate::error::ExitCode;

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// SHA-256 digest as hexadecimal string (64 characters)
    pub digest: String,
    /// Number of identical files
    pub count: usize,
    /// Paths of all identical files
    pub files: Vec<String>,
}

impl JsonDuplicateGroup {
    /// Create a JSON duplicate group from a DuplicateGroup.
    #[must_use]
    pub fn from_duplicate_group(group: &DuplicateGroup) -> Self {
        Self {
            digest: group.hash_hex(),
            count: group.len(),
            files: group
                .paths
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Number of files hashed
    pub files_hashed: usize,
    /// Total bytes hashed
    pub bytes_hashed: u64,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Sum of all group sizes (the text report's total)
    pub identical_files: usize,
    /// Number of entries skipped under keep-going
    pub skipped_entries: usize,
    /// Messages for every skipped entry
    pub skipped: Vec<String>,
    /// Duration of the scan in milliseconds
    pub scan_duration_ms: u64,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "DS000")
    pub exit_code_name: String,
}

impl JsonSummary {
    /// Create a JSON summary from a ScanSummary and an exit code.
    #[must_use]
    pub fn from_scan_summary(summary: &ScanSummary, exit_code: ExitCode) -> Self {
        Self {
            files_hashed: summary.files_hashed,
            bytes_hashed: summary.bytes_hashed,
            duplicate_groups: summary.duplicate_groups,
            identical_files: summary.identical_files,
            skipped_entries: summary.scan_errors.len(),
            skipped: summary.scan_errors.iter().map(ToString::to_string).collect(),
            scan_duration_ms: summary.scan_duration.as_millis() as u64,
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix().to_string(),
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// List of duplicate groups
    pub groups: Vec<JsonDuplicateGroup>,
    /// Scan summary statistics
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Create a new JSON output from duplicate groups, summary and exit code.
    ///
    /// ```
    /// use dupsearch::duplicates::{DuplicateGroup, ScanSummary};
    /// use dupsearch::error::ExitCode;
    /// use dupsearch::output::JsonOutput;
    /// use std::path::PathBuf;
    ///
    /// let groups = vec![DuplicateGroup::new(
    ///     [0u8; 32],
    ///     vec![PathBuf::from("/file1.txt"), PathBuf::from("/file2.txt")],
    /// )];
    /// let output = JsonOutput::new(&groups, &ScanSummary::default(), ExitCode::Success);
    /// assert_eq!(output.groups.len(), 1);
    /// assert_eq!(output.groups[0].count, 2);
    /// ```
    #[must_use]
    pub fn new(groups: &[DuplicateGroup], summary: &ScanSummary, exit_code: ExitCode) -> Self {
        Self {
            groups: groups
                .iter()
                .map(JsonDuplicateGroup::from_duplicate_group)
                .collect(),
            summary: JsonSummary::from_scan_summary(summary, exit_code),
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty-printed JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), JsonOutputError> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{HashError, ScanError};
    use std::path::PathBuf;
    use std::time::Duration;

    fn create_test_groups() -> Vec<DuplicateGroup> {
        vec![
            DuplicateGroup::new([1; 32], vec![PathBuf::from("a"), PathBuf::from("b")]),
            DuplicateGroup::new(
                [2; 32],
                vec![PathBuf::from("c"), PathBuf::from("d"), PathBuf::from("e")],
            ),
        ]
    }

    #[test]
    fn test_json_output_empty() {
        let output = JsonOutput::new(&[], &ScanSummary::default(), ExitCode::Success);
        assert!(output.groups.is_empty());
        assert_eq!(output.summary.identical_files, 0);
        assert_eq!(output.summary.exit_code_name, "DS000");
    }

    #[test]
    fn test_json_output_with_groups() {
        let groups = create_test_groups();
        let summary = ScanSummary {
            files_hashed: 6,
            duplicate_groups: 2,
            identical_files: 5,
            scan_duration: Duration::from_millis(1234),
            ..Default::default()
        };
        let output = JsonOutput::new(&groups, &summary, ExitCode::Success);

        assert_eq!(output.groups.len(), 2);
        assert_eq!(output.groups[1].count, 3);
        assert_eq!(output.groups[0].digest, "01".repeat(32));
        assert_eq!(output.summary.identical_files, 5);
        assert_eq!(output.summary.scan_duration_ms, 1234);
    }

    #[test]
    fn test_json_is_valid() {
        let groups = create_test_groups();
        let summary = ScanSummary {
            scan_errors: vec![ScanError::Hash(HashError::PermissionDenied(PathBuf::from(
                "locked",
            )))],
            ..Default::default()
        };
        let output = JsonOutput::new(&groups, &summary, ExitCode::PartialSuccess);

        let mut buf = Vec::new();
        output.write_to(&mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["groups"][0]["files"][1], "b");
        assert_eq!(value["summary"]["skipped_entries"], 1);
        assert_eq!(value["summary"]["skipped"][0], "Permission denied: locked");
        assert_eq!(value["summary"]["exit_code"], 3);
    }

    #[test]
    fn test_to_json_compact() {
        let output = JsonOutput::new(&[], &ScanSummary::default(), ExitCode::Success);
        let json = output.to_json().unwrap();

        assert!(!json.contains('\n'));
        assert!(json.starts_with('{'));
        assert!(json.ends_with('}'));
    }

    #[test]
    fn test_to_json_pretty() {
        let output = JsonOutput::new(&[], &ScanSummary::default(), ExitCode::Success);
        let json = output.to_json_pretty().unwrap();

        assert!(json.contains('\n'));
    }
}
