//! Duplicate finder: the Walker -> Hasher -> Grouper pipeline.
//!
//! # Overview
//!
//! [`DuplicateFinder::find_duplicates`] validates the root, walks it, hashes
//! every candidate in walk order on the calling thread, and groups the
//! results. Data only flows forward; grouping starts once the walk and all
//! hashing have finished.
//!
//! By default any walk or read error aborts the scan so a partially hashed
//! tree never produces a report. With [`FinderConfig::with_keep_going`] the
//! failing entry is skipped, logged, and recorded in
//! [`ScanSummary::scan_errors`].
//!
//! # Example
//!
//! ```no_run
//! use dupsearch::duplicates::DuplicateFinder;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (groups, summary) = finder.find_duplicates(Path::new(".")).unwrap();
//! println!("{} groups, {} identical files", groups.len(), summary.identical_files);
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::groups::{identical_file_count, DuplicateGroup, Grouper};
use crate::scanner::{hash_to_hex, FileCandidate, HashError, Hasher, ScanError, Walker, WalkerConfig};

/// Configuration for the duplicate finder.
#[derive(Debug, Clone, Default)]
pub struct FinderConfig {
    /// Skip unreadable entries instead of aborting the scan.
    pub keep_going: bool,
    /// Walker configuration for directory traversal.
    pub walker_config: WalkerConfig,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
}

impl FinderConfig {
    /// Skip unreadable entries instead of aborting.
    #[must_use]
    pub fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// Summary statistics from a duplicate scan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Number of files hashed
    pub files_hashed: usize,
    /// Total bytes of all hashed files (as observed during the walk)
    pub bytes_hashed: u64,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Sum of group sizes over all duplicate groups
    pub identical_files: usize,
    /// Duration of the entire scan
    pub scan_duration: Duration,
    /// Entries skipped under keep-going
    pub scan_errors: Vec<ScanError>,
}

impl ScanSummary {
    /// Whether any entry was skipped.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.scan_errors.is_empty()
    }
}

/// Errors that can occur during duplicate finding.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The scan was interrupted by user (Ctrl+C or shutdown signal).
    #[error("Scan interrupted by user")]
    Interrupted,

    /// The provided root does not exist.
    #[error("No such directory: {0}")]
    PathNotFound(PathBuf),

    /// Traversal could not continue.
    #[error("Walk failed: {0}")]
    Walk(#[source] ScanError),

    /// A candidate file could not be read for hashing.
    #[error("Read failed: {0}")]
    Read(#[source] HashError),
}

/// Orchestrates one scan of one root directory.
#[derive(Debug)]
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let mut hasher = Hasher::new();
        if let Some(ref flag) = config.shutdown_flag {
            hasher = hasher.with_shutdown_flag(flag.clone());
        }
        Self { config, hasher }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Find all groups of identical files under `root`.
    ///
    /// # Errors
    ///
    /// - [`FinderError::PathNotFound`] before any traversal if `root` does
    ///   not exist
    /// - [`FinderError::Walk`] / [`FinderError::Read`] on the first walk or
    ///   read failure, unless keep-going is enabled
    /// - [`FinderError::Interrupted`] if shutdown was requested
    pub fn find_duplicates(
        &self,
        root: &Path,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        let start_time = Instant::now();
        let mut summary = ScanSummary::default();

        // Follows a root symlink, so a dangling link counts as missing. Other
        // stat failures surface from the walk itself.
        if let Err(e) = std::fs::metadata(root) {
            if e.kind() == std::io::ErrorKind::NotFound {
                return Err(FinderError::PathNotFound(root.to_path_buf()));
            }
        }

        log::info!("Starting duplicate scan of {}", root.display());

        if self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }

        let mut walker = Walker::new(root, self.config.walker_config.clone());
        if let Some(ref flag) = self.config.shutdown_flag {
            walker = walker.with_shutdown_flag(flag.clone());
        }

        let grouper = self.hash_candidates(walker.walk(), &mut summary)?;

        // The walker stops silently on shutdown; surface it here
        if self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }

        log::info!(
            "Hashed {} files ({} bytes), {} distinct paths recorded",
            summary.files_hashed,
            summary.bytes_hashed,
            grouper.len()
        );

        let groups = grouper.into_groups();
        summary.duplicate_groups = groups.len();
        summary.identical_files = identical_file_count(&groups);
        summary.scan_duration = start_time.elapsed();

        log::info!(
            "Scan complete: {} duplicate groups, {} identical files in {:?}",
            summary.duplicate_groups,
            summary.identical_files,
            summary.scan_duration
        );

        Ok((groups, summary))
    }

    /// Hash each walked candidate in order and record it.
    fn hash_candidates<I>(
        &self,
        candidates: I,
        summary: &mut ScanSummary,
    ) -> Result<Grouper, FinderError>
    where
        I: IntoIterator<Item = Result<FileCandidate, ScanError>>,
    {
        let mut grouper = Grouper::new();

        for result in candidates {
            let candidate = match result {
                Ok(candidate) => candidate,
                Err(e) => {
                    self.handle_error(e, summary)?;
                    continue;
                }
            };

            match self.hasher.full_hash(&candidate.path) {
                Ok(hash) => {
                    summary.files_hashed += 1;
                    summary.bytes_hashed += candidate.size;
                    grouper.record(candidate.path, hash);
                    if grouper.count_of(&hash) == 2 {
                        log::debug!("Digest {} seen twice", hash_to_hex(&hash));
                    }
                }
                Err(HashError::Interrupted) => return Err(FinderError::Interrupted),
                Err(e) => self.handle_error(ScanError::Hash(e), summary)?,
            }
        }

        Ok(grouper)
    }

    /// Abort on the error, or record it and continue under keep-going.
    fn handle_error(&self, error: ScanError, summary: &mut ScanSummary) -> Result<(), FinderError> {
        if !self.config.keep_going {
            return Err(match error {
                ScanError::Hash(e) => FinderError::Read(e),
                other => FinderError::Walk(other),
            });
        }
        log::warn!("Skipping unreadable entry: {}", error);
        summary.scan_errors.push(error);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");

        let err = DuplicateFinder::with_defaults()
            .find_duplicates(&missing)
            .unwrap_err();

        assert!(matches!(err, FinderError::PathNotFound(p) if p == missing));
    }

    #[test]
    fn test_summary_counts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a"), b"hello").unwrap();
        fs::write(dir.path().join("b"), b"hello").unwrap();
        fs::write(dir.path().join("c"), b"world").unwrap();

        let (groups, summary) = DuplicateFinder::with_defaults()
            .find_duplicates(dir.path())
            .unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(summary.files_hashed, 3);
        assert_eq!(summary.bytes_hashed, 15);
        assert_eq!(summary.duplicate_groups, 1);
        assert_eq!(summary.identical_files, 2);
        assert!(!summary.is_partial());
    }

    #[test]
    fn test_interrupted_before_start() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a"), b"x").unwrap();

        let config = FinderConfig::default().with_shutdown_flag(Arc::new(AtomicBool::new(true)));
        let err = DuplicateFinder::new(config)
            .find_duplicates(dir.path())
            .unwrap_err();

        assert!(matches!(err, FinderError::Interrupted));
    }

    #[test]
    fn test_error_display() {
        let err = FinderError::PathNotFound(PathBuf::from("/nope"));
        assert_eq!(err.to_string(), "No such directory: /nope");

        let err = FinderError::Read(HashError::NotFound(PathBuf::from("/f")));
        assert_eq!(err.to_string(), "Read failed: File not found: /f");
    }

    /// A walk failure, a vanished file, and two readable duplicates.
    fn mixed_candidates(dir: &TempDir) -> Vec<Result<FileCandidate, ScanError>> {
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::write(&a, b"dup").unwrap();
        fs::write(&b, b"dup").unwrap();
        vec![
            Err(ScanError::PermissionDenied(dir.path().join("locked"))),
            Ok(FileCandidate::new(a, 3)),
            Ok(FileCandidate::new(dir.path().join("vanished"), 3)),
            Ok(FileCandidate::new(b, 3)),
        ]
    }

    #[test]
    fn test_walk_error_is_fatal_by_default() {
        let dir = TempDir::new().unwrap();
        let mut summary = ScanSummary::default();

        let err = DuplicateFinder::with_defaults()
            .hash_candidates(mixed_candidates(&dir), &mut summary)
            .unwrap_err();

        assert!(matches!(err, FinderError::Walk(ScanError::PermissionDenied(_))));
        assert_eq!(summary.files_hashed, 0);
    }

    #[test]
    fn test_read_error_is_fatal_by_default() {
        let dir = TempDir::new().unwrap();
        let mut candidates = mixed_candidates(&dir);
        candidates.remove(0);
        let mut summary = ScanSummary::default();

        let err = DuplicateFinder::with_defaults()
            .hash_candidates(candidates, &mut summary)
            .unwrap_err();

        let vanished = dir.path().join("vanished");
        assert!(matches!(err, FinderError::Read(HashError::NotFound(p)) if p == vanished));
        assert_eq!(summary.files_hashed, 1);
    }

    #[test]
    fn test_keep_going_records_skipped_entries() {
        let dir = TempDir::new().unwrap();
        let mut summary = ScanSummary::default();
        let finder = DuplicateFinder::new(FinderConfig::default().with_keep_going(true));

        let grouper = finder
            .hash_candidates(mixed_candidates(&dir), &mut summary)
            .unwrap();

        assert!(summary.is_partial());
        assert_eq!(summary.scan_errors.len(), 2);
        assert!(matches!(summary.scan_errors[0], ScanError::PermissionDenied(_)));
        assert!(matches!(summary.scan_errors[1], ScanError::Hash(HashError::NotFound(_))));
        assert_eq!(summary.files_hashed, 2);
        assert_eq!(summary.bytes_hashed, 6);

        let groups = grouper.into_groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].paths, vec![dir.path().join("a"), dir.path().join("b")]);
    }
}
