//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for depth-first traversal of a
//! directory tree, yielding every [`FileCandidate`] eligible for hashing.
//!
//! # Filtering
//!
//! Rules are applied per entry, in this order:
//!
//! 1. Hidden entries (name starts with `.`) are dropped. A hidden directory
//!    is not descended into. The root itself is never considered hidden.
//! 2. Directories are descended into but never yielded.
//! 3. Symbolic links are dropped, judged by the entry's own file type. Links
//!    are never followed.
//! 4. Anything else that is not a regular file (fifos, sockets, devices) is
//!    dropped.
//! 5. Zero-length files are dropped.
//!
//! Per-entry errors are yielded as [`ScanError`] values; whether they abort
//! the scan is the caller's decision.
//!
//! # Example
//!
//! ```no_run
//! use dupsearch::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), WalkerConfig::default());
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use walkdir::{DirEntry, WalkDir};

use super::{FileCandidate, ScanError, WalkerConfig};

/// Directory walker for candidate discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
    /// Optional shutdown flag for graceful termination
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - Root directory to scan
    /// * `config` - Walker configuration options
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
            shutdown_flag: None,
        }
    }

    /// Set the shutdown flag for graceful termination.
    ///
    /// When the flag is set to `true`, the walker stops yielding entries.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Check if shutdown has been requested.
    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Walk the directory tree, yielding file candidates.
    ///
    /// The sequence is lazy: each entry is inspected only when the iterator
    /// is advanced. Iteration ends early once shutdown is requested.
    ///
    /// ```no_run
    /// use dupsearch::scanner::{Walker, WalkerConfig};
    /// use std::path::Path;
    ///
    /// let walker = Walker::new(Path::new("."), WalkerConfig::default());
    /// let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();
    /// println!("Found {} files", files.len());
    /// ```
    pub fn walk(&self) -> impl Iterator<Item = Result<FileCandidate, ScanError>> + '_ {
        let skip_hidden = self.config.skip_hidden;

        WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(move |entry| {
                if skip_hidden && entry.depth() > 0 && is_hidden(entry.file_name()) {
                    log::trace!("Skipping hidden entry: {}", entry.path().display());
                    return false;
                }
                true
            })
            .take_while(move |_| {
                if self.is_shutdown_requested() {
                    log::debug!("Walker: Shutdown requested, stopping iteration");
                    return false;
                }
                true
            })
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => self.process_entry(&entry),
                Err(e) => Some(Err(self.handle_walk_error(e))),
            })
    }

    /// Apply the file filters to one entry.
    fn process_entry(&self, entry: &DirEntry) -> Option<Result<FileCandidate, ScanError>> {
        let path = entry.path();
        let file_type = entry.file_type();

        if file_type.is_dir() {
            return None;
        }

        if file_type.is_symlink() {
            log::trace!("Skipping symlink: {}", path.display());
            return None;
        }

        if !file_type.is_file() {
            log::trace!("Skipping special file: {}", path.display());
            return None;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => return Some(Err(self.handle_walk_error(e))),
        };

        let size = metadata.len();
        if size == 0 && self.config.skip_empty {
            log::trace!("Skipping empty file: {}", path.display());
            return None;
        }

        Some(Ok(FileCandidate::new(path.to_path_buf(), size)))
    }

    /// Convert a walkdir error into a [`ScanError`].
    fn handle_walk_error(&self, error: walkdir::Error) -> ScanError {
        use std::io::ErrorKind;

        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);

        if error.loop_ancestor().is_some() {
            return ScanError::Loop(path);
        }

        let message = error.to_string();
        match error.into_io_error() {
            Some(io) => match io.kind() {
                ErrorKind::PermissionDenied => ScanError::PermissionDenied(path),
                ErrorKind::NotFound => ScanError::NotFound(path),
                _ => ScanError::Io { path, source: io },
            },
            None => ScanError::Io {
                path,
                source: std::io::Error::other(message),
            },
        }
    }
}

/// Hidden means the base name starts with a dot.
fn is_hidden(name: &OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.')
}
