//! Scanner module for directory traversal and file hashing.
//!
//! This module provides functionality for:
//! - Depth-first directory walking using walkdir
//! - Content hashing with SHA-256
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and candidate discovery
//! - [`hasher`]: SHA-256 file hashing (streaming)
//!
//! # Example
//!
//! ```no_run
//! use dupsearch::scanner::{Hasher, Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), WalkerConfig::default());
//! let hasher = Hasher::new();
//! for entry in walker.walk() {
//!     let file = entry.expect("walk failed");
//!     let hash = hasher.full_hash(&file.path).expect("read failed");
//!     println!("{}  {}", dupsearch::scanner::hash_to_hex(&hash), file.path.display());
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::path::PathBuf;

// Re-export main types
pub use hasher::{hash_to_hex, Hash, Hasher, HASH_BUFFER_SIZE};
pub use walker::Walker;

/// A file that passed every walker filter and is eligible for hashing.
///
/// Regular, non-hidden, non-empty and not a symbolic link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    /// Path to the file as produced by the walk (root joined with relative path)
    pub path: PathBuf,
    /// File size in bytes observed during the walk
    pub size: u64,
}

impl FileCandidate {
    /// Create a new candidate.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

/// Configuration for directory walking.
///
/// The defaults are the only filtering rules the CLI exposes: hidden
/// entries, symbolic links and empty files are all skipped.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Skip hidden files and directories (names starting with `.`).
    /// A hidden directory is not descended into.
    pub skip_hidden: bool,

    /// Skip zero-length files.
    pub skip_empty: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            skip_hidden: true,
            skip_empty: true,
        }
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An entry vanished between being listed and being inspected.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// A filesystem loop was detected below the root.
    #[error("Filesystem loop detected at {0}")]
    Loop(PathBuf),

    /// An I/O error occurred while accessing a file or directory.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A candidate could not be read for hashing.
    #[error(transparent)]
    Hash(#[from] HashError),
}

impl ScanError {
    /// Path of the entry that caused the error, if known.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::PermissionDenied(p) | Self::NotFound(p) | Self::Loop(p) => Some(p),
            Self::Io { path, .. } => Some(path),
            Self::Hash(e) => e.path(),
        }
    }
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Hashing stopped because shutdown was requested.
    #[error("Hashing interrupted")]
    Interrupted,
}

impl HashError {
    /// Path of the file that failed, if known.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) => Some(p),
            Self::Io { path, .. } => Some(path),
            Self::Interrupted => None,
        }
    }
}
