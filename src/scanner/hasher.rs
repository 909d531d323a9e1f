//! SHA-256 file hasher with streaming support.
//!
//! # Overview
//!
//! This module provides the [`Hasher`] struct for computing SHA-256 digests
//! of whole file contents. Files are streamed through a fixed-size buffer,
//! so memory use does not grow with file size. Every byte of the file is
//! hashed; there is no prefix or size short-circuit.
//!
//! # Example
//!
//! ```no_run
//! use dupsearch::scanner::{hash_to_hex, Hasher};
//! use std::path::Path;
//!
//! let hasher = Hasher::new();
//! let hash = hasher.full_hash(Path::new("Cargo.toml")).unwrap();
//! println!("{}", hash_to_hex(&hash));
//! ```

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use sha2::{Digest, Sha256};

use super::HashError;

/// Read buffer size for streaming hash computation (64 KiB).
pub const HASH_BUFFER_SIZE: usize = 64 * 1024;

/// A SHA-256 content digest.
pub type Hash = [u8; 32];

/// Streaming SHA-256 file hasher.
#[derive(Debug, Clone, Default)]
pub struct Hasher {
    /// Optional shutdown flag, checked between read chunks
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Hasher {
    /// Create a new hasher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
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

    /// Hash the complete content of a file.
    ///
    /// The file handle is closed before this function returns, on success
    /// and on every error path.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read, or
    /// [`HashError::Interrupted`] if shutdown was requested mid-read.
    pub fn full_hash(&self, path: &Path) -> Result<Hash, HashError> {
        let file = File::open(path).map_err(|e| map_io_error(path, e))?;
        let hash = self.hash_reader(file).map_err(|e| match e {
            ReadFailure::Io(e) => map_io_error(path, e),
            ReadFailure::Interrupted => HashError::Interrupted,
        })?;

        log::trace!("{}  {}", hash_to_hex(&hash), path.display());
        Ok(hash)
    }

    /// Hash an in-memory byte slice.
    #[must_use]
    pub fn hash_bytes(&self, data: &[u8]) -> Hash {
        Sha256::digest(data).into()
    }

    fn hash_reader<R: Read>(&self, mut reader: R) -> Result<Hash, ReadFailure> {
        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; HASH_BUFFER_SIZE];

        loop {
            if self.is_shutdown_requested() {
                return Err(ReadFailure::Interrupted);
            }
            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(ReadFailure::Io(e)),
            };
            hasher.update(&buffer[..n]);
        }

        Ok(hasher.finalize().into())
    }
}

enum ReadFailure {
    Io(io::Error),
    Interrupted,
}

fn map_io_error(path: &Path, error: io::Error) -> HashError {
    match error.kind() {
        io::ErrorKind::NotFound => HashError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => HashError::PermissionDenied(path.to_path_buf()),
        _ => HashError::Io {
            path: path.to_path_buf(),
            source: error,
        },
    }
}

/// Convert a hash to a lowercase hexadecimal string (64 characters).
#[must_use]
pub fn hash_to_hex(hash: &Hash) -> String {
    hash.iter().map(|b| format!("{:02x}", b)).collect()
}
