//! Digest grouping and duplicate group construction.
//!
//! # Overview
//!
//! The [`Grouper`] accumulates one digest per hashed path in two owned maps:
//!
//! - `path -> digest`, answering *which* files match
//! - `digest -> count`, answering *how many* files share a digest
//!
//! Once every file is recorded, [`Grouper::into_groups`] inverts the first
//! map for each digest whose count exceeds one.
//!
//! # Example
//!
//! ```
//! use dupsearch::duplicates::Grouper;
//! use std::path::PathBuf;
//!
//! let mut grouper = Grouper::new();
//! grouper.record(PathBuf::from("/a"), [1u8; 32]);
//! grouper.record(PathBuf::from("/b"), [1u8; 32]);
//! grouper.record(PathBuf::from("/c"), [2u8; 32]);
//!
//! let groups = grouper.into_groups();
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].len(), 2);
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use crate::scanner::Hash;

/// All paths sharing one content digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// SHA-256 digest shared by every file in the group
    pub hash: Hash,
    /// Paths of the identical files, sorted lexicographically
    pub paths: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Create a new duplicate group.
    #[must_use]
    pub fn new(hash: Hash, paths: Vec<PathBuf>) -> Self {
        Self { hash, paths }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Hash as hexadecimal string.
    #[must_use]
    pub fn hash_hex(&self) -> String {
        crate::scanner::hash_to_hex(&self.hash)
    }
}

/// Accumulator for `(path, digest)` records.
#[derive(Debug, Default)]
pub struct Grouper {
    digests: HashMap<PathBuf, Hash>,
    counts: HashMap<Hash, usize>,
}

impl Grouper {
    /// Create an empty grouper.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the digest of one file.
    ///
    /// Recording the same path twice replaces the earlier digest; the counts
    /// are adjusted so each path is counted once.
    pub fn record(&mut self, path: PathBuf, hash: Hash) {
        if let Some(previous) = self.digests.insert(path, hash) {
            if let Some(count) = self.counts.get_mut(&previous) {
                *count -= 1;
                if *count == 0 {
                    self.counts.remove(&previous);
                }
            }
        }
        *self.counts.entry(hash).or_insert(0) += 1;
    }

    /// Number of distinct paths recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.digests.len()
    }

    /// Check if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }

    /// How many recorded files share a digest.
    #[must_use]
    pub fn count_of(&self, hash: &Hash) -> usize {
        self.counts.get(hash).copied().unwrap_or(0)
    }

    /// Build the duplicate groups (digests with more than one file).
    ///
    /// Groups are sorted by digest and paths within a group are sorted, so
    /// the result is deterministic for a given set of records.
    #[must_use]
    pub fn into_groups(self) -> Vec<DuplicateGroup> {
        let Self { digests, counts } = self;

        let mut members: HashMap<Hash, Vec<PathBuf>> = counts
            .into_iter()
            .filter(|&(_, count)| count > 1)
            .map(|(hash, count)| (hash, Vec::with_capacity(count)))
            .collect();

        for (path, hash) in digests {
            if let Some(paths) = members.get_mut(&hash) {
                paths.push(path);
            }
        }

        let mut groups: Vec<DuplicateGroup> = members
            .into_iter()
            .map(|(hash, mut paths)| {
                paths.sort();
                DuplicateGroup::new(hash, paths)
            })
            .collect();
        groups.sort_by(|a, b| a.hash.cmp(&b.hash));
        groups
    }
}

/// Total number of files taking part in any duplicate group.
///
/// A file in a group of three contributes three, not one.
#[must_use]
pub fn identical_file_count(groups: &[DuplicateGroup]) -> usize {
    groups.iter().map(DuplicateGroup::len).sum()
}
