//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Accumulating per-file digests and building duplicate groups
//! - Running the walk, hash and group pipeline over one root

pub mod finder;
pub mod groups;

pub use finder::{DuplicateFinder, FinderConfig, FinderError, ScanSummary};
pub use groups::{identical_file_count, DuplicateGroup, Grouper};
