//! Output formatters for duplicate scan results.
//!
//! - [`text`]: the human-readable report
//! - [`json`]: machine-readable report for scripting
//!
//! # Example
//!
//! ```no_run
//! use dupsearch::duplicates::DuplicateFinder;
//! use dupsearch::output::TextReport;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (groups, _summary) = finder.find_duplicates(Path::new(".")).unwrap();
//!
//! TextReport::new(&groups).write_to(&mut std::io::stdout().lock()).unwrap();
//! ```

pub mod json;
pub mod text;

// Re-export main types
pub use json::JsonOutput;
pub use text::TextReport;
