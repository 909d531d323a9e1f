//! Plain-text duplicate report.
//!
//! For every group:
//!
//! ```text
//! These 2 files are identical:
//! dir/a.txt
//! dir/b.txt
//! ----  ****  ----
//!
//! ```
//!
//! followed by a single `Total identical files found: <n>` line, where `n`
//! is the sum of the group sizes.

use std::io::{self, Write};
use std::path::Path;

use crate::duplicates::{identical_file_count, DuplicateGroup};

/// Separator line written after each group.
pub const GROUP_SEPARATOR: &str = "----  ****  ----";

/// Text report over a set of duplicate groups.
#[derive(Debug, Clone, Copy)]
pub struct TextReport<'a> {
    groups: &'a [DuplicateGroup],
}

impl<'a> TextReport<'a> {
    /// Create a report for the given groups.
    #[must_use]
    pub fn new(groups: &'a [DuplicateGroup]) -> Self {
        Self { groups }
    }

    /// Total printed on the last line.
    #[must_use]
    pub fn total(&self) -> usize {
        identical_file_count(self.groups)
    }

    /// Write the report.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for group in self.groups {
            writeln!(writer, "These {} files are identical:", group.len())?;
            for path in &group.paths {
                write_path(writer, path)?;
            }
            writeln!(writer, "{}", GROUP_SEPARATOR)?;
            writeln!(writer)?;
        }
        writeln!(writer, "Total identical files found: {}", self.total())?;
        writer.flush()
    }

    /// Render the report into a string.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Write one path followed by a newline, keeping its bytes as-is on unix.
#[cfg(unix)]
fn write_path<W: Write>(writer: &mut W, path: &Path) -> io::Result<()> {
    use std::os::unix::ffi::OsStrExt;

    writer.write_all(path.as_os_str().as_bytes())?;
    writer.write_all(b"\n")
}

#[cfg(not(unix))]
fn write_path<W: Write>(writer: &mut W, path: &Path) -> io::Result<()> {
    writeln!(writer, "{}", path.display())
}
