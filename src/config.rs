//! Run configuration, built from the command line.

use std::path::{Path, PathBuf};

/// Extensions treated as implementation files.
pub const SOURCE_EXTENSIONS: &[&str] = &["cpp", "cc", "cxx"];

/// Extensions treated as headers (include guard and docstring checks).
pub const HEADER_EXTENSIONS: &[&str] = &["hpp", "hh", "hxx", "h"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Source,
    Header,
}

impl FileKind {
    /// Classify `path` by extension. `None` for files the checker ignores.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|e| e.to_str())?;
        if HEADER_EXTENSIONS.contains(&ext) {
            Some(FileKind::Header)
        } else if SOURCE_EXTENSIONS.contains(&ext) {
            Some(FileKind::Source)
        } else {
            None
        }
    }
}

/// Pipeline configuration for [`crate::walk::check_directory`].
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Directory scanned recursively
    pub root: PathBuf,
    /// Run the per-method `@param`/`@return` checker on headers. Off by
    /// default: the heuristics still report false positives on real code.
    pub check_docstrings: bool,
    /// Compute header rewrites without writing them back.
    pub dry_run: bool,
    /// Keep every matched declaration in the report for listing.
    pub list_declarations: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            check_docstrings: false,
            dry_run: false,
            list_declarations: false,
        }
    }
}
