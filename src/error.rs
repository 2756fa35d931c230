//! Error types for the directory driver.

use std::path::PathBuf;

/// Failures while walking the tree or doing file I/O.
///
/// Per-file read and write failures are turned into issues by the driver;
/// only a bad root aborts a run.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, CheckError>;
