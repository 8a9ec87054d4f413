//! Infrastructure error types
//!
//! Content problems with an upload (bad format, oversize, undecodable bytes)
//! are reported as `CheckFailure` data inside a `ValidationResult`. An `Err`
//! from this crate always means the environment failed: the file could not
//! be read at all.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, PreflightError>;

/// Environment failures that prevent validation from running.
#[derive(Debug, Error)]
pub enum PreflightError {
    /// File metadata or contents could not be read (permissions, disk error,
    /// missing file).
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
