//! Error types for manifest patching.

use std::path::PathBuf;

/// Errors that can occur while reading or atomically rewriting a manifest.
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    /// The target file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path of the file being patched.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The target file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Path of the file being written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
