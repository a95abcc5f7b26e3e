//! Error types for OOT module registration.

use std::path::PathBuf;

use weft_patch::PatchError;

/// Errors that abort OOT registration before any manifest is written.
#[derive(Debug, thiserror::Error)]
pub enum OotError {
    /// A manifest or source-list file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A resolved module directory has neither an include manifest nor a
    /// legacy source list, so no registry entry can be produced for it.
    #[error("no include manifest or legacy source list found in {0}")]
    MissingManifestSource(PathBuf),

    /// Patching or atomically rewriting a manifest failed.
    #[error(transparent)]
    Patch(#[from] PatchError),
}
