//! Crash-safe file replacement.
//!
//! Every Weft output target is written through [`write_atomic`]: the new
//! contents go to a temporary file in the target's directory and are renamed
//! over the target, so a crash mid-write never leaves a truncated or
//! half-merged manifest behind.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::PatchError;
use crate::insert::insert_after_last_match;

/// Atomically replaces `path` with `contents`.
///
/// The temporary file is created in the same directory as `path` so the
/// final rename never crosses a filesystem boundary.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), PatchError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let write_err = |source| PatchError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.persist(path)
        .map_err(|e| write_err(e.error))
        .map(|_| ())
}

/// Applies [`insert_after_last_match`] to the file at `path`.
///
/// Reads the current contents, computes the transform, and atomically
/// rewrites the file only if it changed. Returns whether a write happened,
/// so a second run with the same arguments reports `false`.
pub fn patch_file(path: &Path, anchor: &str, payload: &str) -> Result<bool, PatchError> {
    let old = std::fs::read_to_string(path).map_err(|source| PatchError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let new = insert_after_last_match(&old, anchor, payload);
    if new == old {
        return Ok(false);
    }
    write_atomic(path, &new)?;
    Ok(true)
}
