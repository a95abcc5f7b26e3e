//! Tiered resolution of module directory references.

use std::path::{Path, PathBuf};

/// Directory name that marks the root of an OOT module's FPGA sources.
pub const MODULE_ROOT_DIR: &str = "noc";

/// File name of an OOT module's include manifest.
pub const INCLUDE_MANIFEST: &str = "Makefile.inc";

/// Resolves a module directory reference to its canonical absolute path.
///
/// Three tiers are tried in fixed precedence, first match wins:
///
/// 1. the reference itself is a module root (a directory named `noc`);
/// 2. the reference contains a nested `noc/` module root;
/// 3. the reference directly contains a `Makefile.inc`.
///
/// Returns `None` when no tier matches or the path cannot be canonicalized;
/// the caller reports that as a non-fatal skip.
pub fn resolve_module_dir(reference: &Path) -> Option<PathBuf> {
    if reference.is_dir() && reference.file_name().is_some_and(|n| n == MODULE_ROOT_DIR) {
        return std::fs::canonicalize(reference).ok();
    }
    let nested = reference.join(MODULE_ROOT_DIR);
    if nested.is_dir() {
        return std::fs::canonicalize(nested).ok();
    }
    if reference.join(INCLUDE_MANIFEST).is_file() {
        return std::fs::canonicalize(reference).ok();
    }
    None
}
