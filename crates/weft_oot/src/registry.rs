//! The per-device OOT registry, `Makefile.OOT.inc`.
//!
//! The registry is regenerated wholesale on every run rather than patched:
//! running twice with the same references produces byte-identical output,
//! and stale entries from removed modules never linger.

use std::path::{Path, PathBuf};

use weft_diagnostics::{Diagnostic, DiagnosticSink};
use weft_patch::write_atomic;

use crate::error::OotError;
use crate::resolve::{resolve_module_dir, INCLUDE_MANIFEST, MODULE_ROOT_DIR};
use crate::srcs::{substitute_sources_path, SOURCE_LIST_FILE};

/// File name of the per-device OOT registry.
pub const REGISTRY_FILE: &str = "Makefile.OOT.inc";

/// Directory holding an OOT module's legacy source list.
const LEGACY_SOURCE_DIR: &str = "fpga-src";

const REGISTRY_HEADER: &str = "\
##################################################
# Include OOT module makefiles
##################################################
";

/// Renders the full registry text for the given module references.
///
/// References are resolved through [`resolve_module_dir`]; unresolvable ones
/// are skipped with a warning into `sink`. Resolved directories are
/// deduplicated by canonical absolute path, so a directory listed twice (or
/// already registered on a previous run) yields exactly one entry. A
/// resolved directory with neither an include manifest nor a legacy source
/// list is fatal and nothing should be written.
pub fn render_registry(
    references: &[PathBuf],
    sink: &DiagnosticSink,
) -> Result<String, OotError> {
    let mut out = String::from(REGISTRY_HEADER);
    let mut seen: Vec<PathBuf> = Vec::new();
    for reference in references {
        let Some(canonical) = resolve_module_dir(reference) else {
            sink.emit(Diagnostic::warning(format!(
                "no OOT module found at {}",
                reference.display()
            )));
            continue;
        };
        if seen.contains(&canonical) {
            continue;
        }
        out.push_str(&render_entry(&canonical)?);
        seen.push(canonical);
    }
    Ok(out)
}

/// Renders the registry then atomically replaces `<device_dir>/Makefile.OOT.inc`.
///
/// Rendering happens entirely before the write, so a fatal resolution or
/// read error leaves the existing registry untouched.
pub fn write_registry(
    device_dir: &Path,
    references: &[PathBuf],
    sink: &DiagnosticSink,
) -> Result<PathBuf, OotError> {
    let contents = render_registry(references, sink)?;
    let path = device_dir.join(REGISTRY_FILE);
    write_atomic(&path, &contents)?;
    Ok(path)
}

/// Renders one registry entry: the directory declaration plus exactly one of
/// an include directive or a literal source list.
fn render_entry(canonical: &Path) -> Result<String, OotError> {
    let mut entry = format!("\nOOT_DIR = {}\n", canonical.display());
    if canonical.join(INCLUDE_MANIFEST).is_file() {
        entry.push_str("include $(OOT_DIR)/Makefile.inc\n");
        return Ok(entry);
    }
    let nested_manifest = canonical.join(MODULE_ROOT_DIR).join(INCLUDE_MANIFEST);
    if nested_manifest.is_file() {
        entry.push_str(&format!(
            "include $(OOT_DIR)/{MODULE_ROOT_DIR}/{INCLUDE_MANIFEST}\n"
        ));
        return Ok(entry);
    }
    let legacy = canonical.join(LEGACY_SOURCE_DIR).join(SOURCE_LIST_FILE);
    if legacy.is_file() {
        let raw = std::fs::read_to_string(&legacy).map_err(|source| OotError::Io {
            path: legacy.clone(),
            source,
        })?;
        let sources = substitute_sources_path(&raw, &canonical.join(LEGACY_SOURCE_DIR));
        entry.push_str(&format!("NOC_OOT_SRCS += {sources}\n"));
        return Ok(entry);
    }
    Err(OotError::MissingManifestSource(canonical.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn module_with_manifest(base: &Path, name: &str) -> PathBuf {
        let module = base.join(name);
        fs::create_dir_all(module.join("noc")).unwrap();
        fs::write(module.join("noc").join(INCLUDE_MANIFEST), "SRCS +=\n").unwrap();
        module
    }

    #[test]
    fn entry_with_include_directive() {
        let dir = tempfile::tempdir().unwrap();
        let module = module_with_manifest(dir.path(), "fancy_filter");
        let sink = DiagnosticSink::new();
        let out = render_registry(&[module.clone()], &sink).unwrap();
        let canonical = module.join("noc").canonicalize().unwrap();
        assert!(out.starts_with(REGISTRY_HEADER));
        assert!(out.contains(&format!("OOT_DIR = {}\n", canonical.display())));
        assert!(out.contains("include $(OOT_DIR)/Makefile.inc\n"));
    }

    #[test]
    fn entry_with_legacy_source_list() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("noc");
        fs::create_dir_all(root.join("fpga-src")).unwrap();
        fs::write(
            root.join("fpga-src").join(SOURCE_LIST_FILE),
            "SOURCES_PATH/block_a.v \\\nSOURCES_PATH/block_b.v\n",
        )
        .unwrap();
        let sink = DiagnosticSink::new();
        let out = render_registry(&[root.clone()], &sink).unwrap();
        let srcs_dir = root.join("fpga-src").canonicalize().unwrap();
        assert!(out.contains("NOC_OOT_SRCS += "));
        assert!(out.contains(&format!("{}/block_a.v", srcs_dir.display())));
        assert!(!out.contains("SOURCES_PATH"));
    }

    #[test]
    fn duplicate_reference_listed_once() {
        let dir = tempfile::tempdir().unwrap();
        let module = module_with_manifest(dir.path(), "dup");
        let sink = DiagnosticSink::new();
        let out = render_registry(&[module.clone(), module.clone()], &sink).unwrap();
        assert_eq!(out.matches("OOT_DIR = ").count(), 1);
    }

    #[test]
    fn distinct_references_to_same_root_deduplicated() {
        // Tier 1 (the noc dir itself) and tier 2 (its parent) resolve to the
        // same canonical directory.
        let dir = tempfile::tempdir().unwrap();
        let module = module_with_manifest(dir.path(), "twice");
        let sink = DiagnosticSink::new();
        let out = render_registry(&[module.clone(), module.join("noc")], &sink).unwrap();
        assert_eq!(out.matches("OOT_DIR = ").count(), 1);
    }

    #[test]
    fn unresolvable_reference_warns_and_skips() {
        let dir = tempfile::tempdir().unwrap();
        let module = module_with_manifest(dir.path(), "good");
        let bogus = dir.path().join("bogus");
        fs::create_dir(&bogus).unwrap();
        let sink = DiagnosticSink::new();
        let out = render_registry(&[bogus, module], &sink).unwrap();
        assert_eq!(out.matches("OOT_DIR = ").count(), 1);
        let diags = sink.take_all();
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("no OOT module found at"));
    }

    #[test]
    fn missing_manifest_source_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("noc");
        fs::create_dir(&root).unwrap();
        let sink = DiagnosticSink::new();
        let err = render_registry(&[root], &sink).unwrap_err();
        assert!(matches!(err, OotError::MissingManifestSource(_)));
    }

    #[test]
    fn regeneration_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let a = module_with_manifest(dir.path(), "a");
        let b = module_with_manifest(dir.path(), "b");
        let refs = vec![a, b];
        let first = render_registry(&refs, &DiagnosticSink::new()).unwrap();
        let second = render_registry(&refs, &DiagnosticSink::new()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_references_render_header_only() {
        let sink = DiagnosticSink::new();
        let out = render_registry(&[], &sink).unwrap();
        assert_eq!(out, REGISTRY_HEADER);
    }

    #[test]
    fn write_registry_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let device_dir = dir.path().join("x300");
        fs::create_dir(&device_dir).unwrap();
        fs::write(device_dir.join(REGISTRY_FILE), "stale\n").unwrap();
        let module = module_with_manifest(dir.path(), "m");
        let sink = DiagnosticSink::new();
        let path = write_registry(&device_dir, &[module], &sink).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("stale"));
        assert!(contents.contains("include $(OOT_DIR)/Makefile.inc"));
    }

    #[test]
    fn fatal_error_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let device_dir = dir.path().join("x300");
        fs::create_dir(&device_dir).unwrap();
        let bare_root = dir.path().join("noc");
        fs::create_dir(&bare_root).unwrap();
        let sink = DiagnosticSink::new();
        assert!(write_registry(&device_dir, &[bare_root], &sink).is_err());
        assert!(!device_dir.join(REGISTRY_FILE).exists());
    }
}
