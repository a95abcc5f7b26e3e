//! Idempotent merging of OOT sources into the device `Makefile.srcs`.
//!
//! Unlike the registry, the device source manifest is shared with in-tree
//! sources and cannot be regenerated wholesale. New entries are merged in
//! through the patch engine: lines already present are filtered out and the
//! remainder is inserted after the manifest's OOT continuation marker.
//!
//! Merging is two-phase so callers can surface every fatal error before the
//! first write: [`plan_module_sources`] computes the insertion,
//! [`merge_module_sources`] plans and applies in one step.

use std::path::Path;

use weft_diagnostics::{Diagnostic, DiagnosticSink};
use weft_patch::patch_file;

use crate::error::OotError;

/// File name of a per-module (and per-device) source list.
pub const SOURCE_LIST_FILE: &str = "Makefile.srcs";

/// Placeholder in module source lists rewritten to the module directory.
pub const SOURCES_PATH_PLACEHOLDER: &str = "SOURCES_PATH";

/// Continuation marker after which merged OOT sources are inserted.
const SRCS_ANCHOR: &str = "NOC_OOT_SRCS = \\\n";

/// A computed source-manifest insertion, ready to apply through the patch
/// engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMerge {
    /// Literal anchor after whose last occurrence the payload is inserted.
    pub anchor: String,
    /// Source lines not yet present in the destination manifest.
    pub payload: String,
}

/// Rewrites every [`SOURCES_PATH_PLACEHOLDER`] in `raw` to `dir` with a
/// trailing separator, so `SOURCES_PATH/block.v` becomes `<dir>/block.v`.
pub fn substitute_sources_path(raw: &str, dir: &Path) -> String {
    raw.replace(SOURCES_PATH_PLACEHOLDER, &with_trailing_sep(dir))
}

fn with_trailing_sep(dir: &Path) -> String {
    let mut s = dir.display().to_string();
    if !s.ends_with(std::path::MAIN_SEPARATOR) {
        s.push(std::path::MAIN_SEPARATOR);
    }
    s
}

/// Computes the insertion that merges the module at `module_dir` into a
/// destination manifest with contents `dest_content`.
///
/// Reads `<module_dir>/Makefile.srcs`, substitutes the path placeholder, and
/// drops every line already present in the destination (full-line equality).
/// Returns `None` when nothing remains to insert. The anchor is the last
/// `$(addprefix <module_dir>, \` block for this module if the destination
/// has one, otherwise the `NOC_OOT_SRCS = \` continuation marker; a
/// destination without either gets the payload appended by the patch engine.
pub fn plan_module_sources(
    dest_content: &str,
    module_dir: &Path,
    sink: &DiagnosticSink,
) -> Result<Option<SourceMerge>, OotError> {
    if !has_verilog_sources(module_dir) {
        sink.emit(Diagnostic::warning(format!(
            "no Verilog sources found in {}",
            module_dir.display()
        )));
    }

    let srcs_path = module_dir.join(SOURCE_LIST_FILE);
    let raw = std::fs::read_to_string(&srcs_path).map_err(|source| OotError::Io {
        path: srcs_path,
        source,
    })?;
    let substituted = substitute_sources_path(&raw, module_dir);

    let dest_lines: Vec<&str> = dest_content.lines().collect();
    let remaining: Vec<&str> = substituted
        .lines()
        .filter(|line| !dest_lines.contains(line))
        .collect();
    if remaining.is_empty() {
        return Ok(None);
    }
    let mut payload = remaining.join("\n");
    payload.push('\n');

    let prefix_anchor = format!("$(addprefix {}, \\\n", with_trailing_sep(module_dir));
    let anchor = if dest_content.contains(&prefix_anchor) {
        prefix_anchor
    } else {
        SRCS_ANCHOR.to_string()
    };
    Ok(Some(SourceMerge { anchor, payload }))
}

/// Merges the source list of the module at `module_dir` into the device
/// manifest at `dest`, atomically.
///
/// Returns whether the manifest changed; a second run with the same module
/// is a no-op.
pub fn merge_module_sources(
    dest: &Path,
    module_dir: &Path,
    sink: &DiagnosticSink,
) -> Result<bool, OotError> {
    let dest_content = std::fs::read_to_string(dest).map_err(|source| OotError::Io {
        path: dest.to_path_buf(),
        source,
    })?;
    match plan_module_sources(&dest_content, module_dir, sink)? {
        None => Ok(false),
        Some(merge) => Ok(patch_file(dest, &merge.anchor, &merge.payload)?),
    }
}

/// Whether `dir` directly contains any `.v` files.
fn has_verilog_sources(dir: &Path) -> bool {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return false;
    };
    entries
        .flatten()
        .any(|entry| entry.path().extension().is_some_and(|ext| ext == "v"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn module_dir(base: &Path, lines: &str) -> PathBuf {
        let dir = base.join("module");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(SOURCE_LIST_FILE), lines).unwrap();
        fs::write(dir.join("block_a.v"), "module block_a; endmodule\n").unwrap();
        dir
    }

    fn dest_manifest(base: &Path) -> PathBuf {
        let dest = base.join(SOURCE_LIST_FILE);
        fs::write(&dest, "# device sources\nNOC_OOT_SRCS = \\\nexisting.v \\\n").unwrap();
        dest
    }

    #[test]
    fn substitution_rewrites_placeholder() {
        let out = substitute_sources_path(
            "SOURCES_PATH/block_a.v \\\n",
            Path::new("/oot/module"),
        );
        assert_eq!(out, "/oot/module/block_a.v \\\n");
    }

    #[test]
    fn merge_inserts_after_anchor() {
        let tmp = tempfile::tempdir().unwrap();
        let module = module_dir(tmp.path(), "SOURCES_PATH/block_a.v \\\n");
        let dest = dest_manifest(tmp.path());
        let sink = DiagnosticSink::new();
        assert!(merge_module_sources(&dest, &module, &sink).unwrap());
        let contents = fs::read_to_string(&dest).unwrap();
        assert_eq!(
            contents,
            format!(
                "# device sources\nNOC_OOT_SRCS = \\\n{}/block_a.v \\\nexisting.v \\\n",
                module.display()
            )
        );
    }

    #[test]
    fn merge_twice_changes_manifest_once() {
        let tmp = tempfile::tempdir().unwrap();
        let module = module_dir(tmp.path(), "SOURCES_PATH/block_a.v \\\n");
        let dest = dest_manifest(tmp.path());
        let sink = DiagnosticSink::new();
        assert!(merge_module_sources(&dest, &module, &sink).unwrap());
        let after_first = fs::read_to_string(&dest).unwrap();
        assert!(!merge_module_sources(&dest, &module, &sink).unwrap());
        assert_eq!(fs::read_to_string(&dest).unwrap(), after_first);
    }

    #[test]
    fn already_present_lines_filtered() {
        let tmp = tempfile::tempdir().unwrap();
        let module = module_dir(
            tmp.path(),
            "SOURCES_PATH/block_a.v \\\nSOURCES_PATH/block_b.v \\\n",
        );
        let dest = tmp.path().join(SOURCE_LIST_FILE);
        fs::write(
            &dest,
            format!(
                "NOC_OOT_SRCS = \\\n{}/block_a.v \\\n",
                module.display()
            ),
        )
        .unwrap();
        let sink = DiagnosticSink::new();
        assert!(merge_module_sources(&dest, &module, &sink).unwrap());
        let contents = fs::read_to_string(&dest).unwrap();
        assert_eq!(contents.matches("block_a.v").count(), 1);
        assert_eq!(contents.matches("block_b.v").count(), 1);
    }

    #[test]
    fn fully_present_module_plans_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let module = module_dir(tmp.path(), "SOURCES_PATH/block_a.v \\\n");
        let dest_content = format!("NOC_OOT_SRCS = \\\n{}/block_a.v \\\n", module.display());
        let sink = DiagnosticSink::new();
        let plan = plan_module_sources(&dest_content, &module, &sink).unwrap();
        assert!(plan.is_none());
    }

    #[test]
    fn missing_anchor_appends() {
        let tmp = tempfile::tempdir().unwrap();
        let module = module_dir(tmp.path(), "SOURCES_PATH/block_a.v \\\n");
        let dest = tmp.path().join(SOURCE_LIST_FILE);
        fs::write(&dest, "# no markers here\n").unwrap();
        let sink = DiagnosticSink::new();
        assert!(merge_module_sources(&dest, &module, &sink).unwrap());
        let contents = fs::read_to_string(&dest).unwrap();
        assert!(contents.starts_with("# no markers here\n"));
        assert!(contents.ends_with(&format!("{}/block_a.v \\\n", module.display())));
    }

    #[test]
    fn prefix_block_takes_precedence() {
        let tmp = tempfile::tempdir().unwrap();
        let module = module_dir(tmp.path(), "SOURCES_PATH/block_b.v \\\n");
        let dest = tmp.path().join(SOURCE_LIST_FILE);
        fs::write(
            &dest,
            format!(
                "NOC_OOT_SRCS = \\\nother.v \\\n$(addprefix {}/, \\\nblock_a.v) \\\n",
                module.display()
            ),
        )
        .unwrap();
        let sink = DiagnosticSink::new();
        assert!(merge_module_sources(&dest, &module, &sink).unwrap());
        let contents = fs::read_to_string(&dest).unwrap();
        let prefix_pos = contents.find("$(addprefix").unwrap();
        let inserted_pos = contents.find("block_b.v").unwrap();
        assert!(inserted_pos > prefix_pos);
    }

    #[test]
    fn missing_module_source_list_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let module = tmp.path().join("empty_module");
        fs::create_dir(&module).unwrap();
        let dest = dest_manifest(tmp.path());
        let sink = DiagnosticSink::new();
        let err = merge_module_sources(&dest, &module, &sink).unwrap_err();
        assert!(matches!(err, OotError::Io { .. }));
    }

    #[test]
    fn warns_when_no_verilog_sources() {
        let tmp = tempfile::tempdir().unwrap();
        let module = tmp.path().join("no_hdl");
        fs::create_dir(&module).unwrap();
        fs::write(module.join(SOURCE_LIST_FILE), "SOURCES_PATH/gone.v \\\n").unwrap();
        let dest = dest_manifest(tmp.path());
        let sink = DiagnosticSink::new();
        merge_module_sources(&dest, &module, &sink).unwrap();
        let diags = sink.take_all();
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("no Verilog sources"));
    }
}
