//! `weft build` — generate artifacts, then invoke the external build tool.
//!
//! The build tool is an external collaborator: weft only stages its inputs
//! and shells out to `make` in the device's build directory. The working
//! directory is passed explicitly to the child process; weft never changes
//! its own.

use std::path::{Path, PathBuf};
use std::process::Command;

use weft_diagnostics::DiagnosticSink;

use crate::device::{default_target, device_build_dir};
use crate::{generate, BuildArgs};

/// Runs the `weft build` command.
///
/// Stages all generated artifacts first (exactly as `weft generate` would),
/// then runs the build. The child's exit code becomes weft's exit code.
pub fn run(args: &BuildArgs, quiet: bool) -> Result<i32, Box<dyn std::error::Error>> {
    let sink = DiagnosticSink::new();
    let plan = generate::plan(&args.generate, &sink)?;
    generate::apply(&plan)?;
    weft_diagnostics::render_to_stderr(&sink.take_all(), quiet);

    let device = args.generate.device.to_lowercase();
    let build_dir = build_directory(&args.generate.base_dir, &device)?;
    let target = resolve_target(&device, args.target.as_deref())?;

    if !quiet {
        eprintln!("building target {target} in {}", build_dir.display());
    }
    invoke_build_tool(&build_dir, &target, args.clean_all, args.gui)
}

/// Resolves the device's build directory under `<base>/top/` and checks it
/// exists.
fn build_directory(base_dir: &Path, device: &str) -> Result<PathBuf, String> {
    let dir_name = device_build_dir(device).ok_or_else(|| format!("unknown device '{device}'"))?;
    let build_dir = base_dir.join("top").join(dir_name);
    if !build_dir.is_dir() {
        return Err(format!(
            "build directory {} does not exist",
            build_dir.display()
        ));
    }
    Ok(build_dir)
}

/// Picks the build target: explicit `-t` wins, else the device default.
fn resolve_target(device: &str, explicit: Option<&str>) -> Result<String, String> {
    match explicit {
        Some(target) => Ok(target.to_string()),
        None => default_target(device)
            .map(str::to_string)
            .ok_or_else(|| format!("no default build target for device '{device}'")),
    }
}

/// Invokes the external build tool in `build_dir`.
///
/// Sources the build environment and runs `make <target>`, optionally
/// preceded by `make cleanall` and followed by `GUI=1`. The working
/// directory is set on the child command only.
fn invoke_build_tool(
    build_dir: &Path,
    target: &str,
    clean_all: bool,
    gui: bool,
) -> Result<i32, Box<dyn std::error::Error>> {
    let mut make_cmd = String::from(". ./setupenv.sh ");
    if clean_all {
        make_cmd.push_str("&& make cleanall ");
    }
    make_cmd.push_str(&format!("&& make {target}"));
    if gui {
        make_cmd.push_str(" GUI=1");
    }
    let status = Command::new("bash")
        .arg("-c")
        .arg(&make_cmd)
        .current_dir(build_dir)
        .status()?;
    Ok(status.code().unwrap_or(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_target_wins() {
        let target = resolve_target("x310", Some("X310_XG")).unwrap();
        assert_eq!(target, "X310_XG");
    }

    #[test]
    fn default_target_from_device() {
        let target = resolve_target("e320", None).unwrap();
        assert_eq!(target, "E320_1G");
    }

    #[test]
    fn unknown_device_default_errors() {
        assert!(resolve_target("z999", None).is_err());
    }

    #[test]
    fn missing_build_directory_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let err = build_directory(tmp.path(), "x310").unwrap_err();
        assert!(err.contains("does not exist"));
    }

    #[test]
    fn existing_build_directory_resolved() {
        let tmp = tempfile::tempdir().unwrap();
        let expected = tmp.path().join("top").join("n3xx");
        std::fs::create_dir_all(&expected).unwrap();
        let dir = build_directory(tmp.path(), "n310").unwrap();
        assert_eq!(dir, expected);
    }
}
