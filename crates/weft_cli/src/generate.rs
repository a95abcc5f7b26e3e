//! `weft generate` — produce the instantiation file and register OOT modules.
//!
//! Runs the full artifact pipeline:
//! 1. Build the ordered block-request list (block-list file or positional args)
//! 2. Generate the crossbar instantiation fragment
//! 3. Render the per-device OOT registry
//! 4. Plan the OOT source-manifest merges
//! 5. Write everything, atomically, only after every fatal check has passed

use std::fs;
use std::path::PathBuf;

use weft_diagnostics::{Diagnostic, DiagnosticSink};
use weft_netgen::BlockRequest;
use weft_oot::{SourceMerge, REGISTRY_FILE, SOURCE_LIST_FILE};
use weft_patch::{patch_file, write_atomic};

use crate::device::device_build_dir;
use crate::GenerateArgs;

/// Everything `weft generate` writes, resolved but not yet on disk.
pub struct GeneratePlan {
    /// Instantiation fragment text.
    pub inst_contents: String,
    /// Destination for the instantiation fragment.
    pub inst_path: PathBuf,
    /// Full OOT registry text.
    pub registry_contents: String,
    /// Destination for the OOT registry.
    pub registry_path: PathBuf,
    /// Device source manifest receiving the merges.
    pub srcs_path: PathBuf,
    /// Pending source-manifest insertions, one per registered module.
    pub srcs_merges: Vec<SourceMerge>,
}

/// Runs the `weft generate` command.
pub fn run(args: &GenerateArgs, quiet: bool) -> Result<i32, Box<dyn std::error::Error>> {
    let sink = DiagnosticSink::new();
    let plan = plan(args, &sink)?;
    apply(&plan)?;
    weft_diagnostics::render_to_stderr(&sink.take_all(), quiet);
    if !quiet {
        eprintln!("instantiation file written to {}", plan.inst_path.display());
    }
    Ok(0)
}

/// Computes every artifact for one run without touching the filesystem
/// outputs. All fatal errors surface here, before [`apply`] writes anything.
pub fn plan(args: &GenerateArgs, sink: &DiagnosticSink) -> Result<GeneratePlan, Box<dyn std::error::Error>> {
    let device = args.device.to_lowercase();
    let build_dir = device_build_dir(&device)
        .ok_or_else(|| format!("unknown device '{}'", args.device))?;
    let top_dir = args.base_dir.join("top").join(build_dir);

    let requests = load_requests(args, sink)?;

    let inst_contents = match &args.inst_src {
        // Advanced usage: a pre-made instantiation file bypasses generation.
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?,
        None => weft_netgen::generate(&requests, args.max_num_blocks, args.fill_with_fifos, sink)?,
    };
    let inst_path = match &args.outfile {
        Some(path) => path.clone(),
        None => top_dir.join(format!("noc_block_inst_{device}.v")),
    };

    let registry_contents = weft_oot::render_registry(&args.include_dirs, sink)?;
    let registry_path = top_dir.join(REGISTRY_FILE);

    let srcs_path = top_dir.join(SOURCE_LIST_FILE);
    let mut srcs_merges = Vec::new();
    if !args.include_dirs.is_empty() {
        let dest_content = fs::read_to_string(&srcs_path)
            .map_err(|e| format!("failed to read {}: {e}", srcs_path.display()))?;
        for dir in &args.include_dirs {
            if let Some(merge) = weft_oot::plan_module_sources(&dest_content, dir, sink)? {
                srcs_merges.push(merge);
            }
        }
    }

    Ok(GeneratePlan {
        inst_contents,
        inst_path,
        registry_contents,
        registry_path,
        srcs_path,
        srcs_merges,
    })
}

/// Writes a computed plan to disk. Each target is replaced atomically.
pub fn apply(plan: &GeneratePlan) -> Result<(), Box<dyn std::error::Error>> {
    write_atomic(&plan.inst_path, &plan.inst_contents)?;
    write_atomic(&plan.registry_path, &plan.registry_contents)?;
    for merge in &plan.srcs_merges {
        patch_file(&plan.srcs_path, &merge.anchor, &merge.payload)?;
    }
    Ok(())
}

/// Builds the ordered request list from the block-list file or, absent one,
/// from the positional block names.
fn load_requests(
    args: &GenerateArgs,
    sink: &DiagnosticSink,
) -> Result<Vec<BlockRequest>, Box<dyn std::error::Error>> {
    match &args.config {
        Some(path) => {
            if !args.blocks.is_empty() {
                sink.emit(Diagnostic::warning(
                    "using block-list file, ignoring positional block arguments",
                ));
            }
            Ok(weft_config::load_blocks(path)?)
        }
        None => Ok(args
            .blocks
            .iter()
            .map(|block| BlockRequest::new(block.clone()))
            .collect()),
    }
}
