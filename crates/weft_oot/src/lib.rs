//! Out-of-tree (OOT) module registration for Weft build trees.
//!
//! OOT modules ship their own HDL sources and are wired into a device build
//! through two per-device manifests: `Makefile.OOT.inc`, which is regenerated
//! wholesale on every run, and the device `Makefile.srcs`, which grows
//! append-only through idempotent patching ([`weft_patch`]).
//!
//! Two concurrent Weft invocations against the same build tree race on these
//! files; no locking is attempted.

#![warn(missing_docs)]

pub mod error;
pub mod registry;
pub mod resolve;
pub mod srcs;

pub use error::OotError;
pub use registry::{render_registry, write_registry, REGISTRY_FILE};
pub use resolve::{resolve_module_dir, INCLUDE_MANIFEST, MODULE_ROOT_DIR};
pub use srcs::{
    merge_module_sources, plan_module_sources, substitute_sources_path, SourceMerge,
    SOURCES_PATH_PLACEHOLDER, SOURCE_LIST_FILE,
};
