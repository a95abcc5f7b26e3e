//! Idempotent text patching over persisted build manifests.
//!
//! The core primitive, [`insert_after_last_match`], merges a payload into
//! existing text without ever duplicating it, so Weft can be re-run against
//! the same build tree any number of times. The [`atomic`] module provides
//! the crash-safe write path every Weft output file goes through.

#![warn(missing_docs)]

pub mod atomic;
pub mod error;
pub mod insert;

pub use atomic::{patch_file, write_atomic};
pub use error::PatchError;
pub use insert::insert_after_last_match;
