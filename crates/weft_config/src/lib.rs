//! Declarative block-list loading for Weft.
//!
//! Instead of listing blocks as positional CLI arguments, an image can be
//! described in a TOML file with per-block clock domains, parameter
//! overrides, and extra ports. The loader produces the same ordered
//! [`BlockRequest`](weft_netgen::BlockRequest) list the generator consumes.

#![warn(missing_docs)]

pub mod error;
pub mod loader;

pub use error::ConfigError;
pub use loader::{load_blocks, load_blocks_from_str};
