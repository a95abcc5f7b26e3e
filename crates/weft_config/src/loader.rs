//! Block-list file loading and validation.

use std::path::Path;

use serde::Deserialize;
use weft_netgen::BlockRequest;

use crate::error::ConfigError;

/// Top-level shape of a block-list file: an ordered array of block tables.
#[derive(Debug, Deserialize)]
struct BlockList {
    #[serde(default)]
    blocks: Vec<BlockRequest>,
}

/// Loads an ordered block-request list from a TOML file.
pub fn load_blocks(path: &Path) -> Result<Vec<BlockRequest>, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_blocks_from_str(&content)
}

/// Parses and validates a block-request list from TOML content.
///
/// Entry order in the file is the slot order. An empty `blocks` array is
/// accepted here; the generator owns the no-blocks error. Each entry's
/// `block` name must be non-empty.
pub fn load_blocks_from_str(content: &str) -> Result<Vec<BlockRequest>, ConfigError> {
    let list: BlockList =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    for (index, request) in list.blocks.iter().enumerate() {
        if request.block.is_empty() {
            return Err(ConfigError::MissingField(format!("blocks[{index}].block")));
        }
    }
    Ok(list.blocks)
}
