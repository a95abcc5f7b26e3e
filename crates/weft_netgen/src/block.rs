//! The block request record consumed by the generator.

use indexmap::IndexMap;
use serde::Deserialize;

/// An ordered name → value map for parameter overrides and extra ports.
///
/// A `None` value means "bind the name with an empty value", i.e. use the
/// declared default (parameters) or leave the port unconnected (ports).
/// Insertion order is the emission order.
pub type PortMap = IndexMap<String, Option<String>>;

/// One requested processing block to be bound into a crossbar slot.
///
/// A request has no standalone identity: its position in the request list is
/// its slot index. Requests are recomputed from scratch on every run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlockRequest {
    /// Block type name, e.g. `fft` instantiates `noc_block_fft`.
    pub block: String,

    /// Clock domain prefix for the block's `_clk`/`_rst` bindings.
    #[serde(default = "default_clock")]
    pub clock: String,

    /// Parameter overrides, emitted as a `#(...)` clause.
    #[serde(default)]
    pub parameters: PortMap,

    /// Extra port bindings appended after the mandatory crossbar ports.
    #[serde(default)]
    pub extra_ports: PortMap,
}

fn default_clock() -> String {
    "ce".to_string()
}

impl BlockRequest {
    /// Creates a request for `block` on the default `ce` clock domain with
    /// no parameter overrides or extra ports.
    pub fn new(block: impl Into<String>) -> Self {
        Self {
            block: block.into(),
            clock: default_clock(),
            parameters: PortMap::new(),
            extra_ports: PortMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults() {
        let req = BlockRequest::new("fft");
        assert_eq!(req.block, "fft");
        assert_eq!(req.clock, "ce");
        assert!(req.parameters.is_empty());
        assert!(req.extra_ports.is_empty());
    }

    #[test]
    fn port_map_preserves_insertion_order() {
        let mut map = PortMap::new();
        map.insert("zeta".to_string(), Some("1".to_string()));
        map.insert("alpha".to_string(), None);
        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }
}
