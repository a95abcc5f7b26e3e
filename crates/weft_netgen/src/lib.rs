//! Crossbar instantiation generation for Weft FPGA images.
//!
//! Takes an ordered list of [`BlockRequest`]s and emits the Verilog fragment
//! that wires each block into a fixed-capacity compute-engine crossbar:
//! flattened data buses, per-slot handshake vectors, one instantiation record
//! per block, and optional loopback-FIFO fillers for unused slots.

#![warn(missing_docs)]

pub mod block;
pub mod error;
pub mod format;
pub mod generate;

pub use block::{BlockRequest, PortMap};
pub use error::NetgenError;
pub use format::{format_param_str, format_port_str};
pub use generate::{generate, instance_names, RESERVED_BLOCKS};
