//! The crossbar instantiation generator.
//!
//! Produces the complete Verilog fragment for one image: the crossbar
//! preamble, one instantiation record per requested block, and an optional
//! trailing loopback-FIFO fill block. Generation is all-or-nothing: any
//! validation failure returns an error before a single line is rendered.

use std::collections::HashMap;
use std::fmt::Write;

use weft_diagnostics::{Diagnostic, DiagnosticSink};

use crate::block::BlockRequest;
use crate::error::NetgenError;
use crate::format::{format_param_str, format_port_str};

/// Blocks that require special treatment in the image top level and must
/// never be instantiated through the crossbar generator.
pub const RESERVED_BLOCKS: [&str; 2] = ["radio_core", "axi_dma_fifo"];

const BANNER: &str = "\
/////////////////////////////////////////////////////////
// Auto-generated by weft. Any changes in this file
// will be overwritten the next time weft is run.
/////////////////////////////////////////////////////////
";

/// Derives a unique instance name for every request, in request order.
///
/// The first occurrence of a block name is named `<block>`; later
/// occurrences are suffixed with their 1-based duplicate count, so three
/// `fft` requests become `fft`, `fft2`, `fft3`. The derivation is a pure
/// function of the ordered block-name list.
pub fn instance_names(requests: &[BlockRequest]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    requests
        .iter()
        .map(|req| {
            let count = counts.entry(req.block.as_str()).or_insert(0);
            *count += 1;
            if *count == 1 {
                req.block.clone()
            } else {
                format!("{}{}", req.block, count)
            }
        })
        .collect()
}

/// Generates the crossbar instantiation fragment for `requests`.
///
/// `capacity` is the crossbar slot capacity for the target device, supplied
/// by the caller. With `fill_with_fifos` the emitted slot count is the full
/// capacity and unused trailing slots are occupied by loopback FIFOs;
/// otherwise the slot count equals the number of requests.
///
/// Validation is ordered and the first failure wins: an empty request list,
/// then a capacity overrun, then reserved block names (every offender is
/// listed). On success, one `Info` diagnostic per accepted block is emitted
/// into `sink` for operator visibility; the diagnostics are not part of the
/// returned text.
pub fn generate(
    requests: &[BlockRequest],
    capacity: usize,
    fill_with_fifos: bool,
    sink: &DiagnosticSink,
) -> Result<String, NetgenError> {
    if requests.is_empty() {
        return Err(NetgenError::NoBlocks);
    }
    if requests.len() > capacity {
        return Err(NetgenError::CapacityExceeded {
            requested: requests.len(),
            capacity,
        });
    }
    let reserved: Vec<String> = requests
        .iter()
        .filter(|req| RESERVED_BLOCKS.contains(&req.block.as_str()))
        .map(|req| req.block.clone())
        .collect();
    if !reserved.is_empty() {
        return Err(NetgenError::ReservedBlocks(reserved));
    }

    let slot_count = if fill_with_fifos {
        capacity
    } else {
        requests.len()
    };

    let mut out = render_preamble(slot_count);
    let names = instance_names(requests);
    for (slot, (req, name)) in requests.iter().zip(&names).enumerate() {
        sink.emit(Diagnostic::info(format!("using block '{}'", req.block)));
        out.push_str(&render_block(req, name, slot));
    }
    if fill_with_fifos && slot_count > requests.len() {
        out.push_str(&render_fifo_fill(requests.len()));
    }
    Ok(out)
}

/// Renders the preamble: slot-count constant, flattened data buses, per-slot
/// handshake vectors, and the unflatten/flatten generate loop. Slot `i`
/// occupies bits `[64*i+63 : 64*i]` of the flattened buses.
fn render_preamble(slot_count: usize) -> String {
    let mut out = String::from(BANNER);
    let _ = write!(
        out,
        "\
localparam NUM_CE = {slot_count};
wire [NUM_CE*64-1:0] ce_flat_o_tdata, ce_flat_i_tdata;
wire [63:0]          ce_o_tdata[0:NUM_CE-1], ce_i_tdata[0:NUM_CE-1];
wire [NUM_CE-1:0]    ce_o_tlast, ce_o_tvalid, ce_o_tready, ce_i_tlast, ce_i_tvalid, ce_i_tready;
wire [63:0]          ce_debug[0:NUM_CE-1];
// Flatten CE tdata arrays
genvar k;
generate
  for (k = 0; k < NUM_CE; k = k + 1) begin
    assign ce_o_tdata[k] = ce_flat_o_tdata[k*64+63:k*64];
    assign ce_flat_i_tdata[k*64+63:k*64] = ce_i_tdata[k];
  end
endgenerate
"
    );
    out
}

/// Renders one instantiation record binding `req` into slot `slot`.
fn render_block(req: &BlockRequest, instance: &str, slot: usize) -> String {
    // Header pieces joined with single spaces; the parameter clause is
    // omitted entirely when there are no overrides.
    let params = format_param_str(&req.parameters);
    let header = [format!("noc_block_{}", req.block), params, instance.to_string()]
        .into_iter()
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let clock = &req.clock;
    let extra = format_port_str(&req.extra_ports);
    format!(
        "
{header} (
  .bus_clk(bus_clk), .bus_rst(bus_rst),
  .ce_clk({clock}_clk), .ce_rst({clock}_rst),
  .i_tdata(ce_o_tdata[{slot}]), .i_tlast(ce_o_tlast[{slot}]), .i_tvalid(ce_o_tvalid[{slot}]), .i_tready(ce_o_tready[{slot}]),
  .o_tdata(ce_i_tdata[{slot}]), .o_tlast(ce_i_tlast[{slot}]), .o_tvalid(ce_i_tvalid[{slot}]), .o_tready(ce_i_tready[{slot}]),
  .debug(ce_debug[{slot}]){extra}
);
"
    )
}

/// Renders the trailing generate block that fills slots `[start, NUM_CE)`
/// with loopback FIFOs so the crossbar indexing stays contiguous.
fn render_fifo_fill(start: usize) -> String {
    format!(
        "
// Fill remaining crossbar ports with loopback FIFOs
genvar n;
generate
  for (n = {start}; n < NUM_CE; n = n + 1) begin
    noc_block_axi_fifo_loopback inst_noc_block_axi_fifo_loopback (
      .bus_clk(bus_clk), .bus_rst(bus_rst),
      .ce_clk(ce_clk), .ce_rst(ce_rst),
      .i_tdata(ce_o_tdata[n]), .i_tlast(ce_o_tlast[n]), .i_tvalid(ce_o_tvalid[n]), .i_tready(ce_o_tready[n]),
      .o_tdata(ce_i_tdata[n]), .o_tlast(ce_i_tlast[n]), .o_tvalid(ce_i_tvalid[n]), .o_tready(ce_i_tready[n]),
      .debug(ce_debug[n])
    );
  end
endgenerate
"
    )
}
