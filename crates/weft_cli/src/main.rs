//! Weft CLI — assemble FPGA images from NoC processing blocks.
//!
//! Provides `weft generate` to produce the crossbar instantiation file and
//! register out-of-tree modules into the device build manifests, and
//! `weft build` to do all of that and then run the external build tool.

#![warn(missing_docs)]

mod build;
mod device;
mod generate;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

/// Weft — FPGA image assembly for NoC block designs.
#[derive(Parser, Debug)]
#[command(name = "weft", version, about = "Weft FPGA image assembly tool")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the instantiation file and register OOT modules.
    Generate(GenerateArgs),
    /// Generate all artifacts, then run the external build tool.
    Build(BuildArgs),
}

/// Arguments shared by `weft generate` and `weft build`.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Block names to instantiate, in crossbar slot order.
    pub blocks: Vec<String>,

    /// TOML block-list file (overrides positional block arguments).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum number of crossbar blocks for the target device.
    #[arg(short, long, default_value_t = 10)]
    pub max_num_blocks: usize,

    /// Fill unused crossbar slots with loopback FIFOs.
    #[arg(long)]
    pub fill_with_fifos: bool,

    /// Device to be programmed (x300, x310, e310, e320, n300, n310, n320).
    #[arg(short, long, default_value = "x310")]
    pub device: String,

    /// Root of the FPGA build tree containing `top/<device_dir>/`.
    #[arg(short, long, default_value = ".")]
    pub base_dir: PathBuf,

    /// Write the instantiation file here instead of into the build tree.
    #[arg(short, long)]
    pub outfile: Option<PathBuf>,

    /// Out-of-tree module directory to register (repeatable).
    #[arg(short = 'I', long = "include-dir")]
    pub include_dirs: Vec<PathBuf>,

    /// Use a pre-made instantiation file instead of generating one.
    #[arg(long)]
    pub inst_src: Option<PathBuf>,
}

/// Arguments for the `weft build` subcommand.
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Artifact-generation arguments, identical to `weft generate`.
    #[command(flatten)]
    pub generate: GenerateArgs,

    /// Build target (default derived from the device).
    #[arg(short, long)]
    pub target: Option<String>,

    /// Clean the IP before building.
    #[arg(long)]
    pub clean_all: bool,

    /// Open the vendor GUI during the build.
    #[arg(long)]
    pub gui: bool,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate(ref args) => generate::run(args, cli.quiet),
        Command::Build(ref args) => build::run(args, cli.quiet),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
