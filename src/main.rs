//! # Build Machine CLI
//!
//! This is the binary entry point for the `build-machine` command-line tool.
//!
//! It parses arguments with `clap`, runs the selected command and turns
//! top-level errors into a non-zero exit status. The fetch and build logic
//! lives in the `build_machine` library crate.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
