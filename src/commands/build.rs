//! Build command implementation
//!
//! Builds the solution found in an existing working copy and copies the
//! binaries to the output directory. Exits with an error only when the
//! solution file is missing.

use anyhow::Result;
use clap::Args;

use build_machine::builder::{self, BuildRequest};
use build_machine::output::{emoji, print_step, OutputConfig};
use build_machine::process::SystemRunner;

use super::OverrideArgs;
use crate::cli::GlobalArgs;

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Execute the build command
pub fn execute(args: BuildArgs, global: &GlobalArgs) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(&global.color);
    let config = super::load_config(global, args.overrides)?;
    let request = BuildRequest::from_config(&config);

    println!(
        "{} Building {}",
        emoji(&out, "🔨", "[BUILD]"),
        request.solution_path.display()
    );

    let report = builder::build(&SystemRunner, &request).map_err(super::build_error)?;
    print_step(&out, &report);
    Ok(())
}
