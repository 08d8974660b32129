//! Config command implementation
//!
//! Prints the configuration a `run` would use, after the defaults, the
//! configuration file and any override flags have been layered. Useful to
//! check where logs and artifacts will land before deleting a working copy.

use anyhow::Result;
use clap::Args;

use super::OverrideArgs;
use crate::cli::GlobalArgs;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ShowConfigArgs {
    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Execute the config command
pub fn execute(args: ShowConfigArgs, global: &GlobalArgs) -> Result<()> {
    let config = super::load_config(global, args.overrides)?;
    print!("{}", config.to_yaml()?);
    Ok(())
}
