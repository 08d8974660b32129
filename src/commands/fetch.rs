//! Fetch command implementation
//!
//! Replaces the working copy with a fresh clone of the configured branch. A
//! failed clone is reported but does not change the exit status.

use anyhow::Result;
use clap::Args;

use build_machine::fetcher::{self, FetchRequest};
use build_machine::output::{emoji, print_step, OutputConfig};
use build_machine::process::SystemRunner;

use super::OverrideArgs;
use crate::cli::GlobalArgs;

/// Arguments for the fetch command
#[derive(Args, Debug)]
pub struct FetchArgs {
    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Execute the fetch command
pub fn execute(args: FetchArgs, global: &GlobalArgs) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(&global.color);
    let config = super::load_config(global, args.overrides)?;

    println!(
        "{} Cloning {} ({})",
        emoji(&out, "📥", "[FETCH]"),
        config.repo_url,
        config.branch().unwrap_or("default branch")
    );

    let report = fetcher::fetch(&SystemRunner, &FetchRequest::from_config(&config));
    print_step(&out, &report);
    Ok(())
}
