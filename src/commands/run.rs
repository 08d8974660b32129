//! Run command implementation
//!
//! Clones the configured branch, then builds the solution. A failed clone is
//! reported and the build still runs unless `--halt-on-fetch-failure` is set.

use anyhow::Result;
use clap::Args;

use build_machine::output::{emoji, print_step, OutputConfig};
use build_machine::pipeline::{self, PipelineOptions};
use build_machine::process::SystemRunner;
use build_machine::report::Step;

use super::OverrideArgs;
use crate::cli::GlobalArgs;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// Skip the build when the clone fails
    #[arg(long)]
    pub halt_on_fetch_failure: bool,
}

/// Execute the run command
pub fn execute(args: RunArgs, global: &GlobalArgs) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(&global.color);
    let config = super::load_config(global, args.overrides)?;
    let options = PipelineOptions {
        halt_on_fetch_failure: args.halt_on_fetch_failure,
    };

    println!(
        "{} Cloning {} ({})",
        emoji(&out, "📥", "[FETCH]"),
        config.repo_url,
        config.branch().unwrap_or("default branch")
    );

    let solution_path = config.solution_path();
    let report = pipeline::run_observed(&SystemRunner, &config, options, |step| {
        print_step(&out, step);
        let builds_next = step.is_success() || !options.halt_on_fetch_failure;
        if step.step == Step::Fetch && builds_next {
            println!(
                "{} Building {}",
                emoji(&out, "🔨", "[BUILD]"),
                solution_path.display()
            );
        }
    })
    .map_err(super::build_error)?;

    if report.build.is_none() {
        println!(
            "{} Build skipped because the clone failed",
            emoji(&out, "⏭️", "[SKIP]")
        );
    }

    Ok(())
}
