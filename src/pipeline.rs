//! Fetch-then-build orchestration.
//!
//! The build runs after the fetch whether or not the fetch succeeded, unless
//! the caller opts into [`PipelineOptions::halt_on_fetch_failure`]. A missing
//! solution file is the only error that propagates.

use crate::builder::{self, BuildRequest};
use crate::config::BuildConfig;
use crate::error::Result;
use crate::fetcher::{self, FetchRequest};
use crate::process::ProcessRunner;
use crate::report::{PipelineReport, StepReport};

#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    /// Skip the build when the fetch reports a failure.
    pub halt_on_fetch_failure: bool,
}

/// Fetch the configured branch, then build the configured solution.
pub fn run(
    runner: &dyn ProcessRunner,
    config: &BuildConfig,
    options: PipelineOptions,
) -> Result<PipelineReport> {
    run_observed(runner, config, options, |_| {})
}

/// Like [`run`], calling `on_step` with each report as soon as its step ends.
pub fn run_observed(
    runner: &dyn ProcessRunner,
    config: &BuildConfig,
    options: PipelineOptions,
    mut on_step: impl FnMut(&StepReport),
) -> Result<PipelineReport> {
    let fetch = fetcher::fetch(runner, &FetchRequest::from_config(config));
    on_step(&fetch);

    if !fetch.is_success() && options.halt_on_fetch_failure {
        log::warn!("Fetch failed, skipping build");
        return Ok(PipelineReport { fetch, build: None });
    }

    let build = builder::build(runner, &BuildRequest::from_config(config))?;
    on_step(&build);
    Ok(PipelineReport {
        fetch,
        build: Some(build),
    })
}
