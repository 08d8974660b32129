//! # CLI Command Implementations
//!
//! Each subcommand of `build-machine` lives in its own file with an `Args`
//! struct derived with `clap` and an `execute` function that calls into the
//! `build_machine` library.
//!
//! The flags in [`OverrideArgs`] are shared by every command that works from
//! a configuration: they form the top layer over the configuration file and
//! the built-in defaults.

pub mod build;
pub mod completions;
pub mod fetch;
pub mod run;
pub mod show_config;

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use build_machine::config::{self, BuildConfig, PartialConfig};
use build_machine::error::Error;

use crate::cli::GlobalArgs;

/// Per-run overrides of configuration values
#[derive(Args, Debug, Clone, Default)]
pub struct OverrideArgs {
    /// Repository URL to clone
    #[arg(long, value_name = "URL")]
    pub repo_url: Option<String>,

    /// Branch to check out (empty for the remote's default branch)
    #[arg(short, long, value_name = "NAME")]
    pub branch: Option<String>,

    /// Working copy directory (deleted before every clone)
    #[arg(long, value_name = "DIR")]
    pub clone_dir: Option<PathBuf>,

    /// Directory the built binaries are copied to
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Directory for timestamped clone and build logs
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Path to the git executable
    #[arg(long, value_name = "PATH")]
    pub git: Option<PathBuf>,

    /// Path to the MSBuild executable
    #[arg(long, value_name = "PATH", env = "BUILD_MACHINE_MSBUILD")]
    pub msbuild: Option<PathBuf>,

    /// Solution file, relative to the clone directory unless absolute
    #[arg(short, long, value_name = "FILE")]
    pub solution: Option<PathBuf>,
}

impl From<OverrideArgs> for PartialConfig {
    fn from(args: OverrideArgs) -> Self {
        PartialConfig {
            repo_url: args.repo_url,
            branch: args.branch,
            clone_dir: args.clone_dir,
            output_dir: args.output_dir,
            log_dir: args.log_dir,
            git_path: args.git,
            msbuild_path: args.msbuild,
            solution: args.solution,
            ..PartialConfig::default()
        }
    }
}

/// Resolve the effective configuration for a command.
pub fn load_config(global: &GlobalArgs, overrides: OverrideArgs) -> Result<BuildConfig> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    config::load(global.config.as_deref(), &cwd, overrides.into()).map_err(|e| match e {
        Error::ConfigNotFound { path } => anyhow::anyhow!(
            "Configuration file not found: {}\n\n\
             hint: Drop --config to use ./{} or the built-in defaults",
            path.display(),
            build_machine::defaults::CONFIG_FILE_NAME
        ),
        other => other.into(),
    })
}

/// Turn a library error from the build step into a CLI error with hints.
pub fn build_error(error: Error) -> anyhow::Error {
    match error {
        Error::SolutionNotFound { path } => build_machine::suggestions::solution_not_found(&path),
        other => other.into(),
    }
}
