//! # Build Machine Library
//!
//! Clones one branch of a repository and builds a Visual Studio solution from
//! it with MSBuild, keeping a timestamped log of each step. It backs the
//! `build-machine` command-line tool.
//!
//! ## Quick Example
//!
//! ```no_run
//! use build_machine::config::BuildConfig;
//! use build_machine::pipeline::{self, PipelineOptions};
//! use build_machine::process::SystemRunner;
//!
//! let config = BuildConfig {
//!     repo_url: "https://github.com/example/app.git".to_string(),
//!     branch: Some("main".to_string()),
//!     ..BuildConfig::default()
//! };
//!
//! let report = pipeline::run(&SystemRunner, &config, PipelineOptions::default())?;
//! for step in report.steps() {
//!     println!("{}: {}", step.step, step.message);
//! }
//! # Ok::<(), build_machine::error::Error>(())
//! ```
//!
//! ## Execution Flow
//!
//! 1.  **Fetch** (`fetcher`): delete the working copy, then `git clone` the
//!     configured branch with its output captured in a log file.
//! 2.  **Build** (`builder`): run MSBuild against the solution in a Release
//!     x64 configuration and copy the produced binaries to the output
//!     directory.
//!
//! A failed fetch or build is reported, not raised; the build runs even when
//! the fetch failed. Only a missing solution file aborts a run.

pub mod builder;
pub mod config;
pub mod defaults;
pub mod error;
pub mod fetcher;
pub mod filesystem;
pub mod git;
pub mod logfile;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod report;
pub mod suggestions;
