//! # Repository Fetcher
//!
//! Produces a clean working copy of one branch of a remote repository.
//!
//! The existing working copy is always deleted first, read-only files
//! included, and the clone's output goes to a timestamped log file. Nothing
//! here returns `Err`: every failure, including a missing `git` binary, ends
//! up as a failed [`StepReport`] so that the build step still runs.

use std::path::{Path, PathBuf};

use crate::config::BuildConfig;
use crate::error::Result;
use crate::filesystem;
use crate::git;
use crate::logfile::{self, LogKind};
use crate::process::ProcessRunner;
use crate::report::{Step, StepReport};
use crate::suggestions;

/// Parameters of a fetch.
#[derive(Debug, Clone)]
pub struct FetchRequest<'a> {
    pub repo_url: &'a str,
    pub branch: Option<&'a str>,
    pub clone_dir: &'a Path,
    pub log_dir: &'a Path,
    pub git_path: &'a Path,
}

impl<'a> FetchRequest<'a> {
    pub fn from_config(config: &'a BuildConfig) -> Self {
        Self {
            repo_url: &config.repo_url,
            branch: config.branch(),
            clone_dir: &config.clone_dir,
            log_dir: &config.log_dir,
            git_path: &config.git_path,
        }
    }
}

/// Clone `request.repo_url` into `request.clone_dir`, replacing whatever
/// was there.
pub fn fetch(runner: &dyn ProcessRunner, request: &FetchRequest<'_>) -> StepReport {
    let mut log_path = None;
    match try_fetch(runner, request, &mut log_path) {
        Ok(report) => report,
        Err(e) => {
            let message = format!(
                "Error during git clone: {}",
                suggestions::git_failure(request.git_path, &e)
            );
            log::error!("{}", message);
            let report = StepReport::failed(Step::Fetch, message);
            match log_path {
                Some(path) => report.with_log(path),
                None => report,
            }
        }
    }
}

fn try_fetch(
    runner: &dyn ProcessRunner,
    request: &FetchRequest<'_>,
    log_path_out: &mut Option<PathBuf>,
) -> Result<StepReport> {
    let clone_dir = request.clone_dir;

    if clone_dir.exists() {
        log::info!(
            "Directory {} already exists, deleting its contents",
            clone_dir.display()
        );
        filesystem::force_remove_dir(clone_dir)?;
        log::info!("Directory {} has been cleared", clone_dir.display());
    }

    filesystem::ensure_dir(request.log_dir)?;
    let log_path = logfile::log_file_path(request.log_dir, LogKind::GitClone);
    *log_path_out = Some(log_path.clone());

    if let Some(parent) = clone_dir.parent().filter(|p| !p.as_os_str().is_empty()) {
        filesystem::ensure_dir(parent)?;
    }

    log::info!("Cloning repository: {}", request.repo_url);
    let invocation =
        git::clone_invocation(request.git_path, request.repo_url, request.branch, clone_dir);
    let output = runner.run_logged(&invocation, &log_path)?;

    if !output.success() {
        let message = format!("Git clone failed. Check log: {}", log_path.display());
        log::warn!("{}", message);
        return Ok(StepReport::failed(Step::Fetch, message).with_log(log_path));
    }

    if let Some(expected) = request.branch {
        match git::current_branch(runner, request.git_path, clone_dir) {
            // `clone -b` also accepts a tag, which leaves HEAD detached.
            Ok(actual) if actual == git::DETACHED_HEAD => {
                match git::tags_at_head(runner, request.git_path, clone_dir) {
                    Ok(tags) if tags.iter().any(|t| t == expected) => {
                        log::info!("Checked out tag '{}' (detached HEAD)", expected)
                    }
                    Ok(_) => log::warn!(
                        "HEAD is detached and no tag '{}' points at it",
                        expected
                    ),
                    Err(e) => log::warn!("Could not verify detached HEAD: {}", e),
                }
            }
            Ok(actual) if actual != expected => {
                let message = format!(
                    "Cloned branch '{}' does not match requested branch '{}'",
                    actual, expected
                );
                log::warn!("{}", message);
                return Ok(StepReport::failed(Step::Fetch, message).with_log(log_path));
            }
            Ok(_) => {}
            Err(e) => log::warn!("Could not verify checked-out branch: {}", e),
        }
    }

    let message = format!("Repository cloned to: {}", clone_dir.display());
    log::info!("{}", message);
    Ok(StepReport::succeeded(Step::Fetch, message).with_log(log_path))
}
