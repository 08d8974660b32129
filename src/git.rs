use std::path::Path;

use crate::error::{Error, Result};
use crate::process::{Invocation, ProcessRunner};

/// Build `git clone [-b <branch>] <url> <target_dir>`.
///
/// This uses the system git command, which automatically handles:
/// - SSH keys from ~/.ssh/
/// - Git credential helpers
/// - Any authentication configured in ~/.gitconfig
pub fn clone_invocation(
    git_path: &Path,
    url: &str,
    branch: Option<&str>,
    target_dir: &Path,
) -> Invocation {
    let mut invocation = Invocation::new(git_path).arg("clone");
    if let Some(branch) = branch {
        invocation = invocation.arg("-b").arg(branch);
    }
    invocation.arg(url).arg(target_dir)
}

/// What `rev-parse --abbrev-ref HEAD` prints when no branch is checked out.
pub const DETACHED_HEAD: &str = "HEAD";

/// Name of the branch checked out in `repo_dir`, or [`DETACHED_HEAD`].
pub fn current_branch(
    runner: &dyn ProcessRunner,
    git_path: &Path,
    repo_dir: &Path,
) -> Result<String> {
    let invocation = Invocation::new(git_path)
        .arg("rev-parse")
        .arg("--abbrev-ref")
        .arg("HEAD")
        .current_dir(repo_dir);

    Ok(stdout_of(runner, &invocation)?.trim().to_string())
}

/// Tags pointing at the commit checked out in `repo_dir`.
pub fn tags_at_head(
    runner: &dyn ProcessRunner,
    git_path: &Path,
    repo_dir: &Path,
) -> Result<Vec<String>> {
    let invocation = Invocation::new(git_path)
        .arg("tag")
        .arg("--points-at")
        .arg("HEAD")
        .current_dir(repo_dir);

    Ok(stdout_of(runner, &invocation)?
        .lines()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect())
}

fn stdout_of(runner: &dyn ProcessRunner, invocation: &Invocation) -> Result<String> {
    let output = runner.run_captured(invocation)?;
    if !output.success() {
        return Err(Error::Process {
            program: invocation.program_name(),
            source: std::io::Error::other(output.stderr_lossy().trim().to_string()),
        });
    }
    Ok(output.stdout_lossy())
}
