//! # Failure Hints
//!
//! Helpers that pair a failure with a suggestion for fixing it, so that
//! reports tell the operator what went wrong AND what to try next.

use std::path::Path;

use crate::error::Error;

/// Hint for a `git` process that could not be started or failed.
pub fn git_failure(git_path: &Path, error: &Error) -> String {
    match error {
        Error::Process { source, .. } if source.kind() == std::io::ErrorKind::NotFound => format!(
            "{error}\n  hint: Install git or set git_path (currently '{}')",
            git_path.display()
        ),
        _ => error.to_string(),
    }
}

/// Hint for a build tool that could not be started.
pub fn build_tool_failure(msbuild_path: &Path, error: &Error) -> String {
    match error {
        Error::Process { source, .. } if source.kind() == std::io::ErrorKind::NotFound => format!(
            "{error}\n  hint: Check msbuild_path or pass --msbuild (currently '{}')",
            msbuild_path.display()
        ),
        _ => error.to_string(),
    }
}

/// Hint appended to a missing-solution error at the CLI boundary.
pub fn solution_not_found(solution_path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Solution file not found: {path}\n\n\
         hint: Check that the clone succeeded and the branch contains the solution\n\
         hint: Use --solution to point at a different .sln file",
        path = solution_path.display()
    )
}
