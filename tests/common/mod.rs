//! Shared test utilities for integration and E2E tests.
//!
//! Add `mod common;` to a test file and `use common::prelude::*;`.
//!
//! Every fixture keeps the clone, output and log directories inside its own
//! temporary directory so that no test touches the built-in defaults.

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{git_available, SourceRepo};
    pub use super::TestFixture;
}

/// Whether a usable `git` is on the PATH.
#[allow(dead_code)]
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// A temporary workspace laid out like `build_result/`.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn clone_dir(&self) -> PathBuf {
        self.path().join("GitClone")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.path().join("Build")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.path().join("Log")
    }

    /// A repository URL that no clone can succeed against.
    pub fn missing_repo(&self) -> PathBuf {
        self.path().join("no-such-repo")
    }

    /// Add a file with the given path and content.
    #[allow(dead_code)]
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Write an executable shell script standing in for MSBuild.
    #[cfg(unix)]
    #[allow(dead_code)]
    pub fn fake_msbuild(&self, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.path().join("fake-msbuild.sh");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("Failed to write script");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to mark script executable");
        path
    }

    /// Names of the files in the log directory, sorted.
    #[allow(dead_code)]
    pub fn log_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.log_dir())
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    /// A command for the binary running in this fixture's directory, with
    /// every directory pointed inside the fixture.
    pub fn command(&self, subcommand: &str) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("build-machine");
        cmd.current_dir(self.path())
            .env_remove("BUILD_MACHINE_CONFIG")
            .env_remove("BUILD_MACHINE_MSBUILD")
            .env_remove("RUST_LOG")
            .arg(subcommand)
            .arg("--color")
            .arg("never")
            .arg("--clone-dir")
            .arg(self.clone_dir())
            .arg("--output-dir")
            .arg(self.output_dir())
            .arg("--log-dir")
            .arg(self.log_dir());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A local git repository with one commit on a named branch.
#[allow(dead_code)]
pub struct SourceRepo {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl SourceRepo {
    /// Create a repository whose only branch is `branch`, containing `files`.
    pub fn with_branch(branch: &str, files: &[(&str, &str)]) -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        let repo = Self { temp_dir };
        repo.git(&["init", "--quiet"]);
        repo.git(&["checkout", "--quiet", "-b", branch]);
        for (path, content) in files {
            repo.temp_dir
                .child(path)
                .write_str(content)
                .expect("Failed to write file");
        }
        repo.git(&["add", "."]);
        repo.git(&[
            "-c",
            "user.name=Build Machine Tests",
            "-c",
            "user.email=tests@example.com",
            "-c",
            "commit.gpgsign=false",
            "commit",
            "--quiet",
            "-m",
            "initial",
        ]);
        repo
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a lightweight tag `name` on the current commit.
    pub fn with_tag(self, name: &str) -> Self {
        self.git(&["tag", name]);
        self
    }

    pub fn url(&self) -> String {
        self.path().display().to_string()
    }

    fn git(&self, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .status()
            .expect("Failed to run git");
        assert!(status.success(), "git {:?} failed", args);
    }
}
