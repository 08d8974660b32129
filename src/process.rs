//! # External Process Execution
//!
//! The fetcher and builder never touch `std::process::Command` directly. They
//! describe the program to run as an [`Invocation`] and hand it to a
//! [`ProcessRunner`]. [`SystemRunner`] runs it for real; tests substitute
//! scripted runners to simulate exit codes, output and missing binaries
//! without spawning anything.
//!
//! Every invocation blocks until the child exits. There is no timeout.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Error, Result};
use crate::logfile;

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    /// Working directory for the child, inherited when `None`.
    pub current_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Program name used in messages.
    pub fn program_name(&self) -> String {
        self.program.display().to_string()
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// What a finished child process left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` when the child was killed by a signal.
    pub code: Option<i32>,
    /// Captured standard output. Empty when output went to a log file.
    pub stdout: Vec<u8>,
    /// Captured standard error. Empty when output went to a log file.
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Trait for running external programs - allows scripting in tests
pub trait ProcessRunner {
    /// Run with standard output and standard error both appended to the file
    /// at `log_path`.
    fn run_logged(&self, invocation: &Invocation, log_path: &Path) -> Result<ProcessOutput>;

    /// Run with standard output and standard error captured separately.
    fn run_captured(&self, invocation: &Invocation) -> Result<ProcessOutput>;
}

/// Runs programs on the host with `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run_logged(&self, invocation: &Invocation, log_path: &Path) -> Result<ProcessOutput> {
        let stdout = logfile::open_append(log_path)?;
        let stderr = stdout.try_clone()?;

        log::debug!("Running {} (log: {})", invocation, log_path.display());
        let status = invocation
            .command()
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .status()
            .map_err(|e| Error::Process {
                program: invocation.program_name(),
                source: e,
            })?;

        Ok(ProcessOutput {
            code: status.code(),
            ..ProcessOutput::default()
        })
    }

    fn run_captured(&self, invocation: &Invocation) -> Result<ProcessOutput> {
        log::debug!("Running {}", invocation);
        let output = invocation
            .command()
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Error::Process {
                program: invocation.program_name(),
                source: e,
            })?;

        Ok(ProcessOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
