//! # Solution Builder
//!
//! Runs MSBuild against a solution and harvests the binaries it produces.
//!
//! A missing solution file is the one hard failure in a build run and is
//! returned as [`Error::SolutionNotFound`] before anything touches the disk.
//! Every other problem (the tool failing to start, a non-zero exit, a copy
//! error) is reported as a failed [`StepReport`].
//!
//! MSBuild writes its own log through `/fileLoggerParameters:LogFile=`. The
//! builder captures the tool's standard error separately and appends it to
//! that log only when the build fails.

use std::path::{Path, PathBuf};

use crate::config::BuildConfig;
use crate::error::{Error, Result};
use crate::filesystem;
use crate::logfile::{self, LogKind};
use crate::process::{Invocation, ProcessRunner};
use crate::report::{Step, StepReport};
use crate::suggestions;

/// Parameters of a build.
#[derive(Debug, Clone)]
pub struct BuildRequest<'a> {
    pub solution_path: PathBuf,
    pub output_dir: &'a Path,
    pub log_dir: &'a Path,
    pub msbuild_path: &'a Path,
    pub configuration: &'a str,
    pub platform: &'a str,
}

impl<'a> BuildRequest<'a> {
    pub fn from_config(config: &'a BuildConfig) -> Self {
        Self {
            solution_path: config.solution_path(),
            output_dir: &config.output_dir,
            log_dir: &config.log_dir,
            msbuild_path: &config.msbuild_path,
            configuration: &config.configuration,
            platform: &config.platform,
        }
    }

    /// Where MSBuild leaves binaries: `<solution dir>/<platform>/<configuration>`.
    pub fn conventional_output_dir(&self) -> PathBuf {
        self.solution_path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(self.platform)
            .join(self.configuration)
    }

    /// The MSBuild command line, logging to `log_path`.
    pub fn invocation(&self, log_path: &Path) -> Invocation {
        Invocation::new(self.msbuild_path)
            .arg(&self.solution_path)
            .arg(format!("/p:Configuration={}", self.configuration))
            .arg(format!("/p:Platform={}", self.platform))
            .arg(format!(
                "/fileLoggerParameters:LogFile={}",
                log_path.display()
            ))
    }
}

/// Build the solution and copy its binaries to `request.output_dir`.
///
/// Returns `Err` only when the solution file does not exist.
pub fn build(runner: &dyn ProcessRunner, request: &BuildRequest<'_>) -> Result<StepReport> {
    if !request.solution_path.exists() {
        return Err(Error::SolutionNotFound {
            path: request.solution_path.clone(),
        });
    }

    let mut log_path = None;
    let report = match try_build(runner, request, &mut log_path) {
        Ok(report) => report,
        Err(e) => {
            let message = format!(
                "Error during build: {}",
                suggestions::build_tool_failure(request.msbuild_path, &e)
            );
            log::error!("{}", message);
            let report = StepReport::failed(Step::Build, message);
            match log_path {
                Some(path) => report.with_log(path),
                None => report,
            }
        }
    };
    Ok(report)
}

fn try_build(
    runner: &dyn ProcessRunner,
    request: &BuildRequest<'_>,
    log_path_out: &mut Option<PathBuf>,
) -> Result<StepReport> {
    filesystem::ensure_dir(request.output_dir)?;
    filesystem::ensure_dir(request.log_dir)?;

    let log_path = logfile::log_file_path(request.log_dir, LogKind::Build);
    *log_path_out = Some(log_path.clone());

    log::info!("Building solution: {}", request.solution_path.display());
    let output = runner.run_captured(&request.invocation(&log_path))?;

    if !output.stdout.is_empty() {
        log::debug!("Build output:\n{}", output.stdout_lossy());
    }

    if !output.success() {
        logfile::append(&log_path, &output.stderr)?;
        let message = format!("Build failed. Check log: {}", log_path.display());
        log::warn!("{}", message);
        return Ok(StepReport::failed(Step::Build, message).with_log(log_path));
    }

    log::info!("Build succeeded");
    let release_dir = request.conventional_output_dir();
    if !release_dir.is_dir() {
        let message = format!(
            "Build succeeded. No output found at: {}",
            release_dir.display()
        );
        log::warn!("{}", message);
        return Ok(StepReport::succeeded(Step::Build, message).with_log(log_path));
    }

    let artifacts = filesystem::copy_files(&release_dir, request.output_dir)?;
    let message = format!(
        "Build succeeded. {} file(s) copied to: {}",
        artifacts.len(),
        request.output_dir.display()
    );
    log::info!("{}", message);
    Ok(StepReport::succeeded(Step::Build, message)
        .with_log(log_path)
        .with_artifacts(artifacts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::testing::{Scripted, ScriptedRunner};
    use std::ffi::OsString;
    use std::fs;
    use tempfile::TempDir;

    struct Workspace {
        temp: TempDir,
        solution: PathBuf,
        output: PathBuf,
        logs: PathBuf,
    }

    fn workspace() -> Workspace {
        let temp = TempDir::new().unwrap();
        let solution_dir = temp.path().join("GitClone").join("VS_WS").join("test_build");
        fs::create_dir_all(&solution_dir).unwrap();
        let solution = solution_dir.join("test_build.sln");
        fs::write(&solution, "Microsoft Visual Studio Solution File").unwrap();
        Workspace {
            output: temp.path().join("Build"),
            logs: temp.path().join("Log"),
            solution,
            temp,
        }
    }

    fn request(ws: &Workspace) -> BuildRequest<'_> {
        BuildRequest {
            solution_path: ws.solution.clone(),
            output_dir: &ws.output,
            log_dir: &ws.logs,
            msbuild_path: Path::new("MSBuild.exe"),
            configuration: "Release",
            platform: "x64",
        }
    }

    #[test]
    fn test_missing_solution_is_hard_failure_before_spawn() {
        let ws = workspace();
        let mut req = request(&ws);
        req.solution_path = ws.temp.path().join("missing.sln");
        let runner = ScriptedRunner::new(vec![]);

        let err = build(&runner, &req).unwrap_err();

        assert!(err.is_solution_not_found());
        assert_eq!(runner.call_count(), 0);
        assert!(!ws.output.exists());
        assert!(!ws.logs.exists());
    }

    #[test]
    fn test_invocation_flags() {
        let ws = workspace();
        let req = request(&ws);
        let log = ws.logs.join("build_log_x.txt");

        let invocation = req.invocation(&log);

        assert_eq!(invocation.program, Path::new("MSBuild.exe"));
        assert_eq!(
            invocation.args,
            vec![
                ws.solution.as_os_str().to_os_string(),
                OsString::from("/p:Configuration=Release"),
                OsString::from("/p:Platform=x64"),
                OsString::from(format!("/fileLoggerParameters:LogFile={}", log.display())),
            ]
        );
    }

    #[test]
    fn test_conventional_output_dir() {
        let ws = workspace();
        let req = request(&ws);
        assert_eq!(
            req.conventional_output_dir(),
            ws.solution.parent().unwrap().join("x64").join("Release")
        );
    }

    #[test]
    fn test_success_copies_artifacts_byte_for_byte() {
        let ws = workspace();
        let release_dir = request(&ws).conventional_output_dir();
        let exe_bytes: Vec<u8> = vec![b'M', b'Z', 0x90, 0x00, 0xff];
        let dll_bytes: Vec<u8> = (0u8..=255).collect();

        let (exe, dll, dir) = (exe_bytes.clone(), dll_bytes.clone(), release_dir.clone());
        let runner = ScriptedRunner::new(vec![Scripted::Effect(Box::new(move |_: &Invocation| {
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("a.exe"), &exe).unwrap();
            fs::write(dir.join("b.dll"), &dll).unwrap();
        }))]);

        let report = build(&runner, &request(&ws)).unwrap();

        assert!(report.is_success(), "{}", report.message);
        assert_eq!(
            report.artifacts,
            vec![ws.output.join("a.exe"), ws.output.join("b.dll")]
        );
        assert_eq!(fs::read(ws.output.join("a.exe")).unwrap(), exe_bytes);
        assert_eq!(fs::read(ws.output.join("b.dll")).unwrap(), dll_bytes);
    }

    #[test]
    fn test_success_without_output_dir_leaves_output_unchanged() {
        let ws = workspace();
        fs::create_dir_all(&ws.output).unwrap();
        fs::write(ws.output.join("previous.exe"), "old build").unwrap();
        let runner = ScriptedRunner::new(vec![Scripted::ok()]);

        let report = build(&runner, &request(&ws)).unwrap();

        assert!(report.is_success());
        assert!(report.message.contains("No output found at"));
        assert!(report.artifacts.is_empty());
        let entries: Vec<_> = fs::read_dir(&ws.output).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            fs::read_to_string(ws.output.join("previous.exe")).unwrap(),
            "old build"
        );
    }

    #[test]
    fn test_failure_appends_stderr_to_log() {
        let ws = workspace();
        let runner = ScriptedRunner::new(vec![Scripted::Exit {
            code: 1,
            stdout: "Build started.",
            stderr: "error MSB1009: Project file does not exist.\n",
        }]);

        let report = build(&runner, &request(&ws)).unwrap();

        assert!(!report.is_success());
        assert!(report.message.starts_with("Build failed. Check log:"));
        let log_path = report.log_path.unwrap();
        assert!(log_path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("build_log_"));
        let logged = fs::read_to_string(&log_path).unwrap();
        assert!(logged.contains("MSB1009"));
        assert!(!logged.contains("Build started."));
        assert!(ws.output.is_dir());
    }

    #[test]
    fn test_failure_does_not_copy_existing_release_dir() {
        let ws = workspace();
        let release_dir = request(&ws).conventional_output_dir();
        fs::create_dir_all(&release_dir).unwrap();
        fs::write(release_dir.join("stale.exe"), "stale").unwrap();
        let runner = ScriptedRunner::new(vec![Scripted::fail(1, "error")]);

        let report = build(&runner, &request(&ws)).unwrap();

        assert!(!report.is_success());
        assert!(!ws.output.join("stale.exe").exists());
    }

    #[test]
    fn test_missing_build_tool_is_soft_failure() {
        let ws = workspace();
        let runner = ScriptedRunner::new(vec![Scripted::SpawnError]);

        let report = build(&runner, &request(&ws)).unwrap();

        assert!(!report.is_success());
        assert!(report.message.starts_with("Error during build"));
        assert!(report.message.contains("--msbuild"));
        assert!(ws.logs.is_dir());
        assert!(ws.output.is_dir());
    }

    #[test]
    fn test_request_from_config_resolves_solution() {
        let config = BuildConfig::default();
        let req = BuildRequest::from_config(&config);
        assert_eq!(req.solution_path, config.solution_path());
        assert!(req
            .conventional_output_dir()
            .ends_with(Path::new("test_build/x64/Release")));
    }
}
