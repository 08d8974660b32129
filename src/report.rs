//! Structured outcomes of the fetch and build steps.
//!
//! A soft failure is a [`StepReport`] with [`StepStatus::Failed`], not an
//! `Err`. Callers decide whether a failed step should stop a pipeline.

use std::fmt;
use std::path::PathBuf;

/// The two steps of a build run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Fetch,
    Build,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Fetch => write!(f, "fetch"),
            Step::Build => write!(f, "build"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Succeeded,
    Failed,
}

/// Outcome of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub step: Step,
    pub status: StepStatus,
    /// Operator-facing summary.
    pub message: String,
    /// Log file for this step, once its path has been computed.
    pub log_path: Option<PathBuf>,
    /// Files copied into the output directory.
    pub artifacts: Vec<PathBuf>,
}

impl StepReport {
    pub fn succeeded(step: Step, message: impl Into<String>) -> Self {
        Self {
            step,
            status: StepStatus::Succeeded,
            message: message.into(),
            log_path: None,
            artifacts: Vec::new(),
        }
    }

    pub fn failed(step: Step, message: impl Into<String>) -> Self {
        Self {
            step,
            status: StepStatus::Failed,
            message: message.into(),
            log_path: None,
            artifacts: Vec::new(),
        }
    }

    pub fn with_log(mut self, log_path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(log_path.into());
        self
    }

    pub fn with_artifacts(mut self, artifacts: Vec<PathBuf>) -> Self {
        self.artifacts = artifacts;
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == StepStatus::Succeeded
    }
}

/// Outcome of a fetch followed by a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub fetch: StepReport,
    /// `None` only when the pipeline halted after a failed fetch.
    pub build: Option<StepReport>,
}

impl PipelineReport {
    /// Whether every step that ran succeeded and none was skipped.
    pub fn is_success(&self) -> bool {
        self.fetch.is_success() && self.build.as_ref().is_some_and(StepReport::is_success)
    }

    /// Reports of the steps that ran, in order.
    pub fn steps(&self) -> impl Iterator<Item = &StepReport> {
        std::iter::once(&self.fetch).chain(self.build.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_set_status_and_log() {
        let report = StepReport::failed(Step::Fetch, "Git clone failed").with_log("logs/x.txt");
        assert!(!report.is_success());
        assert_eq!(report.log_path, Some(PathBuf::from("logs/x.txt")));
        assert!(report.artifacts.is_empty());
    }

    #[test]
    fn test_pipeline_success_requires_build() {
        let halted = PipelineReport {
            fetch: StepReport::succeeded(Step::Fetch, "ok"),
            build: None,
        };
        assert!(!halted.is_success());
        assert_eq!(halted.steps().count(), 1);

        let full = PipelineReport {
            fetch: StepReport::succeeded(Step::Fetch, "ok"),
            build: Some(StepReport::succeeded(Step::Build, "ok")),
        };
        assert!(full.is_success());
        assert_eq!(full.steps().count(), 2);
    }
}
