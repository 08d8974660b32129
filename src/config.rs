//! # Build Configuration
//!
//! This module defines [`BuildConfig`], the explicit set of parameters a build
//! run works from, and the logic for assembling it from layered sources.
//!
//! ## Layers
//!
//! Values are resolved in this order, later layers winning:
//!
//! 1. Built-in defaults from [`crate::defaults`].
//! 2. A YAML configuration file (`build-machine.yaml` by default).
//! 3. Overrides supplied by the caller, typically command-line flags.
//!
//! Layers 2 and 3 are both expressed as a [`PartialConfig`], where every field
//! is optional and only the fields that are present replace the lower layer.
//!
//! ## Example file
//!
//! ```yaml
//! repo_url: https://github.com/example/app.git
//! branch: release/1.2
//! clone_dir: build_result/GitClone
//! msbuild_path: C:\BuildTools\MSBuild\Current\Bin\MSBuild.exe
//! solution: src/app.sln
//! ```

use crate::defaults;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Every parameter of a build run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// URL (or local path) of the repository to clone.
    pub repo_url: String,
    /// Branch to check out. `None` clones the remote's default branch.
    pub branch: Option<String>,
    /// Working copy location. Deleted and re-cloned on every fetch.
    pub clone_dir: PathBuf,
    /// Where built artifacts are copied. Created if absent, never cleared.
    pub output_dir: PathBuf,
    /// Where the timestamped clone and build logs are written.
    pub log_dir: PathBuf,
    /// The `git` executable.
    pub git_path: PathBuf,
    /// The MSBuild executable.
    pub msbuild_path: PathBuf,
    /// Solution file. Relative paths are resolved against `clone_dir`.
    pub solution: PathBuf,
    /// Value of `/p:Configuration=`.
    pub configuration: String,
    /// Value of `/p:Platform=`.
    pub platform: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            repo_url: defaults::REPO_URL.to_string(),
            branch: Some(defaults::BRANCH.to_string()),
            clone_dir: defaults::clone_dir(),
            output_dir: defaults::output_dir(),
            log_dir: defaults::log_dir(),
            git_path: PathBuf::from("git"),
            msbuild_path: PathBuf::from(defaults::MSBUILD_PATH),
            solution: defaults::solution(),
            configuration: defaults::CONFIGURATION.to_string(),
            platform: defaults::PLATFORM.to_string(),
        }
    }
}

impl BuildConfig {
    /// The branch to clone, trimmed, treating an empty name as no branch at all.
    pub fn branch(&self) -> Option<&str> {
        self.branch
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
    }

    /// Full path of the solution file.
    ///
    /// An absolute `solution` is returned unchanged.
    pub fn solution_path(&self) -> PathBuf {
        self.clone_dir.join(&self.solution)
    }

    /// Apply every field present in `partial` on top of this configuration.
    pub fn merge(mut self, partial: PartialConfig) -> Self {
        if let Some(v) = partial.repo_url {
            self.repo_url = v;
        }
        if let Some(v) = partial.branch {
            self.branch = Some(v);
        }
        if let Some(v) = partial.clone_dir {
            self.clone_dir = v;
        }
        if let Some(v) = partial.output_dir {
            self.output_dir = v;
        }
        if let Some(v) = partial.log_dir {
            self.log_dir = v;
        }
        if let Some(v) = partial.git_path {
            self.git_path = v;
        }
        if let Some(v) = partial.msbuild_path {
            self.msbuild_path = v;
        }
        if let Some(v) = partial.solution {
            self.solution = v;
        }
        if let Some(v) = partial.configuration {
            self.configuration = v;
        }
        if let Some(v) = partial.platform {
            self.platform = v;
        }
        self
    }

    /// Check that the values can drive a run.
    pub fn validate(&self) -> Result<()> {
        if self.repo_url.trim().is_empty() {
            return Err(Error::ConfigParse {
                message: "repo_url must not be empty".to_string(),
                hint: Some("Set repo_url in the config file or pass --repo-url".to_string()),
            });
        }
        if self.solution.as_os_str().is_empty() {
            return Err(Error::ConfigParse {
                message: "solution must not be empty".to_string(),
                hint: Some("Point solution at a .sln file inside the clone".to_string()),
            });
        }
        for (name, value) in [
            ("configuration", &self.configuration),
            ("platform", &self.platform),
        ] {
            if value.trim().is_empty() {
                return Err(Error::ConfigParse {
                    message: format!("{} must not be empty", name),
                    hint: None,
                });
            }
        }
        Ok(())
    }

    /// Render the configuration as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// A configuration layer in which every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialConfig {
    pub repo_url: Option<String>,
    pub branch: Option<String>,
    pub clone_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub git_path: Option<PathBuf>,
    pub msbuild_path: Option<PathBuf>,
    pub solution: Option<PathBuf>,
    pub configuration: Option<String>,
    pub platform: Option<String>,
}

/// Parse a configuration layer from YAML text.
///
/// An empty document yields an empty layer.
pub fn parse(yaml_content: &str) -> Result<PartialConfig> {
    if yaml_content.trim().is_empty() {
        return Ok(PartialConfig::default());
    }
    let partial: Option<PartialConfig> = serde_yaml::from_str(yaml_content)?;
    Ok(partial.unwrap_or_default())
}

/// Parse a configuration layer from a file.
pub fn from_file(path: &Path) -> Result<PartialConfig> {
    let content = fs::read_to_string(path)?;
    parse(&content)
}

/// Build the effective configuration.
///
/// With an `explicit` path the file must exist. Otherwise the default file
/// name is looked up in `search_dir` and used only if present.
pub fn load(
    explicit: Option<&Path>,
    search_dir: &Path,
    overrides: PartialConfig,
) -> Result<BuildConfig> {
    let file_layer = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(Error::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            log::debug!("Loading configuration from {}", path.display());
            from_file(path)?
        }
        None => {
            let candidate = search_dir.join(defaults::CONFIG_FILE_NAME);
            if candidate.is_file() {
                log::debug!("Loading configuration from {}", candidate.display());
                from_file(&candidate)?
            } else {
                log::debug!("No configuration file found, using defaults");
                PartialConfig::default()
            }
        }
    };

    let config = BuildConfig::default().merge(file_layer).merge(overrides);
    config.validate()?;
    Ok(config)
}
