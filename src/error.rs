//! # Error Handling
//!
//! This module defines the error type shared by the `build-machine` library.
//! It uses `thiserror` to derive descriptive messages for every failure the
//! library can hand back to its caller.
//!
//! ## Two tiers
//!
//! Most failures in a build run are *soft*: a failed clone or a failed build
//! is recorded in a [`crate::report::StepReport`] and the run continues. The
//! variants below are the failures that actually propagate as `Err`:
//!
//! - **`SolutionNotFound`**: the solution file is absent at build time. This
//!   is the only condition that aborts a run.
//! - **`ConfigNotFound`** / **`ConfigParse`** / **`Yaml`**: the configuration
//!   file could not be loaded.
//! - **`Process`**: an external program could not be started or waited on.
//!   The fetcher and builder turn this into a soft failure themselves.
//! - **`Io`**: a wrapped `std::io::Error`.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for build-machine operations
#[derive(Error, Debug)]
pub enum Error {
    /// The solution file to build does not exist.
    #[error("Solution file not found: {}", path.display())]
    SolutionNotFound { path: PathBuf },

    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// The configuration file parsed but contains invalid values.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An external program could not be spawned or waited on.
    #[error("Failed to run {program}: {source}")]
    Process {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Whether this error is the "file not found" condition for a solution.
    pub fn is_solution_not_found(&self) -> bool {
        matches!(self, Error::SolutionNotFound { .. })
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
