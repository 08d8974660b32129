//! Default values for build-machine configuration.
//!
//! These are the values a run uses when neither the configuration file nor
//! the command line says otherwise.

use std::path::PathBuf;

/// Repository cloned when none is configured.
pub const REPO_URL: &str = "https://github.com/cagongman/L-SCAN_buildMachine.git";

/// Branch checked out when none is configured.
pub const BRANCH: &str = "develop";

/// Name of the configuration file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = "build-machine.yaml";

/// MSBuild shipped with Visual Studio 2019 Professional.
pub const MSBUILD_PATH: &str =
    r"C:\Program Files (x86)\Microsoft Visual Studio\2019\Professional\MSBuild\Current\Bin\MSBuild.exe";

/// Build configuration passed as `/p:Configuration=`.
pub const CONFIGURATION: &str = "Release";

/// Build platform passed as `/p:Platform=`.
pub const PLATFORM: &str = "x64";

/// Root shared by the clone, output and log directories.
pub fn build_result_root() -> PathBuf {
    PathBuf::from("..").join("build_result")
}

/// Directory the repository is cloned into.
pub fn clone_dir() -> PathBuf {
    build_result_root().join("GitClone")
}

/// Directory the build artifacts are copied into.
pub fn output_dir() -> PathBuf {
    build_result_root().join("Build")
}

/// Directory the timestamped logs are written to.
pub fn log_dir() -> PathBuf {
    build_result_root().join("Log")
}

/// Solution file, relative to the clone directory.
pub fn solution() -> PathBuf {
    PathBuf::from("VS_WS")
        .join("test_build")
        .join("test_build.sln")
}
