//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;

/// Build Machine - Clone a repository branch and build its solution
#[derive(Parser, Debug)]
#[command(name = "build-machine")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,
}

/// Flags shared by every subcommand
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Path to the configuration file (defaults to ./build-machine.yaml if present)
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        env = "BUILD_MACHINE_CONFIG"
    )]
    pub config: Option<PathBuf>,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clone the repository, then build the solution
    Run(commands::run::RunArgs),

    /// Clone the repository only
    Fetch(commands::fetch::FetchArgs),

    /// Build the solution from an existing clone
    Build(commands::build::BuildArgs),

    /// Print the effective configuration as YAML
    Config(commands::show_config::ShowConfigArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.global.log_level);

        match self.command {
            Commands::Run(args) => commands::run::execute(args, &self.global),
            Commands::Fetch(args) => commands::fetch::execute(args, &self.global),
            Commands::Build(args) => commands::build::execute(args, &self.global),
            Commands::Config(args) => commands::show_config::execute(args, &self.global),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Route `log` records to stderr. `RUST_LOG` takes precedence over `--log-level`.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed when running under a test harness.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
