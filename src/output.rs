//! # Console Output
//!
//! Rendering of step reports for the terminal, with colour and emoji only
//! when the terminal and the user allow it.
//!
//! ## Respecting User Preferences
//!
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;

use console::style;

use crate::report::{StepReport, StepStatus};

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `--color=always` overrides `NO_COLOR`, `--color=never` forces plain
    /// output, and anything else detects support from the environment.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns the emoji when colors are enabled, otherwise the plain text.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// One line summarising a step report.
pub fn render_step(config: &OutputConfig, report: &StepReport) -> String {
    let (marker, label) = match report.status {
        StepStatus::Succeeded => (emoji(config, "✅", "[OK]"), "succeeded"),
        StepStatus::Failed => (emoji(config, "❌", "[FAIL]"), "failed"),
    };
    let heading = format!("{} {}", report.step, label);
    let heading = if !config.use_color {
        heading
    } else if report.status == StepStatus::Succeeded {
        style(heading).green().bold().to_string()
    } else {
        style(heading).red().bold().to_string()
    };
    format!("{} {}: {}", marker, heading, report.message)
}

/// Print a step report and its copied artifacts to stdout.
pub fn print_step(config: &OutputConfig, report: &StepReport) {
    println!("{}", render_step(config, report));
    for artifact in &report.artifacts {
        println!("   {}", artifact.display());
    }
}
