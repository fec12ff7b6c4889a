//! # opa-report-config
//!
//! **Tier 4 (Configuration)**
//!
//! Clap definitions for the `opa-report` command line. Every report input
//! can also be supplied through the environment variable a CI action
//! exports for it, so the binary runs unchanged as an action step.
//!
//! ## What belongs here
//! * Clap `Parser`, `Args`, `Subcommand` structs
//! * Value enums for output format and shells
//!
//! ## What does NOT belong here
//! * Resolving arguments against `opa-report.toml` (done by the binary)
//! * Reading input files

use std::convert::Infallible;
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

pub use opa_report_settings::{ReportConfig, ReportSettings};

/// `opa-report`: turn `opa test` output into a pull request comment.
///
/// Without a subcommand, builds the report from the test log (and
/// optionally the coverage dump) and prints it to stdout.
#[derive(Parser, Debug)]
#[command(name = "opa-report", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub report: ReportArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase log verbosity (-v debug, -vv trace). `OPA_REPORT_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// Output of `opa test -v`, inline.
    #[arg(long, env = "test_result", value_name = "TEXT", hide_env_values = true)]
    pub test_result: Option<String>,

    /// Read the `opa test -v` output from a file. Takes precedence over `--test-result`.
    #[arg(long, value_name = "PATH")]
    pub test_result_file: Option<PathBuf>,

    /// Output of `opa test --coverage`, inline.
    #[arg(
        long,
        env = "coverage_result",
        value_name = "TEXT",
        hide_env_values = true
    )]
    pub coverage_result: Option<String>,

    /// Read the coverage dump from a file. Takes precedence over `--coverage-result`.
    #[arg(long, value_name = "PATH")]
    pub coverage_result_file: Option<PathBuf>,

    /// Add the coverage column (true/false). Falls back to the config file, then false.
    #[arg(
        long,
        env = "run_coverage_report",
        value_name = "BOOL",
        value_parser = parse_toggle,
        default_value = "",
        hide_default_value = true,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub run_coverage_report: Toggle,

    /// List policy files without tests (true/false). Falls back to the config file, then false.
    #[arg(
        long,
        env = "report_untested_files",
        value_name = "BOOL",
        value_parser = parse_toggle,
        default_value = "",
        hide_default_value = true,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub report_untested_files: Toggle,

    /// Newline-separated policy files that have no test file.
    #[arg(long, env = "no_test_files", value_name = "LIST")]
    pub no_test_files: Option<String>,

    /// Report heading.
    #[arg(long, env = "pr_comment_title", value_name = "TEXT")]
    pub title: Option<String>,

    /// Settings file. Defaults to `opa-report.toml` in the working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format for stdout.
    #[arg(long, value_enum, default_value_t = ReportFormat::Md)]
    pub format: ReportFormat,

    /// Append `parsed_results` and `tests_failed` to this GitHub Actions output file.
    #[arg(long, env = "GITHUB_OUTPUT", value_name = "PATH")]
    pub github_output: Option<PathBuf>,
}

/// A CI on/off input that may also be left blank.
///
/// Actions export unset inputs as empty strings, so a blank value means
/// "not given" and defers to the settings file. `true`, `yes`, `on`, `y`, `t`
/// and `1` (any case) switch the toggle on; any other value switches it off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Toggle(Option<bool>);

impl Toggle {
    pub const UNSET: Toggle = Toggle(None);

    /// `None` when the input was blank or absent.
    pub fn get(self) -> Option<bool> {
        self.0
    }
}

impl From<bool> for Toggle {
    fn from(on: bool) -> Self {
        Toggle(Some(on))
    }
}

/// Value parser for [`Toggle`]. Never rejects input.
pub fn parse_toggle(value: &str) -> Result<Toggle, Infallible> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(Toggle::UNSET);
    }
    let on = matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "yes" | "on" | "y" | "t" | "1"
    );
    Ok(Toggle::from(on))
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ReportFormat {
    /// Markdown report.
    #[default]
    Md,
    /// JSON document with the parsed records.
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shell {
    Bash,
    Elvish,
    Fish,
    Powershell,
    Zsh,
}
