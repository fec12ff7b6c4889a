//! # opa-report
//!
//! **CLI Binary**
//!
//! Entry point for the `opa-report` command-line application.
//!
//! ## Responsibilities
//! * Parse command line arguments and environment fallbacks
//! * Resolve them against `opa-report.toml`
//! * Read inputs, run the pipeline, publish outputs
//! * Map the failure flag and errors to exit codes
//!
//! The report itself is built by `opa-report-core`.

mod config;
mod error_hints;
mod github_output;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use opa_report_config::{Cli, Commands, ReportArgs, ReportFormat};
use opa_report_core::{build_report, ReportError, ReportInputs, ERROR_REPORT};

pub use config::{load_settings, resolve_config};
pub use github_output::{heredoc_delimiter, write_outputs};

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "OPA_REPORT_LOG";

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Passed,
    TestsFailed,
}

/// Entry point used by the `opa-report` binary.
pub fn run() -> Result<RunOutcome> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Completions(args)) => {
            use clap_complete::generate;
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            let shell = match args.shell {
                opa_report_config::Shell::Bash => clap_complete::Shell::Bash,
                opa_report_config::Shell::Elvish => clap_complete::Shell::Elvish,
                opa_report_config::Shell::Fish => clap_complete::Shell::Fish,
                opa_report_config::Shell::Powershell => clap_complete::Shell::PowerShell,
                opa_report_config::Shell::Zsh => clap_complete::Shell::Zsh,
            };
            generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(RunOutcome::Passed)
        }
        None => report(&cli.report),
    }
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .try_init();
}

fn report(args: &ReportArgs) -> Result<RunOutcome> {
    let settings = load_settings(args.config.as_deref())?;
    let config = resolve_config(args, settings.as_ref());
    debug!(
        title = %config.title,
        show_coverage = config.show_coverage,
        untested = config.no_test_files.len(),
        "resolved report config"
    );

    let test_output = read_input(
        args.test_result_file.as_deref(),
        args.test_result.as_deref(),
        "test output",
    )?;
    let coverage_output = read_input(
        args.coverage_result_file.as_deref(),
        args.coverage_result.as_deref(),
        "coverage output",
    )?;
    if config.show_coverage && coverage_output.is_none() {
        warn!("coverage report requested but no coverage output was provided");
    }

    let inputs = ReportInputs {
        test_output: test_output.as_deref(),
        coverage_output: coverage_output.as_deref(),
    };

    let outcome = match build_report(&config, &inputs) {
        Ok(outcome) => outcome,
        Err(err @ ReportError::MissingTestOutput) => {
            if let Some(path) = args.github_output.as_deref() {
                write_outputs(path, ERROR_REPORT, true)?;
            }
            return Err(err.into());
        }
    };

    let rendered = match args.format {
        ReportFormat::Md => outcome.report.clone(),
        ReportFormat::Json => {
            let mut json = opa_report_format::render_json(&outcome.results, &outcome.coverage)
                .context("Failed to render JSON report")?;
            json.push('\n');
            json
        }
    };
    std::io::stdout()
        .lock()
        .write_all(rendered.as_bytes())
        .context("Failed to write report to stdout")?;

    if let Some(path) = args.github_output.as_deref() {
        write_outputs(path, &outcome.report, outcome.tests_failed)?;
    }

    Ok(if outcome.tests_failed {
        RunOutcome::TestsFailed
    } else {
        RunOutcome::Passed
    })
}

/// File contents when a path is given, else the inline text.
fn read_input(path: Option<&Path>, inline: Option<&str>, what: &str) -> Result<Option<String>> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {what} file {}", path.display()))
            .map(Some),
        None => Ok(inline.map(String::from)),
    }
}

/// Render an error chain followed by remediation hints.
pub fn format_error(err: &anyhow::Error) -> String {
    error_hints::format(err)
}
