//! # opa-report-core
//!
//! This crate is the **primary library interface** for `opa-report`.
//! It runs the whole pipeline on explicit inputs: parse the test log,
//! optionally parse the coverage dump, append rows for untested policy
//! files, render the markdown report and compute the failure flag.
//!
//! Nothing here reads the environment; the caller resolves a
//! [`ReportConfig`] and hands over the raw text.
//!
//! ## Example
//!
//! ```rust
//! use opa_report_core::{build_report, ReportConfig, ReportInputs};
//!
//! let config = ReportConfig::default();
//! let inputs = ReportInputs {
//!     test_output: Some("./a_test.rego:\ndata.a.test_ok: PASS (1ms)\n"),
//!     coverage_output: None,
//! };
//! let outcome = build_report(&config, &inputs).expect("test output present");
//! assert!(!outcome.tests_failed);
//! assert!(outcome.report.contains("./a_test.rego"));
//! ```

mod error;

use tracing::debug;

use opa_report_format::{render_report, RenderOptions};
use opa_report_parse::{parse_coverage_output, parse_test_output};
use opa_report_types::any_failed;

pub use error::{ReportError, ERROR_REPORT};
pub use opa_report_settings as settings;
pub use opa_report_settings::ReportConfig;
pub use opa_report_types as types;
pub use opa_report_types::{CoverageResult, TestResult, TestStatus};

/// Raw text handed over by the pipeline step.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportInputs<'a> {
    /// Combined stdout of `opa test -v`.
    pub test_output: Option<&'a str>,
    /// Output of `opa test --coverage`.
    pub coverage_output: Option<&'a str>,
}

/// Everything the pipeline produced for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutcome {
    /// Markdown report for the PR comment.
    pub report: String,
    /// True iff any parsed test result failed.
    pub tests_failed: bool,
    /// Parsed results followed by synthesized `NO TESTS` rows.
    pub results: Vec<TestResult>,
    /// Parsed coverage; empty when coverage is off.
    pub coverage: Vec<CoverageResult>,
}

/// Run the full pipeline.
///
/// Fails only when there is no test output to report on; everything else
/// degrades to placeholder text inside the report.
pub fn build_report(
    config: &ReportConfig,
    inputs: &ReportInputs<'_>,
) -> Result<ReportOutcome, ReportError> {
    let test_output = inputs
        .test_output
        .filter(|s| !s.is_empty())
        .ok_or(ReportError::MissingTestOutput)?;

    let mut results = parse_test_output(test_output);
    debug!(sections = results.len(), "parsed test output");

    let coverage = match inputs.coverage_output {
        Some(dump) if config.show_coverage => {
            let coverage = parse_coverage_output(dump);
            debug!(files = coverage.len(), "parsed coverage output");
            coverage
        }
        _ => Vec::new(),
    };

    results.extend(
        config
            .no_test_files
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .map(TestResult::no_tests),
    );

    let opts = RenderOptions {
        title: config.title.clone(),
        show_coverage: config.show_coverage,
    };
    let report = render_report(&results, &coverage, &opts);
    let tests_failed = any_failed(&results);
    debug!(rows = results.len(), tests_failed, "rendered report");

    Ok(ReportOutcome {
        report,
        tests_failed,
        results,
        coverage,
    })
}

/// Split the newline-separated list of untested files, dropping blank lines.
pub fn split_no_test_files(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}
