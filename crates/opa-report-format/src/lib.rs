//! # opa-report-format
//!
//! **Tier 2 (Formatting)**
//!
//! Renders parsed test results, optionally joined with coverage, as the
//! markdown table posted to pull requests. A JSON rendering of the same
//! records is available for machine consumers.
//!
//! ## What belongs here
//! * Markdown table rendering
//! * Test-file to coverage-file correlation
//! * JSON receipt rendering
//!
//! ## What does NOT belong here
//! * Parsing raw tool output
//! * Reading inputs or writing pipeline outputs

mod correlate;

use serde::Serialize;

use opa_report_types::{any_failed, CoverageResult, TestResult, TestStatus};

pub use correlate::find_coverage;
pub use opa_report_types::DEFAULT_TITLE;

/// Details text for a policy file that has no test file.
pub const NO_TEST_FILE_TEXT: &str = "No test file found";

const COVERAGE_NOT_FOUND: &str = "N/A";

/// Rendering knobs for [`render_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub title: String,
    pub show_coverage: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            show_coverage: false,
        }
    }
}

/// Render the report with the default title.
pub fn format_results(
    results: &[TestResult],
    coverage: &[CoverageResult],
    show_coverage: bool,
) -> String {
    let opts = RenderOptions {
        show_coverage,
        ..RenderOptions::default()
    };
    render_report(results, coverage, &opts)
}

/// Render the markdown report: heading, table header, one row per result.
pub fn render_report(
    results: &[TestResult],
    coverage: &[CoverageResult],
    opts: &RenderOptions,
) -> String {
    let mut s = String::new();
    s.push_str(&format!("# {}\n\n", opts.title));

    if opts.show_coverage {
        s.push_str("| File | Status | Passed | Total | Coverage | Details |\n");
        s.push_str("|------|--------|--------|-------|----------|----------|\n");
    } else {
        s.push_str("| File | Status | Passed | Total | Details |\n");
        s.push_str("|------|--------|--------|-------|----------|\n");
    }

    for result in results {
        s.push_str(&format!(
            "| {} | {} | {} | {} ",
            result.file,
            status_label(result.status),
            result.passed,
            result.total
        ));

        if opts.show_coverage {
            s.push_str(&format!(
                "| {} ",
                coverage_cell(find_coverage(&result.file, coverage))
            ));
        }

        s.push_str(&format!(
            "| <details><summary>Show Details</summary>{}</details> |\n",
            details_text(result)
        ));
    }

    s
}

fn status_label(status: TestStatus) -> &'static str {
    match status {
        TestStatus::Pass => "✅ PASS",
        TestStatus::Fail => "❌ FAIL",
        TestStatus::NoTests => "⚠️ NO TESTS",
    }
}

fn details_text(result: &TestResult) -> String {
    match result.status {
        TestStatus::NoTests => NO_TEST_FILE_TEXT.to_string(),
        _ => result.details.join("<br>"),
    }
}

/// `"<pct>% <uncovered block>"`; the block is empty when there is nothing to list.
fn coverage_cell(info: Option<&CoverageResult>) -> String {
    let Some(info) = info else {
        return format!("{COVERAGE_NOT_FOUND} ");
    };
    let uncovered = if info.has_uncovered_lines() {
        format!(
            "<details><summary>Uncovered Lines</summary>{}</details>",
            info.not_covered_lines
        )
    } else {
        String::new()
    };
    format!("{}% {}", two_decimals(info.coverage), uncovered)
}

/// Fixed two-decimal rendering with exact ties rounded up (`12.125` -> `12.13`).
///
/// `{:.2}` rounds ties to even. A binary double only sits exactly on a
/// third-decimal tie when it is an odd number of eighths.
fn two_decimals(value: f64) -> String {
    let eighths = value * 8.0;
    if eighths.is_finite() && eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        return format!("{:.2}", (value * 100.0).ceil() / 100.0);
    }
    format!("{value:.2}")
}

#[derive(Serialize)]
struct JsonReport<'a> {
    tests: &'a [TestResult],
    coverage: &'a [CoverageResult],
    tests_failed: bool,
}

/// Render the parsed records as a pretty JSON document.
pub fn render_json(
    results: &[TestResult],
    coverage: &[CoverageResult],
) -> serde_json::Result<String> {
    let report = JsonReport {
        tests: results,
        coverage,
        tests_failed: any_failed(results),
    };
    serde_json::to_string_pretty(&report)
}
