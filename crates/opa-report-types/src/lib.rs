//! # opa-report-types
//!
//! **Tier 0 (Core Types)**
//!
//! Records produced by the `opa test` parsers and consumed by the report
//! formatter. Pure data: no parsing, no rendering, no I/O.
//!
//! ## What belongs here
//! * `TestResult` / `TestStatus` (one per test file section)
//! * `CoverageResult` / `LineRange` (one per covered file)
//! * Small derived predicates over those records
//!
//! ## What does NOT belong here
//! * Text scanning (use `opa-report-parse`)
//! * Markdown rendering (use `opa-report-format`)

use std::fmt;

use serde::{Deserialize, Serialize};

/// Detail prefix for an assertion that passed.
pub const PASS_MARKER: &str = "✅";

/// Detail prefix for an assertion that failed.
pub const FAIL_MARKER: &str = "❌";

/// Report heading used when no title is configured.
pub const DEFAULT_TITLE: &str = "🧪 OPA Rego Policy Test Results";

/// `not_covered_lines` value for a file whose coverage run failed.
pub const NOT_AVAILABLE: &str = "N/A";

/// Outcome of a test file section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TestStatus {
    #[default]
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "FAIL")]
    Fail,
    /// Synthesized for policy files that have no test file. Never parsed.
    #[serde(rename = "NO TESTS")]
    NoTests,
}

impl TestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Pass => "PASS",
            TestStatus::Fail => "FAIL",
            TestStatus::NoTests => "NO TESTS",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Results for one test file found in the `opa test` log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TestResult {
    /// Path as printed by the test runner, trailing `:` removed.
    pub file: String,
    pub status: TestStatus,
    pub passed: usize,
    pub total: usize,
    /// One entry per assertion, in log order, prefixed with a pass/fail marker.
    pub details: Vec<String>,
}

impl TestResult {
    /// Empty passing result for a freshly opened section.
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }

    /// Placeholder row for a policy file without any test file.
    pub fn no_tests(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            status: TestStatus::NoTests,
            ..Self::default()
        }
    }

    /// Record a passing assertion.
    pub fn record_pass(&mut self, name: &str) {
        self.passed += 1;
        self.total += 1;
        self.details.push(format!("{PASS_MARKER} {name}"));
    }

    /// Record a failing assertion. Flips the section to `FAIL`.
    pub fn record_fail(&mut self, name: &str) {
        self.total += 1;
        self.status = TestStatus::Fail;
        self.details.push(format!("{FAIL_MARKER} {name}"));
    }
}

/// True iff any result failed. Drives the pipeline's pass/fail signal.
pub fn any_failed(results: &[TestResult]) -> bool {
    results.iter().any(|r| r.status == TestStatus::Fail)
}

/// Inclusive range of uncovered line numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn single(line: u32) -> Self {
        Self::new(line, line)
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Render ranges in collection order as `"3, 5, 12-13"`.
pub fn render_ranges(ranges: &[LineRange]) -> String {
    ranges
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Coverage for one file found in the coverage dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CoverageResult {
    /// Path verbatim from the dump, `..` segments included.
    pub file: String,
    /// Percentage as reported, not recomputed.
    pub coverage: f64,
    #[serde(rename = "notCoveredLines")]
    pub not_covered_lines: String,
}

impl CoverageResult {
    /// Record for a file whose coverage run failed outright.
    pub fn failed(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            coverage: 0.0,
            not_covered_lines: NOT_AVAILABLE.to_string(),
        }
    }

    /// Whether there is a list of uncovered lines worth showing.
    pub fn has_uncovered_lines(&self) -> bool {
        !self.not_covered_lines.is_empty() && self.not_covered_lines != NOT_AVAILABLE
    }
}
