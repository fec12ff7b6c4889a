//! Scanner for the verbose `opa test` log.
//!
//! ```text
//! ./policies/tests/deny_test.rego:
//! data.policies.test_deny_root: PASS (1.2ms)
//! data.policies.test_deny_admin: FAIL (310µs)
//! ```
//!
//! A section opens on a `./<path>.rego:` line and runs until the next one.

use opa_report_types::TestResult;

use crate::REGO_SUFFIX;

const SECTION_PREFIX: &str = "./";
const PASS_PATTERN: &str = ": PASS";
const FAIL_PATTERN: &str = ": FAIL";

/// Parse a test log into one result per section, in log order.
pub fn parse_test_output(output: &str) -> Vec<TestResult> {
    let mut results = Vec::new();
    let mut current: Option<TestResult> = None;

    for line in output.lines() {
        if let Some(file) = section_file(line) {
            results.extend(current.take());
            current = Some(TestResult::new(file));
            continue;
        }

        // Lines before the first section (the FAILURES block) are noise.
        let Some(result) = current.as_mut() else {
            continue;
        };

        if line.contains(PASS_PATTERN) {
            result.record_pass(assertion_name(line));
        } else if line.contains(FAIL_PATTERN) {
            result.record_fail(assertion_name(line));
        }
    }

    results.extend(current);
    results
}

/// File path of a section header line, trailing separators stripped.
fn section_file(line: &str) -> Option<&str> {
    let path = line.strip_suffix(':')?;
    if line.starts_with(SECTION_PREFIX) && path.ends_with(REGO_SUFFIX) {
        Some(path)
    } else {
        None
    }
}

/// Qualified assertion name: everything before the first `:`.
fn assertion_name(line: &str) -> &str {
    line.split(':').next().unwrap_or(line)
}
