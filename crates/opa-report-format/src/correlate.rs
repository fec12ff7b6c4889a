//! Matching a test file to the coverage record of the policy it tests.
//!
//! Coverage is reported for both `deny.rego` and `deny_test.rego`; the row
//! for `./tests/deny_test.rego` must show the former. A record matches when
//! its base name (`deny`) occurs in the test path and it is not the test
//! file's own record. The first match wins, so overlapping base names
//! (`deny` vs `deny_all`) resolve by dump order.

use opa_report_types::CoverageResult;

const REGO_SUFFIX: &str = ".rego";

/// Coverage record correlated with `test_file`, if any.
pub fn find_coverage<'a>(
    test_file: &str,
    coverage: &'a [CoverageResult],
) -> Option<&'a CoverageResult> {
    coverage.iter().find(|cr| covers(test_file, &cr.file))
}

fn covers(test_file: &str, coverage_file: &str) -> bool {
    let Some(base) = base_name(coverage_file) else {
        return false;
    };
    test_file.contains(base)
        && !test_file.contains(coverage_file)
        && !coverage_file.contains(test_file)
}

/// `./a/../deny.rego` -> `deny`. `None` without a `/` or `.rego`.
fn base_name(path: &str) -> Option<&str> {
    let slash = path.rfind('/')?;
    let ext = path.rfind(REGO_SUFFIX)?;
    let base = path.get(slash + 1..ext)?;
    (!base.is_empty()).then_some(base)
}
