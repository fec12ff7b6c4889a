//! # opa-report-parse
//!
//! **Tier 1 (Parsing)**
//!
//! Line scanners that turn the two text outputs of `opa test` into records:
//!
//! * [`parse_test_output`] reads the verbose test log (`opa test -v`).
//! * [`parse_coverage_output`] reads the coverage dump (`opa test --coverage`).
//!
//! Neither scanner fails. Lines they do not recognise are skipped, so stack
//! traces, timing output and summary banners pass through harmlessly.
//!
//! ## What does NOT belong here
//! * Matching tests to coverage (use `opa-report-format`)
//! * Reading inputs from the environment or files

mod coverage;
mod test_log;

pub use coverage::{parse_coverage_output, FAILED_COVERAGE_MARKER};
pub use test_log::parse_test_output;

/// File suffix of Rego policy and test files.
pub const REGO_SUFFIX: &str = ".rego";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_parsers_accept_empty_input() {
        assert!(parse_test_output("").is_empty());
        assert!(parse_coverage_output("").is_empty());
    }
}
