//! Pipeline errors.

use thiserror::Error;

/// Report published in place of the table when the pipeline cannot run.
pub const ERROR_REPORT: &str = "⛔️⛔️ An unknown error has occurred in generating the results, either from tests failing or an error running OPA or an issue with GitHub Actions. View the logs for more information. ⛔️⛔️";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no test output provided (set `test_result` or pass --test-result)")]
    MissingTestOutput,
}
