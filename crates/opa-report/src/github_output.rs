//! Appending step outputs to the file named by `GITHUB_OUTPUT`.
//!
//! Multi-line values use the heredoc form `name<<DELIM ... DELIM`. The
//! delimiter is derived from a blake3 hash of the value, so it cannot
//! collide with a line of the report.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Output carrying the markdown report.
pub const PARSED_RESULTS: &str = "parsed_results";
/// Output carrying `true` or `false`.
pub const TESTS_FAILED: &str = "tests_failed";

/// Append `parsed_results` and `tests_failed` to the output file.
pub fn write_outputs(path: &Path, report: &str, tests_failed: bool) -> Result<()> {
    let mut block = String::new();
    push_multiline(&mut block, PARSED_RESULTS, report);
    block.push_str(&format!("{TESTS_FAILED}={tests_failed}\n"));

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open GitHub output file {}", path.display()))?;
    file.write_all(block.as_bytes())
        .with_context(|| format!("Failed to write GitHub output file {}", path.display()))
}

/// `ghadelimiter_<first 16 hex chars of blake3(value)>`.
pub fn heredoc_delimiter(value: &str) -> String {
    let hash = blake3::hash(value.as_bytes()).to_hex();
    format!("ghadelimiter_{}", &hash.as_str()[..16])
}

fn push_multiline(out: &mut String, name: &str, value: &str) {
    let delim = heredoc_delimiter(value);
    out.push_str(name);
    out.push_str("<<");
    out.push_str(&delim);
    out.push('\n');
    out.push_str(value);
    if !value.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&delim);
    out.push('\n');
}
