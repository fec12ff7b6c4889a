//! Scanner for the `opa test --coverage` dump.
//!
//! The dump is JSON-shaped but not reliably valid JSON once it has been
//! captured from a CI step (interleaved messages, inconsistent nesting), so it
//! is read as a sequence of trimmed lines driven by a small state machine:
//!
//! ```text
//! "./policies/deny.rego": {        <- opens a file section
//!   "not_covered": [               <- enters range scanning
//!     {                            <- one range object
//!       "start": { "row": 12 },
//!       "end": { "row": 15 }
//!     }
//!   ],
//!   "coverage": 80                 <- sets the percentage
//! }
//! ```

use std::collections::HashSet;

use opa_report_types::{render_ranges, CoverageResult, LineRange};

/// Message emitted by the CI step when coverage could not be computed for a file.
pub const FAILED_COVERAGE_MARKER: &str = "Coverage test failed for";

const FILE_MARKER: &str = ".rego\":";
const COVERAGE_KEY: &str = "\"coverage\":";
const NOT_COVERED_KEY: &str = "\"not_covered\":";
const ROW_KEY: &str = "\"row\":";
const OBJECT_OPEN: &str = "{";
const OBJECT_CLOSE: &str = "}";

/// Parse a coverage dump into one record per file, first occurrence wins.
pub fn parse_coverage_output(output: &str) -> Vec<CoverageResult> {
    let mut scanner = CoverageScanner::default();
    let mut lines = output.lines().map(str::trim);

    while let Some(line) = lines.next() {
        if line.contains(FILE_MARKER) {
            scanner.open_file(quoted_name(line));
        } else if scanner.in_file() && line.contains(COVERAGE_KEY) {
            if let Some(pct) = float_after(line, COVERAGE_KEY) {
                scanner.set_coverage(pct);
            }
        } else if line.contains(NOT_COVERED_KEY) {
            scanner.in_not_covered = true;
        } else if scanner.in_not_covered && line == OBJECT_OPEN {
            if let Some(range) = scan_range(&mut lines) {
                scanner.ranges.push(range);
            }
        } else if let Some(file) = failed_file(line) {
            scanner.results.push(CoverageResult::failed(file));
        }
    }

    scanner.finish()
}

#[derive(Default)]
struct CoverageScanner {
    results: Vec<CoverageResult>,
    current: Option<CoverageResult>,
    coverage_seen: bool,
    in_not_covered: bool,
    ranges: Vec<LineRange>,
}

impl CoverageScanner {
    fn in_file(&self) -> bool {
        self.current.is_some()
    }

    fn open_file(&mut self, file: &str) {
        self.flush();
        self.current = Some(CoverageResult {
            file: file.to_string(),
            ..CoverageResult::default()
        });
    }

    // The dump-wide total trails the last file section, so only the first
    // percentage inside a section counts.
    fn set_coverage(&mut self, pct: f64) {
        if self.coverage_seen {
            return;
        }
        if let Some(current) = self.current.as_mut() {
            current.coverage = pct;
            self.coverage_seen = true;
        }
    }

    fn flush(&mut self) {
        if let Some(mut done) = self.current.take() {
            done.not_covered_lines = render_ranges(&self.ranges);
            self.results.push(done);
        }
        self.ranges.clear();
        self.in_not_covered = false;
        self.coverage_seen = false;
    }

    fn finish(mut self) -> Vec<CoverageResult> {
        self.flush();
        let mut seen = HashSet::new();
        self.results.retain(|r| seen.insert(r.file.clone()));
        self.results
    }
}

/// Read one range object up to its closing brace.
///
/// The first `row` is the start, the second the end. A lone start collapses
/// to a single line; an object cut off by end of input yields nothing.
fn scan_range<'a>(lines: &mut impl Iterator<Item = &'a str>) -> Option<LineRange> {
    let mut start = None;
    let mut end = None;

    for line in lines {
        if line.contains(ROW_KEY) {
            if let Some(row) = uint_after(line, ROW_KEY) {
                if start.is_none() {
                    start = Some(row);
                } else if end.is_none() {
                    end = Some(row);
                }
            }
        } else if line == OBJECT_CLOSE {
            let start = start?;
            return Some(LineRange::new(start, end.unwrap_or(start)));
        }
    }

    None
}

/// Text between the first pair of double quotes.
fn quoted_name(line: &str) -> &str {
    line.split('"').nth(1).unwrap_or_default()
}

fn failed_file(line: &str) -> Option<&str> {
    let (_, rest) = line.split_once(FAILED_COVERAGE_MARKER)?;
    let file = rest.trim();
    (!file.is_empty()).then_some(file)
}

/// Leading `[0-9.]` run after `key`, parsed as a float.
fn float_after(line: &str, key: &str) -> Option<f64> {
    let rest = value_after(line, key)?;
    let end = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

fn uint_after(line: &str, key: &str) -> Option<u32> {
    let rest = value_after(line, key)?;
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

fn value_after<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let idx = line.find(key)?;
    Some(line[idx + key.len()..].trim_start())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range_block(start: u32, end: u32) -> String {
        format!(
            "{{\n\"start\": {{\n\"row\": {start}\n}},\n\"end\": {{\n\"row\": {end}\n}}\n}},\n"
        )
    }

    #[test]
    fn value_helpers() {
        assert_eq!(float_after("\"coverage\": 92.5,", COVERAGE_KEY), Some(92.5));
        assert_eq!(float_after("\"coverage\": 80", COVERAGE_KEY), Some(80.0));
        assert_eq!(float_after("\"coverage\": null", COVERAGE_KEY), None);
        assert_eq!(uint_after("\"row\": 40", ROW_KEY), Some(40));
        assert_eq!(uint_after("\"row\":7}", ROW_KEY), Some(7));
        assert_eq!(uint_after("\"row\": x", ROW_KEY), None);
    }

    #[test]
    fn quoted_name_takes_first_quoted_span() {
        assert_eq!(quoted_name("\"./a/../b.rego\": {"), "./a/../b.rego");
    }

    #[test]
    fn failed_file_requires_a_name() {
        assert_eq!(
            failed_file("Coverage test failed for ./x.rego"),
            Some("./x.rego")
        );
        assert_eq!(failed_file("Coverage test failed for"), None);
        assert_eq!(failed_file("Coverage passed"), None);
    }

    #[test]
    fn two_ranges_render_compactly() {
        let dump = format!(
            "{{\n\"files\": {{\n\"./p.rego\": {{\n\"not_covered\": [\n{}{}],\n\"coverage\": 50\n}}\n}}\n}}",
            range_block(10, 10),
            range_block(12, 15)
        );
        let results = parse_coverage_output(&dump);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].file, "./p.rego");
        assert_eq!(results[0].coverage, 50.0);
        assert_eq!(results[0].not_covered_lines, "10, 12-15");
    }

    #[test]
    fn covered_ranges_are_not_collected() {
        let dump = format!(
            "\"./p.rego\": {{\n\"covered\": [\n{}],\n\"not_covered\": [\n{}]\n}}",
            range_block(1, 9),
            range_block(20, 20)
        );
        let results = parse_coverage_output(&dump);
        assert_eq!(results[0].not_covered_lines, "20");
    }

    #[test]
    fn lone_start_row_collapses() {
        let dump = "\"./p.rego\": {\n\"not_covered\": [\n{\n\"row\": 7\n}\n]\n}";
        let results = parse_coverage_output(dump);
        assert_eq!(results[0].not_covered_lines, "7");
    }

    #[test]
    fn truncated_range_is_dropped() {
        let dump = "\"./p.rego\": {\n\"not_covered\": [\n{\n\"start\": {\n\"row\": 7";
        let results = parse_coverage_output(dump);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].not_covered_lines, "");
    }

    #[test]
    fn trailing_total_does_not_overwrite_last_file() {
        let dump = "{\n\"files\": {\n\"./p.rego\": {\n\"coverage\": 75\n}\n},\n\"coverage\": 90\n}";
        let results = parse_coverage_output(dump);
        assert_eq!(results[0].coverage, 75.0);
    }

    #[test]
    fn failure_marker_yields_na_record() {
        let results = parse_coverage_output("Coverage test failed for ./x.rego");
        assert_eq!(results, vec![CoverageResult::failed("./x.rego")]);
    }

    #[test]
    fn duplicates_keep_first() {
        let dump = "\"./p.rego\": {\n\"coverage\": 10\n}\n\"./p.rego\": {\n\"coverage\": 20\n}";
        let results = parse_coverage_output(dump);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].coverage, 10.0);
    }
}
