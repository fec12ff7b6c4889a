//! Fuzz target for rendering.
//!
//! Input is split at the first NUL byte into a test log and a coverage
//! dump; both are parsed and rendered with and without the coverage column.

#![no_main]
use libfuzzer_sys::fuzz_target;
use opa_report_format::{format_results, render_json};
use opa_report_parse::{parse_coverage_output, parse_test_output};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let (log, dump) = s.split_once('\0').unwrap_or((s, ""));
    let results = parse_test_output(log);
    let coverage = parse_coverage_output(dump);

    for show_coverage in [false, true] {
        let a = format_results(&results, &coverage, show_coverage);
        let b = format_results(&results, &coverage, show_coverage);
        assert_eq!(a, b);
        assert_eq!(a.lines().count(), 4 + results.len());
    }
    let _ = render_json(&results, &coverage);
});
