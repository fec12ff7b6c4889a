//! Fuzz target for the coverage dump scanner.

#![no_main]
use std::collections::HashSet;

use libfuzzer_sys::fuzz_target;
use opa_report_parse::parse_coverage_output;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let results = parse_coverage_output(s);
        let mut seen = HashSet::new();
        for r in &results {
            assert!(seen.insert(r.file.as_str()), "duplicate file {}", r.file);
        }
    }
});
