//! Fuzz target for `opa test -v` log parsing.
//!
//! Checks the count invariants on every parsed section.

#![no_main]
use libfuzzer_sys::fuzz_target;
use opa_report_parse::parse_test_output;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        for r in parse_test_output(s) {
            assert!(r.passed <= r.total);
            assert_eq!(r.details.len(), r.total);
        }
    }
});
