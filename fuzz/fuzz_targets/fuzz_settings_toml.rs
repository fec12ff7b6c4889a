//! Fuzz target for `opa-report.toml` parsing.

#![no_main]
use libfuzzer_sys::fuzz_target;
use opa_report_settings::ReportSettings;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = ReportSettings::from_toml(s);
    }
});
