//! Property-based tests for settings serialization.

use proptest::prelude::*;

use opa_report_settings::ReportSettings;

fn arb_settings() -> impl Strategy<Value = ReportSettings> {
    (
        prop::option::of("[A-Za-z0-9 ]{0,30}"),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(title, show_coverage, report_untested_files)| ReportSettings {
            title,
            show_coverage,
            report_untested_files,
        })
}

proptest! {
    #[test]
    fn toml_roundtrip(settings in arb_settings()) {
        let text = toml::to_string(&settings).unwrap();
        let back = ReportSettings::from_toml(&text).unwrap();
        prop_assert_eq!(back, settings);
    }
}
