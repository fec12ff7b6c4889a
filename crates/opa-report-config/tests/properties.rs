//! Property-based tests for argument parsing.

use clap::Parser;
use proptest::prelude::*;

use opa_report_config::Cli;

proptest! {
    #[test]
    fn title_round_trips(title in "[A-Za-z0-9 ]{1,40}") {
        let cli = Cli::try_parse_from(["opa-report", "--title", title.as_str()]).unwrap();
        prop_assert_eq!(cli.report.title.as_deref(), Some(title.as_str()));
    }

    #[test]
    fn boolish_toggle_values(value in prop::sample::select(vec![
        ("true", true), ("false", false), ("yes", true), ("no", false),
        ("on", true), ("off", false), ("1", true), ("0", false),
    ])) {
        let arg = format!("--report-untested-files={}", value.0);
        let cli = Cli::try_parse_from(["opa-report", arg.as_str()]).unwrap();
        prop_assert_eq!(cli.report.report_untested_files.get(), Some(value.1));
    }
}
