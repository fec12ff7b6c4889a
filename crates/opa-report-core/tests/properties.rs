//! Property-based tests for pipeline invariants.

use proptest::prelude::*;

use opa_report_core::{build_report, split_no_test_files, ReportConfig, ReportInputs, TestStatus};
use opa_report_core::types::any_failed;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// One test file section: name plus pass/fail outcome per assertion.
fn arb_section() -> impl Strategy<Value = (String, Vec<bool>)> {
    ("[a-z]{1,8}", prop::collection::vec(any::<bool>(), 0..6))
}

fn render_log(sections: &[(String, Vec<bool>)]) -> String {
    let mut log = String::new();
    for (i, (name, outcomes)) in sections.iter().enumerate() {
        log.push_str(&format!("./{name}{i}_test.rego:\n"));
        for (j, pass) in outcomes.iter().enumerate() {
            let verdict = if *pass { "PASS" } else { "FAIL" };
            log.push_str(&format!("data.{name}.test_{j}: {verdict} (1ms)\n"));
        }
    }
    log
}

fn arb_untested() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            "[a-z]{1,8}".prop_map(|f| format!("./{f}.rego")),
            Just(String::new()),
            Just("   ".to_string()),
        ],
        0..5,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn failure_flag_matches_results(sections in prop::collection::vec(arb_section(), 1..6)) {
        let log = render_log(&sections);
        let inputs = ReportInputs { test_output: Some(&log), coverage_output: None };
        let outcome = build_report(&ReportConfig::default(), &inputs).unwrap();

        prop_assert_eq!(outcome.tests_failed, any_failed(&outcome.results));
        let expected = sections.iter().any(|(_, o)| o.iter().any(|pass| !pass));
        prop_assert_eq!(outcome.tests_failed, expected);
    }

    #[test]
    fn rows_are_sections_plus_untested_files(
        sections in prop::collection::vec(arb_section(), 1..6),
        untested in arb_untested(),
    ) {
        let log = render_log(&sections);
        let config = ReportConfig {
            no_test_files: untested.clone(),
            ..ReportConfig::default()
        };
        let inputs = ReportInputs { test_output: Some(&log), coverage_output: None };
        let outcome = build_report(&config, &inputs).unwrap();

        let non_blank = untested.iter().filter(|f| !f.trim().is_empty()).count();
        prop_assert_eq!(outcome.results.len(), sections.len() + non_blank);

        let no_tests = outcome
            .results
            .iter()
            .filter(|r| r.status == TestStatus::NoTests)
            .count();
        prop_assert_eq!(no_tests, non_blank);
        // Untested files never flip the failure flag.
        prop_assert_eq!(
            outcome.tests_failed,
            sections.iter().any(|(_, o)| o.contains(&false))
        );
    }

    #[test]
    fn report_has_one_line_per_row(sections in prop::collection::vec(arb_section(), 0..6)) {
        let log = render_log(&sections);
        let inputs = ReportInputs { test_output: Some(&log), coverage_output: None };
        if let Ok(outcome) = build_report(&ReportConfig::default(), &inputs) {
            prop_assert_eq!(outcome.report.lines().count(), 4 + outcome.results.len());
        }
    }

    #[test]
    fn split_drops_only_blank_lines(untested in arb_untested()) {
        let joined = untested.join("\n");
        let split = split_no_test_files(&joined);
        let expected: Vec<String> = untested
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .map(String::from)
            .collect();
        prop_assert_eq!(split, expected);
    }
}
