use anyhow::Error;

pub(crate) fn format(err: &Error) -> String {
    let mut out = format!("Error: {err:#}");
    let hints = suggestions(err);
    if !hints.is_empty() {
        out.push_str("\n\nHints:\n");
        for hint in hints {
            out.push_str("- ");
            out.push_str(&hint);
            out.push('\n');
        }
    }
    out
}

fn suggestions(err: &Error) -> Vec<String> {
    let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
    let haystack = chain.join(" | ").to_ascii_lowercase();
    let mut out: Vec<String> = Vec::new();

    if haystack.contains("no test output provided") {
        push_hint(
            &mut out,
            "Set `test_result` to the output of `opa test -v`, or pass `--test-result-file <path>`.",
        );
        push_hint(
            &mut out,
            "Check that the `opa test` step ran before this one.",
        );
    }

    if haystack.contains("no such file or directory") || haystack.contains("cannot find the file")
    {
        push_hint(&mut out, "Verify the input path exists and is readable.");
        push_hint(
            &mut out,
            "Use an absolute path to avoid working-directory confusion.",
        );
    }

    if haystack.contains("toml") && (haystack.contains("parse") || haystack.contains("unknown field"))
    {
        push_hint(
            &mut out,
            "Check `opa-report.toml`; known keys are `title`, `show_coverage` and `report_untested_files`.",
        );
    }

    if haystack.contains("github output file") {
        push_hint(
            &mut out,
            "Check that `GITHUB_OUTPUT` (or `--github-output`) points to a writable file.",
        );
    }

    out
}

fn push_hint(out: &mut Vec<String>, hint: &str) {
    if !out.iter().any(|h| h == hint) {
        out.push(hint.to_string());
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::{format, suggestions};

    #[test]
    fn suggests_for_missing_test_output() {
        let err = anyhow!("no test output provided (set `test_result` or pass --test-result)");
        let hints = suggestions(&err);
        assert!(hints.iter().any(|h| h.contains("--test-result-file")));
    }

    #[test]
    fn suggests_for_missing_file() {
        let err = anyhow!("No such file or directory (os error 2)")
            .context("Failed to read test output file nope.txt");
        let hints = suggestions(&err);
        assert!(hints.iter().any(|h| h.contains("input path exists")));
    }

    #[test]
    fn suggests_for_bad_toml() {
        let err = anyhow!("Failed to parse settings TOML: unknown field `colour`");
        let hints = suggestions(&err);
        assert!(hints.iter().any(|h| h.contains("opa-report.toml")));
    }

    #[test]
    fn no_hints_for_unrelated_errors() {
        assert!(suggestions(&anyhow!("something else")).is_empty());
        assert_eq!(format(&anyhow!("something else")), "Error: something else");
    }

    #[test]
    fn format_includes_hints_section() {
        let err = anyhow!("Failed to open GitHub output file /nope/out");
        let rendered = format(&err);
        assert!(rendered.starts_with("Error: Failed to open GitHub output file"));
        assert!(rendered.contains("Hints:"));
    }
}
