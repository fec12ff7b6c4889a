use std::path::Path;

use anyhow::{Context, Result};

use opa_report_config::ReportArgs;
use opa_report_core::split_no_test_files;
use opa_report_settings::{ReportConfig, ReportSettings, DEFAULT_TITLE};

/// Load the settings file named on the command line, or discover
/// `opa-report.toml` in the working directory.
pub fn load_settings(explicit: Option<&Path>) -> Result<Option<ReportSettings>> {
    match explicit {
        Some(path) => ReportSettings::from_file(path)
            .map(Some)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => {
            let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
            ReportSettings::discover(&cwd).context("Failed to load opa-report.toml")
        }
    }
}

/// Flags and environment win over the settings file; the file wins over defaults.
pub fn resolve_config(args: &ReportArgs, settings: Option<&ReportSettings>) -> ReportConfig {
    let show_coverage = args
        .run_coverage_report
        .get()
        .or_else(|| settings.and_then(|s| s.show_coverage))
        .unwrap_or(false);
    let report_untested = args
        .report_untested_files
        .get()
        .or_else(|| settings.and_then(|s| s.report_untested_files))
        .unwrap_or(false);
    let title = non_blank(args.title.as_deref())
        .or_else(|| non_blank(settings.and_then(|s| s.title.as_deref())))
        .unwrap_or(DEFAULT_TITLE)
        .to_string();

    let no_test_files = match args.no_test_files.as_deref() {
        Some(list) if report_untested => split_no_test_files(list),
        _ => Vec::new(),
    };

    ReportConfig {
        title,
        show_coverage,
        no_test_files,
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}
