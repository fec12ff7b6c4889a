//! # opa-report-settings
//!
//! **Tier 0 (Pure Settings)**
//!
//! Clap-free configuration for the report pipeline.
//!
//! * [`ReportConfig`] is the fully resolved value the pipeline runs with.
//! * [`ReportSettings`] is the optional `opa-report.toml` file; every field
//!   may be left out and is then taken from the CLI or the defaults.
//!
//! ## What does NOT belong here
//! * Clap parsing (use `opa-report-config`)
//! * Reading test or coverage inputs

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use opa_report_types::DEFAULT_TITLE;

/// File name looked up by [`ReportSettings::discover`].
pub const SETTINGS_FILE_NAME: &str = "opa-report.toml";

/// Errors from loading report settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Resolved configuration for one report run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Markdown heading text, without the leading `# `.
    pub title: String,

    /// Add the coverage column and parse the coverage dump.
    pub show_coverage: bool,

    /// Policy files without a test file; each becomes a `NO TESTS` row.
    pub no_test_files: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            show_coverage: false,
            no_test_files: Vec::new(),
        }
    }
}

/// Contents of `opa-report.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportSettings {
    /// Report heading.
    pub title: Option<String>,

    /// Default for the coverage toggle.
    pub show_coverage: Option<bool>,

    /// Default for listing untested policy files.
    pub report_untested_files: Option<bool>,
}

impl ReportSettings {
    /// Parse settings from a TOML string.
    pub fn from_toml(s: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(s)?)
    }

    /// Load settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load `opa-report.toml` from `dir` if present.
    pub fn discover(dir: &Path) -> Result<Option<Self>, SettingsError> {
        let path = dir.join(SETTINGS_FILE_NAME);
        if path.is_file() {
            Self::from_file(&path).map(Some)
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_config_default() {
        let c = ReportConfig::default();
        assert_eq!(c.title, DEFAULT_TITLE);
        assert!(!c.show_coverage);
        assert!(c.no_test_files.is_empty());
    }

    #[test]
    fn settings_from_toml() {
        let s = ReportSettings::from_toml(
            r#"
title = "Rego checks"
show_coverage = true
"#,
        )
        .unwrap();
        assert_eq!(s.title.as_deref(), Some("Rego checks"));
        assert_eq!(s.show_coverage, Some(true));
        assert_eq!(s.report_untested_files, None);
    }

    #[test]
    fn empty_toml_is_all_unset() {
        assert_eq!(ReportSettings::from_toml("").unwrap(), ReportSettings::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ReportSettings::from_toml("show_covrage = true").unwrap_err();
        assert!(matches!(err, SettingsError::Toml(_)));
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(ReportSettings::from_toml("show_coverage = \"yes\"").is_err());
    }
}
