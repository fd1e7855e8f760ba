use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Settings for a reporting session.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// "auto" (default) colors only when stdout is a terminal.
    pub color: ColorChoice,

    /// Shape of the source excerpt around an error line.
    pub window: WindowConfig,

    /// Render the check-trace explanation under errors that carry one.
    pub explain_traces: bool,

    /// Added to schema-stage line numbers; the schema body starts one line
    /// below its `schema:` key in the validation document.
    pub schema_line_offset: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            color: ColorChoice::default(),
            window: WindowConfig::default(),
            explain_traces: true,
            schema_line_offset: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColorChoice {
    #[default]
    Auto,
    /// Forces ANSI output process-wide; see [`crate::style::styler_for`].
    Always,
    Never,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    /// Context lines shown above the error line.
    pub leading: usize,
    /// Context lines shown below the error line.
    pub trailing: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            leading: 3,
            trailing: 2,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse report config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

impl ReportConfig {
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded report config");
        Self::from_yaml_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = ReportConfig::from_yaml_str("").unwrap();
        assert_eq!(cfg, ReportConfig::default());
        assert_eq!(cfg.window.leading, 3);
        assert_eq!(cfg.window.trailing, 2);
        assert!(cfg.explain_traces);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let cfg = ReportConfig::from_yaml_str(
            r#"
color: never
window:
  trailing: 5
"#,
        )
        .unwrap();
        assert_eq!(cfg.color, ColorChoice::Never);
        assert_eq!(cfg.window.leading, 3);
        assert_eq!(cfg.window.trailing, 5);
        assert_eq!(cfg.schema_line_offset, 1);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ReportConfig::from_yaml_str("colour: always").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reports_missing_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("report.yaml");
        match ReportConfig::load(&missing) {
            Err(ConfigError::Read { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected read error, got {:?}", other),
        }
    }

    #[test]
    fn load_reads_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.yaml");
        std::fs::write(&path, "explain_traces: false\n").unwrap();
        let cfg = ReportConfig::load(&path).unwrap();
        assert!(!cfg.explain_traces);
    }
}
