//! Configuration structures for schedule extraction.

use serde::{Deserialize, Serialize};

use super::schedule::Dialect;
use crate::error::{DoorschedError, Result};

/// Main configuration for doorsched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorschedConfig {
    /// Schedule extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Schedule extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Dialect used when none is given explicitly.
    pub dialect: Dialect,

    /// Only scan pages containing this text (e.g. "Doors with hardware").
    pub page_marker: Option<String>,

    /// Number of leading first-page lines searched for a job header.
    pub job_scan_lines: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::Standard,
            page_marker: None,
            job_scan_lines: 10,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to read (0 = unlimited).
    pub max_pages: usize,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format: "json", "csv" or "text".
    pub format: String,

    /// Append summary tables to text output.
    pub include_summary: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            include_summary: false,
        }
    }
}

impl DoorschedConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| DoorschedError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| DoorschedError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: DoorschedConfig =
            serde_json::from_str(r#"{"extraction": {"dialect": "supreme"}}"#).unwrap();

        assert_eq!(config.extraction.dialect, Dialect::Supreme);
        assert_eq!(config.extraction.job_scan_lines, 10);
        assert!(config.extraction.page_marker.is_none());
        assert_eq!(config.pdf.max_pages, 0);
        assert_eq!(config.output.format, "json");
    }

    #[test]
    fn test_invalid_dialect_is_a_config_error() {
        let path = std::env::temp_dir().join(format!(
            "doorsched-config-test-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"extraction": {"dialect": "acme"}}"#).unwrap();

        let result = DoorschedConfig::from_file(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(DoorschedError::Config(_))));
    }
}
