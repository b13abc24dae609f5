//! Dashboard Configuration
//! Defaults, overridden by an optional JSON file, overridden by command-line flags.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory holding `result1.csv` … `result10.csv`.
    pub results_dir: PathBuf,
    /// Groups kept in the delay cause charts.
    pub top_n: usize,
    pub export_width: u32,
    pub export_height: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("result"),
            top_n: 10,
            export_width: 1200,
            export_height: 700,
        }
    }
}

impl DashboardConfig {
    /// Load from a JSON file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply command-line overrides and check the result.
    pub fn with_overrides(
        mut self,
        results_dir: Option<PathBuf>,
        top_n: Option<usize>,
    ) -> Result<Self, ConfigError> {
        if let Some(dir) = results_dir {
            self.results_dir = dir;
        }
        if let Some(n) = top_n {
            self.top_n = n;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be at least 1".to_string()));
        }
        if self.export_width == 0 || self.export_height == 0 {
            return Err(ConfigError::Invalid(
                "export_width and export_height must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.json");
        fs::write(&path, r#"{ "results_dir": "data/result", "top_n": 5 }"#).unwrap();

        let config = DashboardConfig::from_file(&path).unwrap();
        assert_eq!(config.results_dir, PathBuf::from("data/result"));
        assert_eq!(config.top_n, 5);
        assert_eq!(config.export_width, 1200);
    }

    #[test]
    fn flags_override_file_values() {
        let config = DashboardConfig::default()
            .with_overrides(Some(PathBuf::from("elsewhere")), Some(3))
            .unwrap();
        assert_eq!(config.results_dir, PathBuf::from("elsewhere"));
        assert_eq!(config.top_n, 3);
    }

    #[test]
    fn zero_top_n_is_rejected() {
        let err = DashboardConfig::default()
            .with_overrides(None, Some(0))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.json");
        fs::write(&path, "{ top_n: ").unwrap();
        assert!(matches!(
            DashboardConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
