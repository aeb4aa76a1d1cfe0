//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `EIS_*` environment variables, then command-line overrides applied by the
//! CLI. Every section may be omitted from the file.

use crate::app::services::eis_reader::RunSelection;
use crate::app::services::renamer::check_canonical_prefix;
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_CANONICAL_PREFIX, DEFAULT_OUTLIER_TOLERANCE,
    EIS_FILE_PATTERN, ENV_PREFIX,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Log levels accepted by the `logging.level` setting
const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Where to find exports and how many to read at once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Root directory searched for exports
    pub input_path: PathBuf,

    /// Main runs or the `All` copies
    pub selection: RunSelection,

    /// Glob matched against export file names
    pub file_pattern: String,

    /// Files parsed concurrently
    pub workers: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("."),
            selection: RunSelection::Main,
            file_pattern: EIS_FILE_PATTERN.to_string(),
            workers: num_cpus::get(),
        }
    }
}

/// Canonical label settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelingConfig {
    /// Study prefix of canonical labels
    pub canonical_prefix: String,
}

impl Default for LabelingConfig {
    fn default() -> Self {
        Self {
            canonical_prefix: DEFAULT_CANONICAL_PREFIX.to_string(),
        }
    }
}

/// Spectral filter settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilteringConfig {
    pub drop_negative_real: bool,
    pub drop_outliers: bool,
    pub outlier_tolerance: f64,
}

impl Default for FilteringConfig {
    fn default() -> Self {
        Self {
            drop_negative_real: true,
            drop_outliers: true,
            outlier_tolerance: DEFAULT_OUTLIER_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Complete preprocessor configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub processing: ProcessingConfig,
    pub labeling: LabelingConfig,
    pub filtering: FilteringConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Default config file location (`<config dir>/eis-preprocessor/config.toml`)
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::configuration(format!("Invalid configuration file: {}", e)))
    }

    /// Load a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;
        Self::from_toml_str(&content)
    }

    /// Defaults, then `config_file`, then environment, then `input_path`
    pub fn load_layered(input_path: Option<PathBuf>, config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env_overrides()?;

        if let Some(input_path) = input_path {
            config.processing.input_path = input_path;
        }

        debug!("Layered configuration: {:?}", config);
        Ok(config)
    }

    /// Apply `EIS_*` environment variables
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(format!("{}{}", ENV_PREFIX, key)).ok())
    }

    /// Apply overrides from a key lookup (`INPUT_PATH`, `WORKERS`, ...)
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("INPUT_PATH") {
            self.processing.input_path = PathBuf::from(value);
        }
        if let Some(value) = lookup("SELECTION") {
            self.processing.selection = match value.to_ascii_lowercase().as_str() {
                "main" => RunSelection::Main,
                "all" => RunSelection::All,
                other => {
                    return Err(Error::configuration(format!(
                        "{}SELECTION must be 'main' or 'all', got '{}'",
                        ENV_PREFIX, other
                    )));
                }
            };
        }
        if let Some(value) = lookup("FILE_PATTERN") {
            self.processing.file_pattern = value;
        }
        if let Some(value) = lookup("WORKERS") {
            self.processing.workers = parse_env("WORKERS", &value)?;
        }
        if let Some(value) = lookup("CANONICAL_PREFIX") {
            self.labeling.canonical_prefix = value;
        }
        if let Some(value) = lookup("DROP_NEGATIVE_REAL") {
            self.filtering.drop_negative_real = parse_env("DROP_NEGATIVE_REAL", &value)?;
        }
        if let Some(value) = lookup("DROP_OUTLIERS") {
            self.filtering.drop_outliers = parse_env("DROP_OUTLIERS", &value)?;
        }
        if let Some(value) = lookup("OUTLIER_TOLERANCE") {
            self.filtering.outlier_tolerance = parse_env("OUTLIER_TOLERANCE", &value)?;
        }
        if let Some(value) = lookup("LOG_LEVEL") {
            self.logging.level = value;
        }
        Ok(())
    }

    /// Check that the settings can drive a run
    pub fn validate(&self) -> Result<()> {
        if self.processing.workers == 0 {
            return Err(Error::configuration("Worker count must be greater than 0"));
        }

        glob::Pattern::new(&self.processing.file_pattern).map_err(|e| {
            Error::configuration(format!(
                "Invalid file pattern '{}': {}",
                self.processing.file_pattern, e
            ))
        })?;

        check_canonical_prefix(&self.labeling.canonical_prefix)?;

        let tolerance = self.filtering.outlier_tolerance;
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(Error::configuration(format!(
                "Outlier tolerance must be a positive number, got {}",
                tolerance
            )));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(Error::configuration(format!(
                "Unknown log level '{}' (expected one of {})",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    /// Set the worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.processing.workers = workers;
        self
    }

    /// Set the canonical label prefix
    pub fn with_canonical_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.labeling.canonical_prefix = prefix.into();
        self
    }

    /// Set the outlier tolerance
    pub fn with_outlier_tolerance(mut self, tolerance: f64) -> Self {
        self.filtering.outlier_tolerance = tolerance;
        self
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        Error::configuration(format!(
            "Invalid value '{}' for {}{}",
            value, ENV_PREFIX, key
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::NamedTempFile;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.labeling.canonical_prefix, "UCT_AST9AH");
        assert_eq!(config.filtering.outlier_tolerance, 2.0);
        assert_eq!(config.processing.file_pattern, "*_EIS00001.csv");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [filtering]
            outlier_tolerance = 3.5

            [processing]
            selection = "all"
            "#,
        )
        .unwrap();

        assert_eq!(config.filtering.outlier_tolerance, 3.5);
        assert!(config.filtering.drop_outliers);
        assert_eq!(config.processing.selection, RunSelection::All);
        assert_eq!(config.labeling, LabelingConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml_str("[filtering\n").unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_load_layered_file_then_input_override() {
        let mut file = NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            b"[processing]\ninput_path = \"/from/file\"\nworkers = 3\n",
        )
        .unwrap();

        let config =
            Config::load_layered(Some(PathBuf::from("/from/cli")), Some(file.path())).unwrap();

        assert_eq!(config.processing.input_path, PathBuf::from("/from/cli"));
        assert_eq!(config.processing.workers, 3);
    }

    #[test]
    fn test_overrides_from_lookup() {
        let mut config = Config::default();
        config
            .apply_overrides_from(lookup_from(&[
                ("WORKERS", "6"),
                ("SELECTION", "ALL"),
                ("CANONICAL_PREFIX", "STUDY2"),
                ("DROP_OUTLIERS", "false"),
                ("OUTLIER_TOLERANCE", "1.5"),
            ]))
            .unwrap();

        assert_eq!(config.processing.workers, 6);
        assert_eq!(config.processing.selection, RunSelection::All);
        assert_eq!(config.labeling.canonical_prefix, "STUDY2");
        assert!(!config.filtering.drop_outliers);
        assert_eq!(config.filtering.outlier_tolerance, 1.5);
    }

    #[test]
    fn test_overrides_reject_bad_values() {
        let mut config = Config::default();
        assert!(config.apply_overrides_from(lookup_from(&[("WORKERS", "many")])).is_err());
        assert!(config.apply_overrides_from(lookup_from(&[("SELECTION", "some")])).is_err());
    }

    #[test]
    fn test_validate_rejects_prefix_with_label_tokens() {
        for prefix in ["LAB_RT", "UCT_A01", "RUN-20", "LAB_00", "X_RT2"] {
            let err = Config::default()
                .with_canonical_prefix(prefix)
                .validate()
                .unwrap_err();
            assert!(matches!(err, Error::Configuration { .. }), "prefix {}", prefix);
        }
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        assert!(Config::default().with_workers(0).validate().is_err());
        assert!(Config::default().with_outlier_tolerance(0.0).validate().is_err());
        assert!(Config::default().with_outlier_tolerance(f64::NAN).validate().is_err());
        assert!(Config::default().with_canonical_prefix("").validate().is_err());
        assert!(Config::default().with_canonical_prefix("A B").validate().is_err());
        assert!(Config::default().with_canonical_prefix("LAB-X").validate().is_ok());

        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }
}
