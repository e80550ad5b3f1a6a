//! Runner configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes.
//!
//! # Example YAML
//!
//! ```yaml
//! suggestions: true
//! error_exit_code: 2
//! log_level: debug
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable naming a YAML config file for the demo binary.
pub const CONFIG_ENV: &str = "ARGTREE_CONFIG";

/// Settings for a [`Runner`](crate::Runner).
///
/// # Examples
///
/// ```
/// use argtree_cli::RunnerConfig;
///
/// let config: RunnerConfig = serde_yaml::from_str("error_exit_code: 2").unwrap();
/// assert_eq!(config.error_exit_code, 2);
/// assert!(config.suggestions);
/// assert_eq!(config.log_level, "warn");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Whether the default error handler lists "Do you mean" candidates.
    pub suggestions: bool,
    /// Exit code returned when resolution fails.
    pub error_exit_code: i32,
    /// `tracing` filter used by binaries that install a subscriber.
    pub log_level: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            suggestions: true,
            error_exit_code: 1,
            log_level: "warn".to_string(),
        }
    }
}

impl RunnerConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if the file cannot be read, or
    /// [`ConfigError::YamlError`] if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if the file cannot be written, or
    /// [`ConfigError::YamlError`] if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Loads the file named by [`CONFIG_ENV`], or the defaults when unset.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load) when the variable is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_complete() {
        let yaml = r#"
suggestions: false
error_exit_code: 3
log_level: debug
"#;
        let config: RunnerConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(!config.suggestions);
        assert_eq!(config.error_exit_code, 3);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_deserialize_empty_mapping_uses_defaults() {
        let config: RunnerConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, RunnerConfig::default());
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("argtree.yml");

        let original = RunnerConfig {
            suggestions: false,
            error_exit_code: 64,
            log_level: "trace".to_string(),
        };
        original.save(&path).unwrap();

        assert_eq!(RunnerConfig::load(&path).unwrap(), original);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = RunnerConfig::load(dir.path().join("absent.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn test_load_malformed_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yml");
        std::fs::write(&path, "error_exit_code: [not, a, number]").unwrap();
        let err = RunnerConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::YamlError(_)));
    }
}
