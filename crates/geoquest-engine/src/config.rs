//! Configuration loading and typed config structures for the engine.
//!
//! The canonical configuration lives in `geoquest-config.yaml` at the project
//! root. Every field has a default, so an empty or missing file yields a
//! working configuration.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
///
/// Mirrors the structure of `geoquest-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Activation evaluation settings.
    #[serde(default)]
    pub activation: ActivationConfig,

    /// Reference host (game session) settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `GEOQUEST_LOG_LEVEL` overrides `logging.level`
    /// - `GEOQUEST_EDITOR_MODE` (`true`/`false`) overrides `session.editor_mode`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty mapping.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Override values with environment variables when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("GEOQUEST_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("GEOQUEST_EDITOR_MODE") {
            if let Ok(enabled) = val.trim().parse::<bool>() {
                self.session.editor_mode = enabled;
            }
        }
    }
}

/// Activation evaluation settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ActivationConfig {
    /// GPS quality gate in meters.
    ///
    /// When set, a fix whose accuracy radius exceeds this value is treated as
    /// no fix at all for radius activation. Unset means every fix counts.
    #[serde(default)]
    pub max_accuracy_m: Option<f64>,
}

/// Reference host settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    /// Reject locally-originated opens of tasks that are not reachable.
    #[serde(default = "default_true")]
    pub require_reachable: bool,

    /// Start sessions in organizer view, where every task is visible.
    #[serde(default)]
    pub editor_mode: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            require_reachable: true,
            editor_mode: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error), used when `RUST_LOG`
    /// is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.activation.max_accuracy_m.is_none());
        assert!(config.session.require_reachable);
        assert!(!config.session.editor_mode);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
activation:
  max_accuracy_m: 50.0

session:
  require_reachable: false
  editor_mode: true

logging:
  level: debug
";
        let config = EngineConfig::parse(yaml);
        assert!(config.is_ok(), "{config:?}");
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.activation.max_accuracy_m, Some(50.0));
        assert!(!config.session.require_reachable);
        assert!(config.session.editor_mode);
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = EngineConfig::parse("session:\n  editor_mode: true\n");
        let config = config.ok().unwrap_or_default();

        assert!(config.session.editor_mode);
        // Everything else uses defaults
        assert!(config.session.require_reachable);
        assert!(config.activation.max_accuracy_m.is_none());
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(EngineConfig::parse("").is_ok());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let result = EngineConfig::parse("session: [unterminated");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("geoquest-config.yaml");
        if path.exists() {
            let config = EngineConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
