//! Configuration for the sample program

use anyhow::{Context, Result};
use hookscope_core::MetaMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Argument passed to the onB hook
    pub name: String,
    /// Initial meta for the demo invocation
    pub meta: MetaMap,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            name: "foo".to_string(),
            meta: MetaMap::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns the default config if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config '{}'", path.display()))
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (pretty, compact, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig {
    /// Merge with another logging config
    pub fn merge(&mut self, other: LoggingConfig) {
        if !other.level.is_empty() {
            self.level = other.level;
        }

        self.format = other.format;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_is_default() {
        let config = CliConfig::load(Path::new("does/not/exist.toml")).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.name, "foo");
        assert!(config.meta.is_empty());
    }

    #[test]
    fn test_load_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
name = "bar"

[meta]
x = 42
label = "seeded"

[logging]
level = "debug"
format = "json"
"#
        )
        .unwrap();

        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.name, "bar");
        assert_eq!(config.meta.get::<i64>("x").unwrap(), Some(42));
        assert_eq!(
            config.meta.get::<String>("label").unwrap(),
            Some("seeded".to_string())
        );
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name = \"baz\"").unwrap();

        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.name, "baz");
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name = ").unwrap();

        let err = CliConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML config"));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_logging_merge() {
        let mut config = LoggingConfig::default();
        config.merge(LoggingConfig {
            level: String::new(),
            format: LogFormat::Compact,
        });
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Compact);

        config.merge(LoggingConfig {
            level: "trace".to_string(),
            format: LogFormat::Json,
        });
        assert_eq!(config.level, "trace");
        assert_eq!(config.format, LogFormat::Json);
    }
}
