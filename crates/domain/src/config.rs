use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod check;
pub mod errors;
pub mod logging;
pub mod reports;

pub use check::{CheckConfig, ExpectConfig};
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use reports::ReportsConfig;

/// Main configuration for dns-sentinel.
///
/// Checks live in a `BTreeMap` keyed by check name, which also fixes the
/// execution and output order (sorted by name) for deterministic runs.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Named checks to run, one DNS exchange each
    #[serde(default)]
    pub checks: BTreeMap<String, CheckConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Error-report artifact configuration
    #[serde(default)]
    pub reports: ReportsConfig,
}

/// Command-line values that take precedence over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub reports_directory: Option<String>,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dns-sentinel.toml in current directory
    /// 3. Default (empty) configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("dns-sentinel.toml").exists() {
            Self::from_file("dns-sentinel.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(dir) = overrides.reports_directory {
            self.reports.directory = Some(dir);
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.checks.is_empty() {
            return Err(ConfigError::Validation(
                "no checks defined".to_string(),
            ));
        }
        for (name, check) in &self.checks {
            if check.resolver.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "check '{name}' has an empty resolver"
                )));
            }
            if check.resolve.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "check '{name}' has an empty resolve target"
                )));
            }
        }
        Ok(())
    }
}
