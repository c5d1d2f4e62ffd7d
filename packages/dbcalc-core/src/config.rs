//! Calculator configuration.
//!
//! Supports TOML config files, environment variable overrides, and defaults.

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};
use crate::params::{Field, ParameterSet};

/// Prefix for environment overrides, e.g. `DBCALC_REPLICA_COUNT=3`.
pub const ENV_PREFIX: &str = "DBCALC_";

/// How estimates are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Prose report with configuration snippet and notes
    #[default]
    Text,
    /// Parameters and results as JSON
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(CalcError::ConfigError(format!(
                "Invalid output format: {}",
                other
            ))),
        }
    }
}

/// Workload and output settings for the calculator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    /// Output format (default: text)
    pub output: OutputFormat,
    /// Workload to size (defaults: 1 master, 2000 metrics every second,
    /// 1 day retention, 50% compression, 32 MiB page cache)
    pub workload: ParameterSet,
}

impl CalcConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| CalcError::ConfigError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str)
            .map_err(|e| CalcError::ConfigError(format!("Invalid TOML: {}", e)))
    }

    /// Saves the configuration to a TOML file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| CalcError::ConfigError(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path.as_ref(), toml)
            .map_err(|e| CalcError::ConfigError(format!("Failed to write config file: {}", e)))?;
        Ok(())
    }

    /// Applies environment variable overrides.
    ///
    /// Each workload field is read from `DBCALC_<FIELD>` using its canonical
    /// name in upper case, and `DBCALC_OUTPUT` selects the output format.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| env::var(key).ok())
    }

    /// Applies overrides from any key lookup using the environment naming.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        for field in Field::ALL {
            let key = format!("{}{}", ENV_PREFIX, field.name().to_ascii_uppercase());
            if let Some(val) = lookup(&key) {
                self.workload
                    .set_field(field.name(), &val)
                    .map_err(|e| CalcError::ConfigError(format!("{}: {}", key, e)))?;
                tracing::debug!(key = %key, value = %val, "applied override");
            }
        }
        if let Some(val) = lookup(&format!("{}OUTPUT", ENV_PREFIX)) {
            self.output = val.parse()?;
        }
        Ok(())
    }
}
