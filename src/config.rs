//! TOML-based loader configuration.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::scenario::ScenarioLimits;

/// Top-level configuration parsed from TOML.
///
/// All fields have defaults. Load from TOML with
/// [`SimprodConfig::from_toml_file`] or use [`SimprodConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimprodConfig {
    /// Scenario collection capacities.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// JSON output formatting.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Scenario collection capacities.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    /// Maximum number of zones (must be > 0).
    pub max_zones: usize,
    /// Maximum number of plants (must be > 0).
    pub max_plants: usize,
    /// Maximum number of links (must be > 0).
    pub max_links: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        let limits = ScenarioLimits::default();
        Self {
            max_zones: limits.max_zones,
            max_plants: limits.max_plants,
            max_links: limits.max_links,
        }
    }
}

impl From<&LimitsConfig> for ScenarioLimits {
    fn from(cfg: &LimitsConfig) -> Self {
        Self {
            max_zones: cfg.max_zones,
            max_plants: cfg.max_plants,
            max_links: cfg.max_links,
        }
    }
}

/// JSON output formatting.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Spaces per indentation level of pretty-printed JSON.
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

/// Largest accepted `output.indent`.
pub const MAX_INDENT: usize = 16;

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"limits.max_zones"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl SimprodConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Capacities to apply when building scenarios.
    pub fn scenario_limits(&self) -> ScenarioLimits {
        ScenarioLimits::from(&self.limits)
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let l = &self.limits;
        for (field, value) in [
            ("limits.max_zones", l.max_zones),
            ("limits.max_plants", l.max_plants),
            ("limits.max_links", l.max_links),
        ] {
            if value == 0 {
                errors.push(ConfigError {
                    field: field.into(),
                    message: "must be > 0".into(),
                });
            }
        }

        if self.output.indent > MAX_INDENT {
            errors.push(ConfigError {
                field: "output.indent".into(),
                message: format!("must be <= {MAX_INDENT}"),
            });
        }

        errors
    }
}
