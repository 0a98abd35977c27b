//! Validator configuration.
//!
//! Defaults reproduce the classic behavior: messages joined with `<br>`,
//! unknown simple rules ignored. Configurations can be built in code or
//! loaded from YAML/JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default marker placed between messages in an outcome.
pub const DEFAULT_SEPARATOR: &str = "<br>";

/// Default cap on the compiled size of a `regex` rule pattern (1 MiB).
pub const DEFAULT_REGEX_SIZE_LIMIT: usize = 1 << 20;

/// Errors that can occur when loading a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

/// What to do with a simple rule name no built-in rule answers to.
///
/// Unknown parameterized rules are always reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownRulePolicy {
    /// Skip the atom without a message.
    #[default]
    Ignore,

    /// Append `Unknown validation rule: {name}`.
    Report,
}

/// Configuration for a [`Validator`](crate::Validator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Placed between messages when an outcome joins them
    pub separator: String,

    /// Handling of unknown simple rule names
    pub unknown_simple_rules: UnknownRulePolicy,

    /// Compiled size limit for `regex` rule patterns, in bytes
    pub regex_size_limit: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            unknown_simple_rules: UnknownRulePolicy::Ignore,
            regex_size_limit: DEFAULT_REGEX_SIZE_LIMIT,
        }
    }
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_unknown_simple_rules(mut self, policy: UnknownRulePolicy) -> Self {
        self.unknown_simple_rules = policy;
        self
    }

    pub fn with_regex_size_limit(mut self, limit: usize) -> Self {
        self.regex_size_limit = limit;
        self
    }

    /// Parse a config from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: ValidatorConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config from JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ValidatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Check the config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.regex_size_limit == 0 {
            return Err(ConfigError::InvalidValue(
                "regex_size_limit must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
