//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. Command-line flags override what is loaded here.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use cnpj_core::Alphabet;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidValue("CNPJ_OUTPUT".to_string())),
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Root alphabet (`CNPJ_ALPHABET`, default alphanumeric)
    pub alphabet: Alphabet,

    /// Output format (`CNPJ_OUTPUT`, default text)
    pub output: OutputFormat,

    /// Check the formatted layout when validating (`CNPJ_CHECK_FORMAT`, default true)
    pub check_format: bool,

    /// tracing filter directive (`CNPJ_LOG`, default warn)
    pub log_filter: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            alphabet: Alphabet::default(),
            output: OutputFormat::default(),
            check_format: true,
            log_filter: "warn".to_string(),
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = CliConfig::default();

        let alphabet = match lookup("CNPJ_ALPHABET") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CNPJ_ALPHABET".to_string()))?,
            None => defaults.alphabet,
        };

        let output = match lookup("CNPJ_OUTPUT") {
            Some(value) => value.parse()?,
            None => defaults.output,
        };

        let check_format = match lookup("CNPJ_CHECK_FORMAT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CNPJ_CHECK_FORMAT".to_string()))?,
            None => defaults.check_format,
        };

        let log_filter = lookup("CNPJ_LOG")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.log_filter);

        Ok(CliConfig {
            alphabet,
            output,
            check_format,
            log_filter,
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.alphabet, Alphabet::Alphanumeric);
        assert!(config.check_format);
    }

    #[test]
    fn test_overrides() {
        let config = CliConfig::from_lookup(lookup(&[
            ("CNPJ_ALPHABET", "numeric"),
            ("CNPJ_OUTPUT", "JSON"),
            ("CNPJ_CHECK_FORMAT", "false"),
            ("CNPJ_LOG", "cnpj_core=debug"),
        ]))
        .unwrap();

        assert_eq!(config.alphabet, Alphabet::Numeric);
        assert_eq!(config.output, OutputFormat::Json);
        assert!(!config.check_format);
        assert_eq!(config.log_filter, "cnpj_core=debug");
    }

    #[test]
    fn test_invalid_values() {
        let err = CliConfig::from_lookup(lookup(&[("CNPJ_ALPHABET", "hex")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for CNPJ_ALPHABET");

        let err = CliConfig::from_lookup(lookup(&[("CNPJ_OUTPUT", "xml")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for CNPJ_OUTPUT");

        let err = CliConfig::from_lookup(lookup(&[("CNPJ_CHECK_FORMAT", "maybe")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for CNPJ_CHECK_FORMAT");
    }
}
