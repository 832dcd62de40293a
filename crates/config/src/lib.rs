#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for pact
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/pact/config.toml)
//! - Environment variables
//! - CLI flags (applied by the binary)

pub mod fixed_paths;
mod repository;

pub use repository::{Repositories, RepositoryConfig, RepositoryFormat};

use pact_errors::{ConfigError, Error};
use pact_types::{Arg, FetchActionOptions, Mapping, OutputFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    /// Default options for fetch actions. Validated separately from the
    /// rest of the file so that bad keys report as action errors.
    #[serde(default, skip_deserializing)]
    pub fetch: FetchActionOptions,

    #[serde(default)]
    pub repositories: Repositories,
}

/// General configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    #[serde(default)]
    pub default_output: OutputFormat,
}

/// Top-level tables understood by [`Config::from_toml_str`]
const SECTIONS: &[&str] = &["general", "fetch", "repositories"];

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join("pact").join("config.toml"))
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for malformed TOML or bad values, and an
    /// `ActionError` if the `[fetch]` table is not a valid options mapping.
    pub fn from_toml_str(contents: &str) -> Result<Self, Error> {
        let mut table: toml::Table = toml::from_str(contents).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;

        if let Some(section) = table.keys().find(|k| !SECTIONS.contains(&k.as_str())) {
            return Err(ConfigError::Invalid {
                message: format!("unknown section [{section}]"),
            }
            .into());
        }

        let fetch = match table.remove("fetch") {
            None => FetchActionOptions::default(),
            Some(toml::Value::Table(fetch)) => fetch_options_from_table(&fetch)?,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    field: "fetch".to_string(),
                    value: other.type_str().to_string(),
                }
                .into())
            }
        };

        let mut config: Self =
            toml::Value::Table(table)
                .try_into()
                .map_err(|e: toml::de::Error| ConfigError::ParseError {
                    message: e.to_string(),
                })?;
        config.fetch = fetch;
        debug!(
            repositories = config.repositories.len(),
            safe_resume = config.fetch.safe_resume(),
            fetch_unneeded = config.fetch.fetch_unneeded(),
            "parsed configuration"
        );
        Ok(config)
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist, an I/O
    /// error if it exists but cannot be read, or any error from
    /// [`Config::from_toml_str`].
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = match fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound {
                    path: path.display().to_string(),
                }
                .into())
            }
            Err(e) => return Err(e.into()),
        };

        Self::from_toml_str(&contents)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or parsed.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            debug!(path = %config_path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // PACT_OUTPUT
        if let Ok(output) = std::env::var("PACT_OUTPUT") {
            self.general.default_output = match output.as_str() {
                "plain" => OutputFormat::Plain,
                "json" => OutputFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "PACT_OUTPUT".to_string(),
                        value: output,
                    }
                    .into())
                }
            };
        }

        // PACT_SAFE_RESUME
        let safe_resume = env_flag("PACT_SAFE_RESUME")?.unwrap_or(self.fetch.safe_resume());
        // PACT_FETCH_UNNEEDED
        let fetch_unneeded =
            env_flag("PACT_FETCH_UNNEEDED")?.unwrap_or(self.fetch.fetch_unneeded());
        self.fetch = FetchActionOptions::new(safe_resume, fetch_unneeded);

        Ok(())
    }
}

fn env_flag(var: &str) -> Result<Option<bool>, Error> {
    match std::env::var(var) {
        Err(_) => Ok(None),
        Ok(value) => match value.as_str() {
            "true" | "1" | "yes" => Ok(Some(true)),
            "false" | "0" | "no" => Ok(Some(false)),
            _ => Err(ConfigError::InvalidValue {
                field: var.to_string(),
                value,
            }
            .into()),
        },
    }
}

/// Build fetch options from a TOML table using the named-mapping rules
///
/// # Errors
///
/// Returns an `ActionError` for unknown keys or non-boolean values.
pub fn fetch_options_from_table(table: &toml::Table) -> Result<FetchActionOptions, Error> {
    let map: Mapping = table
        .iter()
        .map(|(k, v)| (k.clone(), toml_to_arg(v)))
        .collect();
    Ok(FetchActionOptions::from_mapping(&map)?)
}

fn toml_to_arg(value: &toml::Value) -> Arg {
    match value {
        toml::Value::String(s) => Arg::Str(s.clone()),
        toml::Value::Integer(i) => Arg::Integer(*i),
        toml::Value::Float(f) => Arg::Float(*f),
        toml::Value::Boolean(b) => Arg::Bool(*b),
        toml::Value::Datetime(dt) => Arg::Str(dt.to_string()),
        toml::Value::Array(items) => Arg::List(items.iter().map(toml_to_arg).collect()),
        toml::Value::Table(table) => Arg::Map(
            table
                .iter()
                .map(|(k, v)| (k.clone(), toml_to_arg(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pact_errors::ActionErrorKind;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.general.default_output, OutputFormat::Plain);
        assert_eq!(config.fetch, FetchActionOptions::default());
        assert!(config.repositories.is_empty());
    }

    #[test]
    fn test_fetch_table_uses_mapping_rules() {
        let config = Config::from_toml_str("[fetch]\nfetch_unneeded = true\n").unwrap();
        assert!(!config.fetch.safe_resume());
        assert!(config.fetch.fetch_unneeded());

        let err = Config::from_toml_str("[fetch]\nmonkey = false\n").unwrap_err();
        assert_eq!(err.action_kind(), Some(ActionErrorKind::InvalidArgument));

        let err = Config::from_toml_str("[fetch]\nsafe_resume = \"yes\"\n").unwrap_err();
        assert_eq!(err.action_kind(), Some(ActionErrorKind::TypeMismatch));
    }

    #[test]
    fn test_fetch_must_be_table() {
        let err = Config::from_toml_str("fetch = 3\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { ref field, .. }) if field == "fetch"
        ));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = Config::from_toml_str("[general]\ndefualt_output = \"json\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ParseError { .. })));

        let err = Config::from_toml_str("[genral]\ndefault_output = \"json\"\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::Invalid { ref message }) if message.contains("genral")
        ));
    }

    #[test]
    fn test_bad_toml() {
        let err = Config::from_toml_str("[general\n").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ParseError { .. })));
    }
}
