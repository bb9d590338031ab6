//! Configuration file loading.
//!
//! The configuration file lists the repositories to manage and the settings
//! to apply to all of them. YAML is the primary format; files with a `.toml`
//! extension are parsed as TOML instead.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{validator, ConfigurationError, ConfigurationResult, DesiredSettings, RepositoryRef};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "repo-janitor.yaml";

/// The complete configuration file.
///
/// # Example YAML Configuration
///
/// ```yaml
/// repositories:
///   - owner: my-org
///     name: service-a
///
/// settings:
///   allow_merge_commit: false
///   delete_branch_on_merge: true
///   branch_protection:
///     enabled: true
///     pattern: main
///     required_reviews: 1
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JanitorConfig {
    /// Repositories the settings are applied to, in processing order
    #[serde(default)]
    pub repositories: Vec<RepositoryRef>,

    /// Settings applied to every repository
    #[serde(default)]
    pub settings: DesiredSettings,
}

impl JanitorConfig {
    /// Loads and validates the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError::FileNotFound` if the file does not exist
    /// - `ConfigurationError::FileAccessError` if the file cannot be read
    /// - `ConfigurationError::ParseError` if the content is not valid YAML/TOML
    ///   or does not match the configuration schema
    /// - `ConfigurationError::InvalidConfiguration` if validation fails
    pub fn load(path: &Path) -> ConfigurationResult<Self> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(ConfigurationError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content =
            fs::read_to_string(path).map_err(|e| ConfigurationError::FileAccessError {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let config = if is_toml {
            Self::from_toml_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };

        info!(
            path = %path.display(),
            repository_count = config.repositories.len(),
            branch_protection = config.settings.branch_protection.is_some(),
            "Loaded configuration"
        );

        Ok(config)
    }

    /// Parses and validates a YAML configuration document.
    pub fn from_yaml_str(content: &str) -> ConfigurationResult<Self> {
        let config: JanitorConfig =
            serde_yaml::from_str(content).map_err(|e| ConfigurationError::ParseError {
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a TOML configuration document.
    pub fn from_toml_str(content: &str) -> ConfigurationResult<Self> {
        let config: JanitorConfig =
            toml::from_str(content).map_err(|e| ConfigurationError::ParseError {
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration for values the schema alone cannot reject.
    pub fn validate(&self) -> ConfigurationResult<()> {
        validator::validate(self)
    }
}
