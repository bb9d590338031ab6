//! Repository references.
//!
//! A [`RepositoryRef`] identifies one remote repository that the configured
//! settings are applied to.

use serde::{Deserialize, Serialize};

use crate::{ConfigurationError, ConfigurationResult};

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;

/// Maximum length of a GitHub repository name.
const MAX_REPOSITORY_NAME_LENGTH: usize = 100;

/// Maximum length of a GitHub user or organization name.
const MAX_OWNER_NAME_LENGTH: usize = 39;

/// Identifies a repository on the hosted service.
///
/// # Examples
///
/// ```rust
/// use config_manager::RepositoryRef;
///
/// let repo = RepositoryRef::new("my-org", "my-repo");
/// assert_eq!(repo.full_name(), "my-org/my-repo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepositoryRef {
    /// The user or organization that owns the repository
    pub owner: String,

    /// The repository name, without the owner
    pub name: String,
}

impl RepositoryRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Returns `owner/name`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl std::fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Checks that `name` is a valid GitHub repository name.
///
/// # Validation Rules
/// - Length: 1-100 characters
/// - Characters: alphanumeric, hyphens, underscores, periods
/// - Must not start with `.` or `-`
///
/// # Errors
/// Returns `ConfigurationError::InvalidConfiguration` naming `field` if validation fails.
pub fn validate_repository_name(field: &str, name: &str) -> ConfigurationResult<()> {
    if name.is_empty() {
        return Err(ConfigurationError::invalid(field, "must not be empty"));
    }

    if name.len() > MAX_REPOSITORY_NAME_LENGTH {
        return Err(ConfigurationError::invalid(
            field,
            format!(
                "must be at most {} characters, got {}",
                MAX_REPOSITORY_NAME_LENGTH,
                name.len()
            ),
        ));
    }

    if name.starts_with('.') || name.starts_with('-') {
        return Err(ConfigurationError::invalid(
            field,
            "must not start with '.' or '-'",
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_.".contains(c))
    {
        return Err(ConfigurationError::invalid(
            field,
            "must contain only alphanumeric characters, hyphens, underscores, or periods",
        ));
    }

    Ok(())
}

/// Checks that `owner` is a valid GitHub user or organization name.
///
/// # Validation Rules
/// - Length: 1-39 characters
/// - Characters: alphanumeric and hyphens only
/// - Must not start or end with hyphen
/// - No consecutive hyphens
///
/// # Errors
/// Returns `ConfigurationError::InvalidConfiguration` naming `field` if validation fails.
pub fn validate_owner_name(field: &str, owner: &str) -> ConfigurationResult<()> {
    if owner.is_empty() {
        return Err(ConfigurationError::invalid(field, "must not be empty"));
    }

    if owner.len() > MAX_OWNER_NAME_LENGTH {
        return Err(ConfigurationError::invalid(
            field,
            format!(
                "must be at most {} characters, got {}",
                MAX_OWNER_NAME_LENGTH,
                owner.len()
            ),
        ));
    }

    if owner.starts_with('-') || owner.ends_with('-') {
        return Err(ConfigurationError::invalid(
            field,
            "must not start or end with hyphen",
        ));
    }

    if owner.contains("--") {
        return Err(ConfigurationError::invalid(
            field,
            "must not contain consecutive hyphens",
        ));
    }

    if !owner.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ConfigurationError::invalid(
            field,
            "must contain only alphanumeric characters and hyphens",
        ));
    }

    Ok(())
}
