//! Configuration validation.
//!
//! Enum-valued fields are already checked by deserialization; this module
//! covers the rules that span fields or depend on value ranges.

use std::collections::HashSet;

use tracing::warn;

use crate::{
    repository::{validate_owner_name, validate_repository_name},
    ConfigurationError, ConfigurationResult, JanitorConfig,
};

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;

/// Upper bound GitHub accepts for required approving reviews.
pub const MAX_REQUIRED_REVIEWS: u32 = 6;

/// Longest repository topic GitHub accepts.
pub const MAX_TOPIC_LENGTH: usize = 50;

/// Validates a parsed configuration, stopping at the first problem found.
pub fn validate(config: &JanitorConfig) -> ConfigurationResult<()> {
    if config.repositories.is_empty() {
        return Err(ConfigurationError::RequiredConfigMissing {
            key: "repositories".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for (index, repo) in config.repositories.iter().enumerate() {
        validate_owner_name(&format!("repositories[{index}].owner"), &repo.owner)?;
        validate_repository_name(&format!("repositories[{index}].name"), &repo.name)?;

        if !seen.insert(repo.full_name().to_ascii_lowercase()) {
            return Err(ConfigurationError::invalid(
                format!("repositories[{index}]"),
                format!("duplicate repository {}", repo.full_name()),
            ));
        }
    }

    if let Some(bp) = &config.settings.branch_protection {
        if bp.pattern.trim().is_empty() {
            return Err(ConfigurationError::invalid(
                "branch_protection.pattern",
                "must not be empty",
            ));
        }

        if let Some(count) = bp.required_reviews {
            if count > MAX_REQUIRED_REVIEWS {
                return Err(ConfigurationError::invalid(
                    "branch_protection.required_reviews",
                    format!("must be between 0 and {MAX_REQUIRED_REVIEWS}, got {count}"),
                ));
            }
        }

        if let Some([]) = bp.status_check_contexts.as_deref() {
            warn!("branch_protection.status_check_contexts is empty and will be ignored");
        }
    }

    if let Some([]) = config.settings.topics.as_deref() {
        warn!("topics is empty and will be ignored; existing topics are left untouched");
    }

    if let Some(topics) = &config.settings.topics {
        for (index, topic) in topics.iter().enumerate() {
            validate_topic(&format!("topics[{index}]"), topic)?;
        }
    }

    Ok(())
}

/// Checks a topic against the form GitHub stores topics in.
///
/// GitHub lowercases topics on write, so a topic in any other form would be
/// reported as changed on every run.
fn validate_topic(field: &str, topic: &str) -> ConfigurationResult<()> {
    if topic.is_empty() || topic.len() > MAX_TOPIC_LENGTH {
        return Err(ConfigurationError::invalid(
            field,
            format!("must be between 1 and {MAX_TOPIC_LENGTH} characters"),
        ));
    }

    if topic.starts_with('-') {
        return Err(ConfigurationError::invalid(
            field,
            "must not start with hyphen",
        ));
    }

    let allowed = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-';
    if !topic.chars().all(allowed) {
        return Err(ConfigurationError::invalid(
            field,
            "must contain only lowercase letters, numbers and hyphens",
        ));
    }

    Ok(())
}
