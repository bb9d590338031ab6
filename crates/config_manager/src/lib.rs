//! Desired-state configuration for repo-janitor.
//!
//! This crate owns the typed model of what the operator wants their repositories
//! to look like. Every managed attribute is an `Option`: `None` means "leave this
//! attribute alone", `Some(value)` means "make the remote match `value`".
//!
//! The model is loaded from a YAML (or TOML) file, validated once, and then
//! treated as read-only for the lifetime of a run.
//!
//! # Examples
//!
//! ```rust
//! use config_manager::JanitorConfig;
//!
//! let config = JanitorConfig::from_yaml_str(
//!     r#"
//! repositories:
//!   - owner: my-org
//!     name: my-repo
//! settings:
//!   allow_merge_commit: false
//!   visibility: private
//! "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.repositories[0].full_name(), "my-org/my-repo");
//! assert_eq!(config.settings.allow_merge_commit, Some(false));
//! ```

pub mod config;
pub mod errors;
pub mod example;
pub mod repository;
pub mod settings;
pub mod validator;

pub use config::{JanitorConfig, DEFAULT_CONFIG_FILENAME};
pub use errors::{ConfigurationError, ConfigurationResult};
pub use example::example_config;
pub use repository::{validate_owner_name, validate_repository_name, RepositoryRef};
pub use settings::{
    BranchProtectionSettings, DesiredSettings, GitHubPagesSettings, MergeCommitMessage,
    MergeCommitTitle, SquashMergeCommitMessage, SquashMergeCommitTitle, Visibility,
};
pub use validator::MAX_REQUIRED_REVIEWS;
