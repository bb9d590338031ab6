//! Repository-level settings.
//!
//! Controls merge behaviour, features, metadata and visibility of the
//! configured repositories.

use serde::{Deserialize, Serialize};

use super::BranchProtectionSettings;

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;

/// The settings applied to every configured repository.
///
/// Each field is `None` when the attribute is not managed by this run.
/// A managed attribute is always sent to GitHub, even when it already
/// matches, so repeated runs converge.
///
/// # Examples
///
/// ```rust
/// use config_manager::{DesiredSettings, Visibility};
///
/// let settings = DesiredSettings {
///     allow_merge_commit: Some(false),
///     visibility: Some(Visibility::Private),
///     ..Default::default()
/// };
/// assert!(settings.has_issues.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DesiredSettings {
    // Merge methods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_merge_commit: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_squash_merge: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_rebase_merge: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_branch_on_merge: Option<bool>,

    // Merge commit messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub squash_merge_commit_title: Option<SquashMergeCommitTitle>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub squash_merge_commit_message: Option<SquashMergeCommitMessage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_commit_title: Option<MergeCommitTitle>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_commit_message: Option<MergeCommitMessage>,

    // Visibility and features
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_issues: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_projects: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_wiki: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_discussions: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,

    // Branch update and contribution settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_update_branch: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_commit_signoff_required: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_forking: Option<bool>,

    // Metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    /// Repository topics. An empty list is treated the same as unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_auto_merge: Option<bool>,

    /// GitHub Pages. Changes are reported but cannot be applied through the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_pages: Option<GitHubPagesSettings>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_protection: Option<BranchProtectionSettings>,
}

/// GitHub Pages settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct GitHubPagesSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Repository visibility as written in the configuration file.
///
/// GitHub represents this as a boolean `private` flag; the conversion
/// helpers translate in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Visible to all GitHub users
    Public,

    /// Visible only to repository collaborators
    Private,
}

impl Visibility {
    pub fn from_private(private: bool) -> Self {
        if private {
            Self::Private
        } else {
            Self::Public
        }
    }

    pub fn is_private(self) -> bool {
        matches!(self, Self::Private)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default title for squash merge commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SquashMergeCommitTitle {
    PrTitle,
    CommitOrPrTitle,
}

impl SquashMergeCommitTitle {
    /// The value GitHub uses for this option.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PrTitle => "PR_TITLE",
            Self::CommitOrPrTitle => "COMMIT_OR_PR_TITLE",
        }
    }
}

/// Default body for squash merge commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SquashMergeCommitMessage {
    PrBody,
    CommitMessages,
    Blank,
}

impl SquashMergeCommitMessage {
    /// The value GitHub uses for this option.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PrBody => "PR_BODY",
            Self::CommitMessages => "COMMIT_MESSAGES",
            Self::Blank => "BLANK",
        }
    }
}

/// Default title for merge commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MergeCommitTitle {
    PrTitle,
    MergeMessage,
}

impl MergeCommitTitle {
    /// The value GitHub uses for this option.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PrTitle => "PR_TITLE",
            Self::MergeMessage => "MERGE_MESSAGE",
        }
    }
}

/// Default body for merge commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MergeCommitMessage {
    PrBody,
    PrTitle,
    Blank,
}

impl MergeCommitMessage {
    /// The value GitHub uses for this option.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PrBody => "PR_BODY",
            Self::PrTitle => "PR_TITLE",
            Self::Blank => "BLANK",
        }
    }
}
