//! Repository settings types.
//!
//! This module contains the observed repository settings returned by GitHub and
//! the sparse update payload sent back to it.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;

/// The current settings of a repository, as fetched from GitHub.
///
/// Every field is populated. Values GitHub omits or returns as `null`
/// are reported as `false` or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepositorySnapshot {
    pub owner: String,
    pub name: String,

    pub private: bool,
    pub archived: bool,

    pub allow_merge_commit: bool,
    pub allow_squash_merge: bool,
    pub allow_rebase_merge: bool,
    pub allow_auto_merge: bool,
    pub delete_branch_on_merge: bool,
    pub allow_update_branch: bool,
    pub allow_forking: bool,
    pub web_commit_signoff_required: bool,

    pub squash_merge_commit_title: String,
    pub squash_merge_commit_message: String,
    pub merge_commit_title: String,
    pub merge_commit_message: String,

    pub has_issues: bool,
    pub has_projects: bool,
    pub has_wiki: bool,
    pub has_discussions: bool,
    pub has_pages: bool,

    pub description: String,
    pub homepage: String,
    pub topics: Vec<String>,
    pub default_branch: String,
}

/// Partial repository model as returned by `GET /repos/{owner}/{repo}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RepositoryResponse {
    name: Option<String>,
    owner: Option<OwnerResponse>,
    private: Option<bool>,
    archived: Option<bool>,
    allow_merge_commit: Option<bool>,
    allow_squash_merge: Option<bool>,
    allow_rebase_merge: Option<bool>,
    allow_auto_merge: Option<bool>,
    delete_branch_on_merge: Option<bool>,
    allow_update_branch: Option<bool>,
    allow_forking: Option<bool>,
    web_commit_signoff_required: Option<bool>,
    squash_merge_commit_title: Option<String>,
    squash_merge_commit_message: Option<String>,
    merge_commit_title: Option<String>,
    merge_commit_message: Option<String>,
    has_issues: Option<bool>,
    has_projects: Option<bool>,
    has_wiki: Option<bool>,
    has_discussions: Option<bool>,
    has_pages: Option<bool>,
    description: Option<String>,
    homepage: Option<String>,
    topics: Option<Vec<String>>,
    default_branch: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OwnerResponse {
    #[serde(default)]
    login: String,
}

impl RepositoryResponse {
    /// Converts the wire model into a fully populated snapshot.
    ///
    /// `owner` and `name` fall back to the requested values when GitHub
    /// does not echo them back.
    pub(crate) fn into_snapshot(self, owner: &str, name: &str) -> RepositorySnapshot {
        RepositorySnapshot {
            owner: self
                .owner
                .map(|o| o.login)
                .filter(|login| !login.is_empty())
                .unwrap_or_else(|| owner.to_string()),
            name: self.name.unwrap_or_else(|| name.to_string()),
            private: self.private.unwrap_or_default(),
            archived: self.archived.unwrap_or_default(),
            allow_merge_commit: self.allow_merge_commit.unwrap_or_default(),
            allow_squash_merge: self.allow_squash_merge.unwrap_or_default(),
            allow_rebase_merge: self.allow_rebase_merge.unwrap_or_default(),
            allow_auto_merge: self.allow_auto_merge.unwrap_or_default(),
            delete_branch_on_merge: self.delete_branch_on_merge.unwrap_or_default(),
            allow_update_branch: self.allow_update_branch.unwrap_or_default(),
            allow_forking: self.allow_forking.unwrap_or_default(),
            web_commit_signoff_required: self.web_commit_signoff_required.unwrap_or_default(),
            squash_merge_commit_title: self.squash_merge_commit_title.unwrap_or_default(),
            squash_merge_commit_message: self.squash_merge_commit_message.unwrap_or_default(),
            merge_commit_title: self.merge_commit_title.unwrap_or_default(),
            merge_commit_message: self.merge_commit_message.unwrap_or_default(),
            has_issues: self.has_issues.unwrap_or_default(),
            has_projects: self.has_projects.unwrap_or_default(),
            has_wiki: self.has_wiki.unwrap_or_default(),
            has_discussions: self.has_discussions.unwrap_or_default(),
            has_pages: self.has_pages.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            homepage: self.homepage.unwrap_or_default(),
            topics: self.topics.unwrap_or_default(),
            default_branch: self.default_branch.unwrap_or_default(),
        }
    }
}

/// Represents the settings that can be updated for a repository.
///
/// Only populated fields are sent. `topics` is not part of the repository
/// PATCH body; GitHub manages it through a separate endpoint, which the
/// client calls when the field is populated.
#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct RepositorySettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_merge_commit: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_squash_merge: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_rebase_merge: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_branch_on_merge: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub squash_merge_commit_title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub squash_merge_commit_message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_commit_title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_commit_message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_issues: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_projects: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_wiki: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_discussions: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_update_branch: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_commit_signoff_required: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_forking: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_auto_merge: Option<bool>,

    #[serde(skip)]
    pub topics: Option<Vec<String>>,
}

impl RepositorySettingsUpdate {
    /// Returns true if nothing at all is populated.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Returns true if at least one field that travels in the PATCH body is populated.
    pub fn has_patch_fields(&self) -> bool {
        let without_topics = Self {
            topics: None,
            ..self.clone()
        };
        !without_topics.is_empty()
    }
}

/// Body for `PUT /repos/{owner}/{repo}/topics`.
#[derive(Serialize, Debug)]
pub(crate) struct TopicsRequest<'a> {
    pub names: &'a [String],
}
