//! Branch protection settings.
//!
//! Controls the protection rule applied to one branch pattern in every
//! configured repository.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "branch_protection_tests.rs"]
mod tests;

/// Branch protection settings for a single branch pattern.
///
/// `enabled` is mandatory and gates everything else: when it is `false` the
/// protection rule is removed and no other field is looked at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct BranchProtectionSettings {
    /// Whether the branch should be protected at all
    pub enabled: bool,

    /// Branch name (or pattern) the rule applies to
    #[serde(default)]
    pub pattern: String,

    /// Required number of approving reviews
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_reviews: Option<u32>,

    /// Dismiss stale reviews when new commits are pushed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismiss_stale_reviews: Option<bool>,

    /// Require review from code owners
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_code_owner_reviews: Option<bool>,

    /// Require status checks to pass before merging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_status_checks: Option<bool>,

    /// Require branches to be up to date before merging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_branches_up_to_date: Option<bool>,

    /// Required status check contexts. When omitted, the contexts already
    /// present on the branch are kept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_check_contexts: Option<Vec<String>>,

    /// Enforce the rule for administrators too
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_admins: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_linear_history: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_signed_commits: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_conversation_resolution: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_force_pushes: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_deletions: Option<bool>,
}

impl BranchProtectionSettings {
    /// Returns true if any pull request review setting is configured.
    ///
    /// Configuring any of them turns on pull request review enforcement.
    pub fn configures_reviews(&self) -> bool {
        self.required_reviews.is_some()
            || self.dismiss_stale_reviews.is_some()
            || self.require_code_owner_reviews.is_some()
    }
}
