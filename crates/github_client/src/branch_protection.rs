//! Branch protection domain types.
//!
//! This module contains the observed branch protection rule for one branch and
//! the request body used to replace it. GitHub only accepts whole-object
//! replacement for this resource, so the same snapshot type serves as both the
//! observed state and the desired state.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "branch_protection_tests.rs"]
mod tests;

/// The protection rule of one branch.
///
/// An unprotected branch is represented by [`BranchProtectionSnapshot::unprotected`]:
/// `enabled` is false and every other flag is false or empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BranchProtectionSnapshot {
    /// Whether any protection rule exists for the branch
    pub enabled: bool,

    /// Whether pull request reviews are enforced at all
    pub pull_request_reviews_enabled: bool,
    /// Required number of approving reviews before merging
    pub required_reviews: u32,
    /// Whether stale reviews are dismissed when new commits are pushed
    pub dismiss_stale_reviews: bool,
    /// Whether code owner reviews are required
    pub require_code_owner_reviews: bool,

    /// Whether status checks are enforced at all
    pub status_checks_enabled: bool,
    /// Whether branches must be up to date before merging
    pub require_branches_up_to_date: bool,
    /// Required status check contexts (legacy form)
    pub status_check_contexts: Vec<String>,
    /// Required status checks with app binding
    pub status_check_checks: Vec<RequiredStatusCheck>,

    /// Push restrictions, kept as-is across updates
    pub restrictions: Option<BranchRestrictions>,

    pub include_admins: bool,
    pub require_linear_history: bool,
    pub require_signed_commits: bool,
    pub require_conversation_resolution: bool,
    pub allow_force_pushes: bool,
    pub allow_deletions: bool,
}

impl BranchProtectionSnapshot {
    /// The snapshot of a branch without any protection rule.
    pub fn unprotected() -> Self {
        Self::default()
    }
}

/// A required status check bound to an optional GitHub App.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredStatusCheck {
    pub context: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<i64>,
}

/// Users, teams and apps allowed to push to the branch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BranchRestrictions {
    pub users: Vec<String>,
    pub teams: Vec<String>,
    pub apps: Vec<String>,
}

/// Partial model of `GET /repos/{owner}/{repo}/branches/{branch}/protection`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ProtectionResponse {
    required_status_checks: Option<StatusChecksResponse>,
    required_pull_request_reviews: Option<ReviewsResponse>,
    enforce_admins: Option<EnabledFlag>,
    required_linear_history: Option<EnabledFlag>,
    required_signatures: Option<EnabledFlag>,
    required_conversation_resolution: Option<EnabledFlag>,
    allow_force_pushes: Option<EnabledFlag>,
    allow_deletions: Option<EnabledFlag>,
    restrictions: Option<RestrictionsResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EnabledFlag {
    enabled: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StatusChecksResponse {
    strict: bool,
    contexts: Vec<String>,
    checks: Vec<RequiredStatusCheck>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReviewsResponse {
    dismiss_stale_reviews: bool,
    require_code_owner_reviews: bool,
    required_approving_review_count: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RestrictionsResponse {
    users: Vec<NamedEntity>,
    teams: Vec<NamedEntity>,
    apps: Vec<NamedEntity>,
}

/// Users carry a `login`, teams and apps a `slug`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NamedEntity {
    login: Option<String>,
    slug: Option<String>,
}

impl From<ProtectionResponse> for BranchProtectionSnapshot {
    fn from(value: ProtectionResponse) -> Self {
        let flag = |f: &Option<EnabledFlag>| f.as_ref().is_some_and(|f| f.enabled);

        let mut snapshot = Self {
            enabled: true,
            include_admins: flag(&value.enforce_admins),
            require_linear_history: flag(&value.required_linear_history),
            require_signed_commits: flag(&value.required_signatures),
            require_conversation_resolution: flag(&value.required_conversation_resolution),
            allow_force_pushes: flag(&value.allow_force_pushes),
            allow_deletions: flag(&value.allow_deletions),
            ..Self::default()
        };

        if let Some(reviews) = value.required_pull_request_reviews {
            snapshot.pull_request_reviews_enabled = true;
            snapshot.required_reviews = reviews.required_approving_review_count;
            snapshot.dismiss_stale_reviews = reviews.dismiss_stale_reviews;
            snapshot.require_code_owner_reviews = reviews.require_code_owner_reviews;
        }

        if let Some(checks) = value.required_status_checks {
            snapshot.status_checks_enabled = true;
            snapshot.require_branches_up_to_date = checks.strict;
            snapshot.status_check_contexts = checks.contexts;
            snapshot.status_check_checks = checks.checks;
        }

        if let Some(r) = value.restrictions {
            snapshot.restrictions = Some(BranchRestrictions {
                users: r.users.into_iter().filter_map(|u| u.login).collect(),
                teams: r.teams.into_iter().filter_map(|t| t.slug).collect(),
                apps: r.apps.into_iter().filter_map(|a| a.slug).collect(),
            });
        }

        snapshot
    }
}

/// Body for `PUT /repos/{owner}/{repo}/branches/{branch}/protection`.
///
/// GitHub requires every top-level key to be present; `null` disables a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtectionRequest {
    pub required_status_checks: Option<StatusChecksRequest>,
    pub enforce_admins: bool,
    pub required_pull_request_reviews: Option<ReviewsRequest>,
    pub restrictions: Option<BranchRestrictions>,
    pub required_linear_history: bool,
    pub allow_force_pushes: bool,
    pub allow_deletions: bool,
    pub required_conversation_resolution: bool,
}

/// Status check block of a [`ProtectionRequest`].
///
/// Contexts and checks are mutually exclusive on GitHub's side: when only one
/// of them is populated the other is sent empty, which clears it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusChecksRequest {
    pub strict: bool,
    pub contexts: Vec<String>,
    pub checks: Vec<RequiredStatusCheck>,
}

/// Pull request review block of a [`ProtectionRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewsRequest {
    pub dismiss_stale_reviews: bool,
    pub require_code_owner_reviews: bool,
    pub required_approving_review_count: u32,
}

impl From<&BranchProtectionSnapshot> for ProtectionRequest {
    fn from(protection: &BranchProtectionSnapshot) -> Self {
        let required_pull_request_reviews = if protection.pull_request_reviews_enabled {
            Some(ReviewsRequest {
                dismiss_stale_reviews: protection.dismiss_stale_reviews,
                require_code_owner_reviews: protection.require_code_owner_reviews,
                required_approving_review_count: protection.required_reviews,
            })
        } else {
            None
        };

        let required_status_checks = if protection.status_checks_enabled {
            Some(StatusChecksRequest {
                strict: protection.require_branches_up_to_date,
                contexts: protection.status_check_contexts.clone(),
                checks: protection.status_check_checks.clone(),
            })
        } else {
            None
        };

        Self {
            required_status_checks,
            enforce_admins: protection.include_admins,
            required_pull_request_reviews,
            restrictions: protection.restrictions.clone(),
            required_linear_history: protection.require_linear_history,
            allow_force_pushes: protection.allow_force_pushes,
            allow_deletions: protection.allow_deletions,
            required_conversation_resolution: protection.require_conversation_resolution,
        }
    }
}
