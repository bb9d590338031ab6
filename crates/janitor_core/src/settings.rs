//! Repository settings reconciliation.
//!
//! Builds the sparse settings patch for one repository from its desired
//! settings and the observed snapshot, recording every differing field.

use config_manager::{DesiredSettings, Visibility};
use github_client::{RepositorySettingsUpdate, RepositorySnapshot};

use crate::field::{reconcile_to_patch, ChangeSet};

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;

/// Guidance attached to the error when GitHub Pages would have to change.
pub const GITHUB_PAGES_GUIDANCE: &str =
    "enable or disable GitHub Pages manually under Settings > Pages of the repository";

/// The outcome of comparing desired settings against one repository.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPlan {
    /// Every managed field, changed or not
    pub patch: RepositorySettingsUpdate,

    /// Whether any patched field differs from the remote value
    pub changed: bool,

    /// Whether GitHub Pages differs; never part of the patch
    pub pages_changed: bool,
}

impl SettingsPlan {
    /// Returns true if the patch has to be sent in an apply run.
    pub fn needs_apply(&self) -> bool {
        self.changed
    }
}

/// Compares `desired` against `current` and stages the sparse patch.
///
/// Change records are appended to `changes` in field order.
pub fn plan_settings(
    desired: &DesiredSettings,
    current: &RepositorySnapshot,
    changes: &mut ChangeSet,
) -> SettingsPlan {
    let mut patch = RepositorySettingsUpdate::default();
    let mut changed = false;

    // Merge methods
    changed |= reconcile_to_patch(
        changes,
        "allow_merge_commit",
        desired.allow_merge_commit.as_ref(),
        &current.allow_merge_commit,
        &mut patch.allow_merge_commit,
    );
    changed |= reconcile_to_patch(
        changes,
        "allow_squash_merge",
        desired.allow_squash_merge.as_ref(),
        &current.allow_squash_merge,
        &mut patch.allow_squash_merge,
    );
    changed |= reconcile_to_patch(
        changes,
        "allow_rebase_merge",
        desired.allow_rebase_merge.as_ref(),
        &current.allow_rebase_merge,
        &mut patch.allow_rebase_merge,
    );
    changed |= reconcile_to_patch(
        changes,
        "delete_branch_on_merge",
        desired.delete_branch_on_merge.as_ref(),
        &current.delete_branch_on_merge,
        &mut patch.delete_branch_on_merge,
    );

    // Commit message templates travel as GitHub's literal values
    changed |= reconcile_to_patch(
        changes,
        "squash_merge_commit_title",
        desired
            .squash_merge_commit_title
            .map(|v| v.as_str().to_string())
            .as_ref(),
        &current.squash_merge_commit_title,
        &mut patch.squash_merge_commit_title,
    );
    changed |= reconcile_to_patch(
        changes,
        "squash_merge_commit_message",
        desired
            .squash_merge_commit_message
            .map(|v| v.as_str().to_string())
            .as_ref(),
        &current.squash_merge_commit_message,
        &mut patch.squash_merge_commit_message,
    );
    changed |= reconcile_to_patch(
        changes,
        "merge_commit_title",
        desired
            .merge_commit_title
            .map(|v| v.as_str().to_string())
            .as_ref(),
        &current.merge_commit_title,
        &mut patch.merge_commit_title,
    );
    changed |= reconcile_to_patch(
        changes,
        "merge_commit_message",
        desired
            .merge_commit_message
            .map(|v| v.as_str().to_string())
            .as_ref(),
        &current.merge_commit_message,
        &mut patch.merge_commit_message,
    );

    changed |= reconcile_visibility(desired.visibility, current.private, changes, &mut patch);

    // Features
    changed |= reconcile_to_patch(
        changes,
        "has_issues",
        desired.has_issues.as_ref(),
        &current.has_issues,
        &mut patch.has_issues,
    );
    changed |= reconcile_to_patch(
        changes,
        "has_projects",
        desired.has_projects.as_ref(),
        &current.has_projects,
        &mut patch.has_projects,
    );
    changed |= reconcile_to_patch(
        changes,
        "has_wiki",
        desired.has_wiki.as_ref(),
        &current.has_wiki,
        &mut patch.has_wiki,
    );
    changed |= reconcile_to_patch(
        changes,
        "has_discussions",
        desired.has_discussions.as_ref(),
        &current.has_discussions,
        &mut patch.has_discussions,
    );
    changed |= reconcile_to_patch(
        changes,
        "archived",
        desired.archived.as_ref(),
        &current.archived,
        &mut patch.archived,
    );

    changed |= reconcile_to_patch(
        changes,
        "allow_update_branch",
        desired.allow_update_branch.as_ref(),
        &current.allow_update_branch,
        &mut patch.allow_update_branch,
    );
    changed |= reconcile_to_patch(
        changes,
        "web_commit_signoff_required",
        desired.web_commit_signoff_required.as_ref(),
        &current.web_commit_signoff_required,
        &mut patch.web_commit_signoff_required,
    );
    changed |= reconcile_to_patch(
        changes,
        "allow_forking",
        desired.allow_forking.as_ref(),
        &current.allow_forking,
        &mut patch.allow_forking,
    );

    // Metadata
    changed |= reconcile_to_patch(
        changes,
        "description",
        desired.description.as_ref(),
        &current.description,
        &mut patch.description,
    );
    changed |= reconcile_to_patch(
        changes,
        "homepage",
        desired.homepage.as_ref(),
        &current.homepage,
        &mut patch.homepage,
    );
    // An empty topic list cannot be told apart from an unset one.
    changed |= reconcile_to_patch(
        changes,
        "topics",
        desired.topics.as_ref().filter(|topics| !topics.is_empty()),
        &current.topics,
        &mut patch.topics,
    );
    changed |= reconcile_to_patch(
        changes,
        "default_branch",
        desired.default_branch.as_ref(),
        &current.default_branch,
        &mut patch.default_branch,
    );
    changed |= reconcile_to_patch(
        changes,
        "allow_auto_merge",
        desired.allow_auto_merge.as_ref(),
        &current.allow_auto_merge,
        &mut patch.allow_auto_merge,
    );

    let pages_changed = reconcile_github_pages(desired, current, changes);

    SettingsPlan {
        patch,
        changed,
        pages_changed,
    }
}

/// Visibility is an enum in the configuration and a `private` flag on GitHub.
///
/// The change is reported with the enum labels.
fn reconcile_visibility(
    desired: Option<Visibility>,
    current_private: bool,
    changes: &mut ChangeSet,
    patch: &mut RepositorySettingsUpdate,
) -> bool {
    let Some(desired) = desired else {
        return false;
    };

    patch.private = Some(desired.is_private());

    let current = Visibility::from_private(current_private);
    current != desired && changes.record("visibility", current.as_str(), desired.as_str())
}

/// Detects a GitHub Pages change. The value is never staged into the patch.
fn reconcile_github_pages(
    desired: &DesiredSettings,
    current: &RepositorySnapshot,
    changes: &mut ChangeSet,
) -> bool {
    let Some(enabled) = desired.github_pages.as_ref().and_then(|p| p.enabled) else {
        return false;
    };

    enabled != current.has_pages && changes.record("github_pages", current.has_pages, enabled)
}
