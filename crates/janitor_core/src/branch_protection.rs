//! Branch protection reconciliation.
//!
//! A branch is either unprotected or protected. Disabling protection is a
//! transition of its own: the rule is removed and no other attribute is
//! looked at. Otherwise a desired snapshot is derived from the observed one,
//! field by field, and sent back whole since GitHub only supports replacement.

use config_manager::BranchProtectionSettings;
use github_client::BranchProtectionSnapshot;

use crate::field::{reconcile_to_desired_state, ChangeSet};
use crate::ReconcileError;

#[cfg(test)]
#[path = "branch_protection_tests.rs"]
mod tests;

/// What has to happen to the protection rule of a branch.
#[derive(Debug, Clone, PartialEq)]
pub enum ProtectionPlan {
    /// The remote rule already matches.
    Unchanged,

    /// The rule is being disabled and must be removed.
    Remove,

    /// The rule must be replaced with `desired`.
    Replace {
        desired: Box<BranchProtectionSnapshot>,

        /// Signed commits requirement to send after the replacement, when
        /// configured. GitHub manages it through its own endpoint.
        signed_commits: Option<bool>,
    },
}

fn state_label(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}

/// Compares the configured protection against the observed rule.
///
/// `repository` is only used to identify the branch in errors.
///
/// # Errors
///
/// Returns `ReconcileError::StatusChecksWithoutContexts` when the desired rule
/// would enforce status checks without any context or check. Changes detected
/// up to that point stay in `changes`.
pub fn plan_branch_protection(
    repository: &str,
    settings: &BranchProtectionSettings,
    current: &BranchProtectionSnapshot,
    changes: &mut ChangeSet,
) -> Result<ProtectionPlan, ReconcileError> {
    let transition = current.enabled != settings.enabled
        && changes.record(
            "branch_protection",
            state_label(current.enabled),
            state_label(settings.enabled),
        );

    if !settings.enabled {
        return Ok(if transition {
            ProtectionPlan::Remove
        } else {
            ProtectionPlan::Unchanged
        });
    }

    let mut desired = current.clone();
    desired.enabled = true;
    let mut changed = transition;

    // Any review setting switches review enforcement on.
    let reviews_enabled = settings.configures_reviews().then_some(true);
    changed |= reconcile_to_desired_state(
        changes,
        "pull_request_reviews_enabled",
        reviews_enabled.as_ref(),
        &mut desired.pull_request_reviews_enabled,
    );
    changed |= reconcile_to_desired_state(
        changes,
        "required_reviews",
        settings.required_reviews.as_ref(),
        &mut desired.required_reviews,
    );
    changed |= reconcile_to_desired_state(
        changes,
        "dismiss_stale_reviews",
        settings.dismiss_stale_reviews.as_ref(),
        &mut desired.dismiss_stale_reviews,
    );
    changed |= reconcile_to_desired_state(
        changes,
        "require_code_owner_reviews",
        settings.require_code_owner_reviews.as_ref(),
        &mut desired.require_code_owner_reviews,
    );

    changed |= reconcile_to_desired_state(
        changes,
        "require_status_checks",
        settings.require_status_checks.as_ref(),
        &mut desired.status_checks_enabled,
    );
    changed |= reconcile_to_desired_state(
        changes,
        "require_branches_up_to_date",
        settings.require_branches_up_to_date.as_ref(),
        &mut desired.require_branches_up_to_date,
    );

    let contexts = settings
        .status_check_contexts
        .as_ref()
        .filter(|contexts| !contexts.is_empty());
    if contexts.is_some() {
        changed |= reconcile_to_desired_state(
            changes,
            "status_check_contexts",
            contexts,
            &mut desired.status_check_contexts,
        );
        // GitHub accepts either contexts or checks, never both.
        desired.status_check_checks.clear();
    }

    changed |= reconcile_to_desired_state(
        changes,
        "include_admins",
        settings.include_admins.as_ref(),
        &mut desired.include_admins,
    );
    changed |= reconcile_to_desired_state(
        changes,
        "require_linear_history",
        settings.require_linear_history.as_ref(),
        &mut desired.require_linear_history,
    );
    changed |= reconcile_to_desired_state(
        changes,
        "require_signed_commits",
        settings.require_signed_commits.as_ref(),
        &mut desired.require_signed_commits,
    );
    changed |= reconcile_to_desired_state(
        changes,
        "require_conversation_resolution",
        settings.require_conversation_resolution.as_ref(),
        &mut desired.require_conversation_resolution,
    );
    changed |= reconcile_to_desired_state(
        changes,
        "allow_force_pushes",
        settings.allow_force_pushes.as_ref(),
        &mut desired.allow_force_pushes,
    );
    changed |= reconcile_to_desired_state(
        changes,
        "allow_deletions",
        settings.allow_deletions.as_ref(),
        &mut desired.allow_deletions,
    );

    if desired.status_checks_enabled
        && desired.status_check_contexts.is_empty()
        && desired.status_check_checks.is_empty()
    {
        return Err(ReconcileError::StatusChecksWithoutContexts {
            repository: repository.to_string(),
            pattern: settings.pattern.clone(),
        });
    }

    if !changed {
        return Ok(ProtectionPlan::Unchanged);
    }

    Ok(ProtectionPlan::Replace {
        signed_commits: settings.require_signed_commits,
        desired: Box::new(desired),
    })
}
