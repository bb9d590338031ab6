//! Reconciliation engine for repository settings.
//!
//! Compares the desired settings of a [`JanitorConfig`] against the live state
//! of each configured repository and either reports the differences (dry-run)
//! or applies them.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use config_manager::JanitorConfig;
//! use github_client::{create_token_client, GitHubClient};
//! use janitor_core::Reconciler;
//!
//! # async fn example(config: JanitorConfig) -> Result<(), Box<dyn std::error::Error>> {
//! let client = GitHubClient::new(create_token_client("ghp_example", None)?);
//! let reconciler = Reconciler::new(Arc::new(client));
//!
//! for result in reconciler.reconcile_all(&config, true).await {
//!     for change in &result.changes {
//!         println!("{}: {}", result.repository, change);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use config_manager::{BranchProtectionSettings, DesiredSettings, JanitorConfig, RepositoryRef};
use github_client::RepositorySettingsClient;
use tracing::{debug, info, instrument, warn};

pub mod branch_protection;
pub use branch_protection::{plan_branch_protection, ProtectionPlan};

pub mod errors;
pub use errors::ReconcileError;

pub mod field;
pub use field::{reconcile_to_desired_state, reconcile_to_patch, ChangeSet, FieldValue};

pub mod report;
pub use report::{Change, ReconcileResult, RunSummary};

pub mod settings;
pub use settings::{plan_settings, SettingsPlan};

#[cfg(test)]
mod test_support;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Drives reconciliation of every configured repository.
pub struct Reconciler {
    client: Arc<dyn RepositorySettingsClient>,
}

impl Reconciler {
    pub fn new(client: Arc<dyn RepositorySettingsClient>) -> Self {
        Self { client }
    }

    /// Reconciles all repositories of `config`, one after another.
    ///
    /// Never fails: every error is attached to the result of the repository
    /// it occurred for, and later repositories are still processed.
    #[instrument(
        skip(self, config),
        fields(repositories = config.repositories.len(), dry_run = dry_run)
    )]
    pub async fn reconcile_all(
        &self,
        config: &JanitorConfig,
        dry_run: bool,
    ) -> Vec<ReconcileResult> {
        let mut results = Vec::with_capacity(config.repositories.len());
        for repository in &config.repositories {
            let result = self.reconcile_repository(repository, &config.settings, dry_run);
            results.push(result.await);
        }

        let summary = RunSummary::from_results(&results);
        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            skipped = summary.skipped,
            changed = summary.changed,
            "Reconciliation complete"
        );

        results
    }

    /// Reconciles the settings and branch protection of one repository.
    #[instrument(skip(self, settings), fields(repository = %repository, dry_run = dry_run))]
    pub async fn reconcile_repository(
        &self,
        repository: &RepositoryRef,
        settings: &DesiredSettings,
        dry_run: bool,
    ) -> ReconcileResult {
        let full_name = repository.full_name();
        let mut result = ReconcileResult::new(full_name.clone());

        let current = match self
            .client
            .get_repository(&repository.owner, &repository.name)
            .await
        {
            Ok(Some(current)) => current,
            Ok(None) => {
                warn!(repository = %full_name, "Repository not found, skipping");
                return result;
            }
            Err(source) => {
                result.record_error(ReconcileError::Fetch {
                    repository: full_name,
                    source,
                });
                return result;
            }
        };
        result.exists = true;

        let mut changes = ChangeSet::new();
        let plan = plan_settings(settings, &current, &mut changes);
        debug!(
            changes = changes.len(),
            patch = ?plan.patch,
            "Planned repository settings"
        );

        if plan.needs_apply() && !dry_run {
            if let Err(source) = self
                .client
                .update_repository_settings(&repository.owner, &repository.name, &plan.patch)
                .await
            {
                result.record_error(ReconcileError::UpdateSettings {
                    repository: full_name.clone(),
                    source,
                });
            }
        }

        if plan.pages_changed {
            result.record_error(ReconcileError::UnsupportedMutation {
                repository: full_name.clone(),
                field: "github_pages".to_string(),
                guidance: settings::GITHUB_PAGES_GUIDANCE.to_string(),
            });
        }

        if let Some(protection) = &settings.branch_protection {
            if let Err(error) = self
                .reconcile_branch_protection(repository, protection, dry_run, &mut changes)
                .await
            {
                result.record_error(error);
            }
        }

        result.changes = changes.into_changes();
        info!(
            changes = result.changes.len(),
            success = result.is_success(),
            "Reconciled repository"
        );
        result
    }

    async fn reconcile_branch_protection(
        &self,
        repository: &RepositoryRef,
        settings: &BranchProtectionSettings,
        dry_run: bool,
        changes: &mut ChangeSet,
    ) -> Result<(), ReconcileError> {
        let full_name = repository.full_name();
        let pattern = settings.pattern.as_str();

        let current = self
            .client
            .get_branch_protection(&repository.owner, &repository.name, pattern)
            .await
            .map_err(|source| ReconcileError::FetchBranchProtection {
                repository: full_name.clone(),
                pattern: pattern.to_string(),
                source,
            })?;

        let plan = plan_branch_protection(&full_name, settings, &current, changes)?;
        if dry_run {
            return Ok(());
        }

        match plan {
            ProtectionPlan::Unchanged => {
                debug!(pattern = pattern, "Branch protection already up to date");
            }
            ProtectionPlan::Remove => {
                self.client
                    .remove_branch_protection(&repository.owner, &repository.name, pattern)
                    .await
                    .map_err(|source| ReconcileError::RemoveBranchProtection {
                        repository: full_name.clone(),
                        pattern: pattern.to_string(),
                        source,
                    })?;
            }
            ProtectionPlan::Replace {
                desired,
                signed_commits,
            } => {
                self.client
                    .update_branch_protection(
                        &repository.owner,
                        &repository.name,
                        pattern,
                        &desired,
                    )
                    .await
                    .map_err(|source| ReconcileError::UpdateBranchProtection {
                        repository: full_name.clone(),
                        pattern: pattern.to_string(),
                        source,
                    })?;

                if let Some(required) = signed_commits {
                    self.client
                        .set_signed_commits_requirement(
                            &repository.owner,
                            &repository.name,
                            pattern,
                            required,
                        )
                        .await
                        .map_err(|source| ReconcileError::UpdateSignedCommits {
                            repository: full_name.clone(),
                            pattern: pattern.to_string(),
                            source,
                        })?;
                }
            }
        }

        Ok(())
    }
}
