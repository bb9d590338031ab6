//! In-memory stand-in for the GitHub client used by the engine tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use github_client::{
    BranchProtectionSnapshot, Error, RepositorySettingsClient, RepositorySettingsUpdate,
    RepositorySnapshot,
};

/// A call received by [`MockClient`]. Repositories are identified as `owner/name`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    GetRepository(String),
    UpdateRepositorySettings(String, RepositorySettingsUpdate),
    GetBranchProtection(String, String),
    UpdateBranchProtection(String, String, BranchProtectionSnapshot),
    RemoveBranchProtection(String, String),
    SetSignedCommits(String, String, bool),
}

impl Call {
    fn is_mutation(&self) -> bool {
        !matches!(self, Self::GetRepository(_) | Self::GetBranchProtection(..))
    }
}

/// Serves canned snapshots and records every call.
#[derive(Default)]
pub(crate) struct MockClient {
    repositories: HashMap<String, RepositorySnapshot>,
    protections: HashMap<String, BranchProtectionSnapshot>,
    failing_fetches: HashSet<String>,
    fail_settings_update: bool,
    fail_protection_fetch: bool,
    fail_protection_update: bool,
    fail_signed_commits: bool,
    calls: Mutex<Vec<Call>>,
}

pub(crate) fn server_error(operation: &str) -> Error {
    Error::Api {
        operation: operation.to_string(),
        status: 500,
        message: "Server Error".to_string(),
    }
}

fn full_name(owner: &str, repo: &str) -> String {
    format!("{owner}/{repo}")
}

impl MockClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_repository(mut self, snapshot: RepositorySnapshot) -> Self {
        self.repositories
            .insert(full_name(&snapshot.owner, &snapshot.name), snapshot);
        self
    }

    pub(crate) fn with_protection(
        mut self,
        repository: &str,
        protection: BranchProtectionSnapshot,
    ) -> Self {
        self.protections.insert(repository.to_string(), protection);
        self
    }

    pub(crate) fn with_failing_fetch(mut self, repository: &str) -> Self {
        self.failing_fetches.insert(repository.to_string());
        self
    }

    pub(crate) fn with_failing_settings_update(mut self) -> Self {
        self.fail_settings_update = true;
        self
    }

    pub(crate) fn with_failing_protection_fetch(mut self) -> Self {
        self.fail_protection_fetch = true;
        self
    }

    pub(crate) fn with_failing_protection_update(mut self) -> Self {
        self.fail_protection_update = true;
        self
    }

    pub(crate) fn with_failing_signed_commits(mut self) -> Self {
        self.fail_signed_commits = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(Call::is_mutation)
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RepositorySettingsClient for MockClient {
    async fn get_repository(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Option<RepositorySnapshot>, Error> {
        let name = full_name(owner, repo);
        self.record(Call::GetRepository(name.clone()));
        if self.failing_fetches.contains(&name) {
            return Err(server_error("get repository"));
        }
        Ok(self.repositories.get(&name).cloned())
    }

    async fn update_repository_settings(
        &self,
        owner: &str,
        repo: &str,
        settings: &RepositorySettingsUpdate,
    ) -> Result<(), Error> {
        self.record(Call::UpdateRepositorySettings(
            full_name(owner, repo),
            settings.clone(),
        ));
        if self.fail_settings_update {
            return Err(server_error("update repository"));
        }
        Ok(())
    }

    async fn get_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        pattern: &str,
    ) -> Result<BranchProtectionSnapshot, Error> {
        let name = full_name(owner, repo);
        self.record(Call::GetBranchProtection(name.clone(), pattern.to_string()));
        if self.fail_protection_fetch {
            return Err(server_error("get branch protection"));
        }
        Ok(self
            .protections
            .get(&name)
            .cloned()
            .unwrap_or_else(BranchProtectionSnapshot::unprotected))
    }

    async fn update_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        pattern: &str,
        protection: &BranchProtectionSnapshot,
    ) -> Result<(), Error> {
        self.record(Call::UpdateBranchProtection(
            full_name(owner, repo),
            pattern.to_string(),
            protection.clone(),
        ));
        if self.fail_protection_update {
            return Err(server_error("update branch protection"));
        }
        Ok(())
    }

    async fn remove_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        pattern: &str,
    ) -> Result<(), Error> {
        self.record(Call::RemoveBranchProtection(
            full_name(owner, repo),
            pattern.to_string(),
        ));
        if self.fail_protection_update {
            return Err(server_error("remove branch protection"));
        }
        Ok(())
    }

    async fn set_signed_commits_requirement(
        &self,
        owner: &str,
        repo: &str,
        pattern: &str,
        required: bool,
    ) -> Result<(), Error> {
        self.record(Call::SetSignedCommits(
            full_name(owner, repo),
            pattern.to_string(),
            required,
        ));
        if self.fail_signed_commits {
            return Err(server_error("require signed commits"));
        }
        Ok(())
    }
}
