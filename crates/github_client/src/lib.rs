//! Crate for interacting with the GitHub REST API.
//!
//! This crate provides a token-authenticated client that reads and writes the
//! repository settings and branch protection rules managed by the janitor.
//! The [`RepositorySettingsClient`] trait is the seam the reconciliation engine
//! depends on; [`GitHubClient`] is its octocrab-backed implementation.

use async_trait::async_trait;
use octocrab::{Octocrab, Result as OctocrabResult};
use tracing::{debug, error, info, instrument};
use url::Url;

pub mod branch_protection;
pub use branch_protection::{
    BranchProtectionSnapshot, BranchRestrictions, ProtectionRequest, RequiredStatusCheck,
};

pub mod errors;
pub use errors::Error;

pub mod repository;
pub use repository::{RepositorySettingsUpdate, RepositorySnapshot};

pub mod user;
pub use user::User;

use branch_protection::ProtectionResponse;
use repository::{RepositoryResponse, TopicsRequest};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Host used to build request paths; only the path part is ever sent.
const PATH_BASE: &str = "https://api.github.com";

/// Read and write access to the remote settings of repositories.
///
/// Absence is part of the contract: a missing repository is `Ok(None)` and a
/// branch without protection is an unprotected snapshot. Every other failure
/// is an [`Error`].
#[async_trait]
pub trait RepositorySettingsClient: Send + Sync {
    /// Fetches the current settings of a repository.
    ///
    /// Returns `Ok(None)` when the repository does not exist or is not
    /// visible to the authenticated account.
    async fn get_repository(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Option<RepositorySnapshot>, Error>;

    /// Applies a sparse settings update.
    ///
    /// Only the populated fields of `settings` are sent. Topics travel through
    /// their own endpoint after the main update.
    async fn update_repository_settings(
        &self,
        owner: &str,
        repo: &str,
        settings: &RepositorySettingsUpdate,
    ) -> Result<(), Error>;

    /// Fetches the protection rule of the branch matching `pattern`.
    ///
    /// A branch without protection yields [`BranchProtectionSnapshot::unprotected`].
    async fn get_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        pattern: &str,
    ) -> Result<BranchProtectionSnapshot, Error>;

    /// Replaces the protection rule of the branch with `protection`.
    async fn update_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        pattern: &str,
        protection: &BranchProtectionSnapshot,
    ) -> Result<(), Error>;

    /// Removes the protection rule of the branch entirely.
    async fn remove_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        pattern: &str,
    ) -> Result<(), Error>;

    /// Turns the signed commits requirement of a protected branch on or off.
    async fn set_signed_commits_requirement(
        &self,
        owner: &str,
        repo: &str,
        pattern: &str,
        required: bool,
    ) -> Result<(), Error>;
}

/// A client for interacting with the GitHub API, authenticated with a token.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Returns the account the client is authenticated as.
    ///
    /// Used to verify a token before any repository is touched.
    ///
    /// # Errors
    ///
    /// Returns `Error::AuthError` when GitHub rejects the credentials.
    #[instrument(skip(self))]
    pub async fn authenticated_user(&self) -> Result<User, Error> {
        let response: OctocrabResult<User> = self.client.get("/user", None::<&()>).await;
        match response {
            Ok(user) => {
                debug!(login = user.login, "Resolved authenticated user");
                Ok(user)
            }
            Err(e) => {
                log_octocrab_error("Failed to get the authenticated user", &e);
                Err(map_octocrab_error("get authenticated user", e))
            }
        }
    }

    async fn replace_topics(
        &self,
        owner: &str,
        repo: &str,
        topics: &[String],
    ) -> Result<(), Error> {
        let path = api_path(&["repos", owner, repo, "topics"])?;
        let response: OctocrabResult<serde_json::Value> = self
            .client
            .put(path, Some(&TopicsRequest { names: topics }))
            .await;
        match response {
            Ok(_) => Ok(()),
            Err(e) => {
                log_octocrab_error("Failed to replace repository topics", &e);
                Err(map_octocrab_error("replace topics", e))
            }
        }
    }

    async fn delete(&self, operation: &str, path: String) -> Result<(), Error> {
        let response = match self.client._delete(path, None::<&()>).await {
            Ok(r) => r,
            Err(e) => {
                log_octocrab_error(&format!("Failed to {operation}"), &e);
                return Err(map_octocrab_error(operation, e));
            }
        };

        match octocrab::map_github_error(response).await {
            Ok(_) => Ok(()),
            Err(e) => {
                log_octocrab_error(&format!("Failed to {operation}"), &e);
                Err(map_octocrab_error(operation, e))
            }
        }
    }
}

#[async_trait]
impl RepositorySettingsClient for GitHubClient {
    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn get_repository(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Option<RepositorySnapshot>, Error> {
        let path = api_path(&["repos", owner, repo])?;
        let response: OctocrabResult<RepositoryResponse> = self.client.get(path, None::<&()>).await;
        match response {
            Ok(r) => Ok(Some(r.into_snapshot(owner, repo))),
            Err(e) => match map_octocrab_error("get repository", e) {
                Error::NotFound => {
                    info!(owner = owner, repo = repo, "Repository not found");
                    Ok(None)
                }
                err => {
                    error!(error_message = %err, "Failed to get repository");
                    Err(err)
                }
            },
        }
    }

    #[instrument(skip(self, settings), fields(owner = %owner, repo = %repo))]
    async fn update_repository_settings(
        &self,
        owner: &str,
        repo: &str,
        settings: &RepositorySettingsUpdate,
    ) -> Result<(), Error> {
        if settings.has_patch_fields() {
            let path = api_path(&["repos", owner, repo])?;
            let response: OctocrabResult<serde_json::Value> =
                self.client.patch(path, Some(settings)).await;
            if let Err(e) = response {
                log_octocrab_error("Failed to update repository settings", &e);
                return Err(map_octocrab_error("update repository", e));
            }
        }

        if let Some(topics) = &settings.topics {
            self.replace_topics(owner, repo, topics).await?;
        }

        info!(owner = owner, repo = repo, "Updated repository settings");
        Ok(())
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo, pattern = %pattern))]
    async fn get_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        pattern: &str,
    ) -> Result<BranchProtectionSnapshot, Error> {
        let path = api_path(&["repos", owner, repo, "branches", pattern, "protection"])?;
        let response: OctocrabResult<ProtectionResponse> = self.client.get(path, None::<&()>).await;
        match response {
            Ok(r) => Ok(BranchProtectionSnapshot::from(r)),
            Err(e) => match map_octocrab_error("get branch protection", e) {
                Error::NotFound => {
                    debug!(pattern = pattern, "Branch is not protected");
                    Ok(BranchProtectionSnapshot::unprotected())
                }
                err => {
                    error!(error_message = %err, "Failed to get branch protection");
                    Err(err)
                }
            },
        }
    }

    #[instrument(skip(self, protection), fields(owner = %owner, repo = %repo, pattern = %pattern))]
    async fn update_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        pattern: &str,
        protection: &BranchProtectionSnapshot,
    ) -> Result<(), Error> {
        let path = api_path(&["repos", owner, repo, "branches", pattern, "protection"])?;
        let body = ProtectionRequest::from(protection);
        let response: OctocrabResult<serde_json::Value> = self.client.put(path, Some(&body)).await;
        match response {
            Ok(_) => {
                info!(pattern = pattern, "Updated branch protection");
                Ok(())
            }
            Err(e) => {
                log_octocrab_error("Failed to update branch protection", &e);
                Err(map_octocrab_error("update branch protection", e))
            }
        }
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo, pattern = %pattern))]
    async fn remove_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        pattern: &str,
    ) -> Result<(), Error> {
        let path = api_path(&["repos", owner, repo, "branches", pattern, "protection"])?;
        self.delete("remove branch protection", path).await?;
        info!(pattern = pattern, "Removed branch protection");
        Ok(())
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo, pattern = %pattern))]
    async fn set_signed_commits_requirement(
        &self,
        owner: &str,
        repo: &str,
        pattern: &str,
        required: bool,
    ) -> Result<(), Error> {
        let path = api_path(&[
            "repos",
            owner,
            repo,
            "branches",
            pattern,
            "protection",
            "required_signatures",
        ])?;

        if required {
            let response: OctocrabResult<serde_json::Value> =
                self.client.post(path, None::<&()>).await;
            if let Err(e) = response {
                log_octocrab_error("Failed to require signed commits", &e);
                return Err(map_octocrab_error("require signed commits", e));
            }
        } else {
            self.delete("remove signed commits", path).await?;
        }

        info!(
            pattern = pattern,
            required = required,
            "Updated signed commits requirement"
        );
        Ok(())
    }
}

/// Creates an [`Octocrab`] client authenticated with a personal access token.
///
/// `base_uri` points the client at a GitHub Enterprise Server API; when it is
/// `None` the public GitHub API is used.
///
/// # Errors
///
/// Returns `Error::AuthError` if the base URI is rejected or the client cannot be built.
pub fn create_token_client(token: &str, base_uri: Option<&Url>) -> Result<Octocrab, Error> {
    let mut builder = Octocrab::builder().personal_token(token.to_string());
    if let Some(uri) = base_uri {
        builder = builder
            .base_uri(uri.as_str())
            .map_err(|e| Error::AuthError(format!("invalid API URL '{uri}': {e}")))?;
    }

    builder.build().map_err(|e| Error::AuthError(e.to_string()))
}

/// Joins path segments into an API path, percent-encoding each segment.
///
/// Branch patterns may contain `/`, which must not be read as a separator.
fn api_path(segments: &[&str]) -> Result<String, Error> {
    let invalid = || Error::InvalidRequest(format!("cannot build a path from {segments:?}"));
    let mut url = Url::parse(PATH_BASE).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|_| invalid())?
        .clear()
        .extend(segments);
    Ok(url.path().to_string())
}

/// Converts an octocrab error into the crate error taxonomy.
fn map_octocrab_error(operation: &str, e: octocrab::Error) -> Error {
    match e {
        octocrab::Error::GitHub { source, .. } => {
            let status = source.status_code.as_u16();
            match status {
                404 => Error::NotFound,
                401 => Error::AuthError(source.message),
                429 => Error::RateLimitExceeded,
                403 if source.message.to_lowercase().contains("rate limit") => {
                    Error::RateLimitExceeded
                }
                _ => Error::Api {
                    operation: operation.to_string(),
                    status,
                    message: source.message,
                },
            }
        }
        octocrab::Error::Json { source, .. } => Error::InvalidResponse(source.to_string()),
        octocrab::Error::Serde { source, .. } => Error::InvalidResponse(source.to_string()),
        other => Error::Transport {
            operation: operation.to_string(),
            message: other.to_string(),
        },
    }
}

fn log_octocrab_error(message: &str, e: &octocrab::Error) {
    match e {
        octocrab::Error::GitHub { source, .. } => {
            if source.status_code.as_u16() == 404 {
                debug!(
                    error_message = source.message,
                    "{}. Resource not found",
                    message
                );
            } else {
                error!(
                    error_message = source.message,
                    status = source.status_code.as_u16(),
                    "{}. Received an error from GitHub",
                    message
                )
            }
        }
        octocrab::Error::UriParse { source, .. } => error!(
            error_message = source.to_string(),
            "{}. Failed to parse URI.",
            message
        ),
        octocrab::Error::Uri { source, .. } => error!(
            error_message = source.to_string(),
            "{}. Failed to parse URI.",
            message
        ),
        octocrab::Error::Json { source, .. } => error!(
            error_message = source.to_string(),
            "{}. The response could not be parsed.",
            message
        ),
        _ => error!(error_message = e.to_string(), message),
    };
}
