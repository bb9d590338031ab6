//! Error types for reconciliation.
//!
//! Failures never cross repository boundaries: each one is attached to the
//! [`ReconcileResult`](crate::ReconcileResult) of the repository it belongs to.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors recorded while reconciling one repository.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReconcileError {
    /// The repository settings could not be fetched.
    #[error("failed to fetch repository {repository}: {source}")]
    Fetch {
        repository: String,
        source: github_client::Error,
    },

    /// The settings patch was rejected or never reached GitHub.
    #[error("failed to update settings of {repository}: {source}")]
    UpdateSettings {
        repository: String,
        source: github_client::Error,
    },

    #[error("failed to fetch branch protection of {repository} (branch: {pattern}): {source}")]
    FetchBranchProtection {
        repository: String,
        pattern: String,
        source: github_client::Error,
    },

    #[error("failed to update branch protection of {repository} (branch: {pattern}): {source}")]
    UpdateBranchProtection {
        repository: String,
        pattern: String,
        source: github_client::Error,
    },

    #[error("failed to remove branch protection of {repository} (branch: {pattern}): {source}")]
    RemoveBranchProtection {
        repository: String,
        pattern: String,
        source: github_client::Error,
    },

    /// The follow-up call for the signed commits requirement failed.
    ///
    /// The main protection update may have succeeded.
    #[error("failed to update signed commits requirement of {repository} (branch: {pattern}): {source}")]
    UpdateSignedCommits {
        repository: String,
        pattern: String,
        source: github_client::Error,
    },

    /// Status checks would be enforced without a single check to satisfy.
    ///
    /// Applying such a rule blocks every merge, so nothing is sent.
    #[error(
        "branch protection {repository} (branch: {pattern}): require_status_checks is true \
         but no status_check_contexts are configured and none exist on the branch"
    )]
    StatusChecksWithoutContexts { repository: String, pattern: String },

    /// A change was detected that GitHub does not allow to be made through the API.
    #[error("{field} of {repository} cannot be changed through the API: {guidance}")]
    UnsupportedMutation {
        repository: String,
        field: String,
        guidance: String,
    },

    /// More than one failure was recorded for the same repository.
    #[error("{}", join_errors(.0))]
    Multiple(Vec<ReconcileError>),
}

impl ReconcileError {
    /// Returns true if running again without operator action may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Fetch { source, .. }
            | Self::UpdateSettings { source, .. }
            | Self::FetchBranchProtection { source, .. }
            | Self::UpdateBranchProtection { source, .. }
            | Self::RemoveBranchProtection { source, .. }
            | Self::UpdateSignedCommits { source, .. } => matches!(
                source,
                github_client::Error::RateLimitExceeded | github_client::Error::Transport { .. }
            ),
            Self::StatusChecksWithoutContexts { .. } | Self::UnsupportedMutation { .. } => false,
            Self::Multiple(errors) => errors.iter().all(Self::is_retryable),
        }
    }
}

fn join_errors(errors: &[ReconcileError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
