//! Command implementations for the repo-janitor CLI.
//!
//! - `init_cmd`: writes an example configuration file
//! - `sync_cmd`: reconciles repositories, either applying or previewing changes
//! - `validate_cmd`: checks the configuration file and the GitHub token

pub mod init_cmd;
pub mod sync_cmd;
pub mod validate_cmd;

use github_client::{create_token_client, GitHubClient};
use tracing::debug;

use crate::errors::Error;
use crate::GlobalArgs;

/// Builds an authenticated GitHub client from the global arguments.
pub(crate) fn connect(global: &GlobalArgs) -> Result<GitHubClient, Error> {
    let token = global
        .token
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or(Error::MissingToken)?;

    debug!(api_url = ?global.api_url, "Creating GitHub client");
    let octocrab = create_token_client(token, global.api_url.as_ref())?;
    Ok(GitHubClient::new(octocrab))
}
