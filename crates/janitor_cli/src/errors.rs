use std::io;

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the repo-janitor CLI.
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file could not be loaded, validated or created.
    #[error("Configuration error: {0}")]
    Config(#[from] config_manager::ConfigurationError),

    /// A GitHub request made by the CLI itself failed.
    ///
    /// Failures during reconciliation are reported per repository instead.
    #[error("GitHub error: {0}")]
    GitHub(#[from] github_client::Error),

    /// No token was supplied through `--token` or `GITHUB_TOKEN`.
    #[error("No GitHub token provided. Pass --token or set the GITHUB_TOKEN environment variable")]
    MissingToken,

    /// Writing a file failed.
    #[error("Failed to write {path}: {source}")]
    WriteFile { path: String, source: io::Error },

    /// The results could not be rendered as JSON.
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// At least one repository carries an error.
    #[error("{failed} of {total} repositories failed to reconcile")]
    ReconciliationFailed { failed: usize, total: usize },
}
