//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when interacting with the GitHub API
//! through the github_client crate. Not-found responses are usually translated into
//! ordinary values by the client methods; the variants here cover everything else.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::Error;
///
/// match client.get_repository("my-org", "my-repo").await {
///     Ok(Some(repo)) => println!("Default branch: {}", repo.default_branch),
///     Ok(None) => println!("Repository does not exist"),
///     Err(Error::RateLimitExceeded) => eprintln!("Rate limit exceeded, retry later"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// GitHub answered the request with an error status.
    ///
    /// The message is the one GitHub returned in the response body.
    #[error("GitHub API request '{operation}' failed with status {status}: {message}")]
    Api {
        operation: String,
        status: u16,
        message: String,
    },

    /// Authentication or GitHub client initialization failure.
    ///
    /// This error occurs when:
    /// - The token is invalid, expired or lacks the required scopes
    /// - The client could not be built from the supplied settings
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// The GitHub API returned a response in an unexpected format.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// A request could not be built from the supplied arguments.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The requested resource was not found.
    ///
    /// This error occurs when a GitHub API request returns a 404 status code
    /// for a resource whose absence is not a normal outcome.
    #[error("Resource not found")]
    NotFound,

    /// GitHub API rate limit has been exceeded.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The request never produced a GitHub response (connection, TLS, decoding).
    #[error("GitHub API request '{operation}' failed: {message}")]
    Transport { operation: String, message: String },
}
