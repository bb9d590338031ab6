use super::*;

#[test]
fn test_config_error_is_wrapped() {
    let error: Error = config_manager::ConfigurationError::FileNotFound {
        path: "repo-janitor.yaml".to_string(),
    }
    .into();

    assert_eq!(
        error.to_string(),
        "Configuration error: Configuration file not found: repo-janitor.yaml"
    );
}

#[test]
fn test_github_error_is_wrapped() {
    let error: Error = github_client::Error::AuthError("Bad credentials".to_string()).into();

    assert_eq!(
        error.to_string(),
        "GitHub error: Failed to authenticate or initialize GitHub client: Bad credentials"
    );
}

#[test]
fn test_reconciliation_failed_message() {
    let error = Error::ReconciliationFailed {
        failed: 1,
        total: 3,
    };

    assert_eq!(error.to_string(), "1 of 3 repositories failed to reconcile");
}

#[test]
fn test_missing_token_mentions_environment_variable() {
    assert!(Error::MissingToken.to_string().contains("GITHUB_TOKEN"));
}
