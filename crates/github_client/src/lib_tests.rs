//! Unit tests for the github_client crate.

use super::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OWNER: &str = "test-org";
const REPO: &str = "test-repo";

fn create_test_client(mock_server: &MockServer) -> GitHubClient {
    let base_uri = Url::parse(&mock_server.uri()).expect("Invalid mock server URI");
    let octocrab = create_token_client("test-token", Some(&base_uri)).unwrap();
    GitHubClient::new(octocrab)
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({
        "message": "Not Found",
        "documentation_url": "https://docs.github.com/rest"
    }))
}

#[test]
fn test_api_path_encodes_segments() {
    let segments = ["repos", OWNER, REPO, "branches", "rel/v1", "protection"];
    let path = api_path(&segments).unwrap();

    assert_eq!(
        path,
        "/repos/test-org/test-repo/branches/rel%2Fv1/protection"
    );
}

#[tokio::test]
async fn test_get_repository_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "name": REPO,
            "owner": { "login": OWNER },
            "private": true,
            "allow_squash_merge": true,
            "allow_merge_commit": false,
            "has_pages": false,
            "topics": ["rust"],
            "default_branch": "main"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let snapshot = client
        .get_repository(OWNER, REPO)
        .await
        .expect("Request failed")
        .expect("Repository should exist");

    assert_eq!(snapshot.owner, OWNER);
    assert_eq!(snapshot.name, REPO);
    assert!(snapshot.private);
    assert!(snapshot.allow_squash_merge);
    assert!(!snapshot.allow_merge_commit);
    assert_eq!(snapshot.topics, vec!["rust".to_string()]);
    assert_eq!(snapshot.default_branch, "main");
}

#[tokio::test]
async fn test_get_repository_not_found_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}")))
        .respond_with(not_found())
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.get_repository(OWNER, REPO).await;

    assert_eq!(result, Ok(None));
}

#[tokio::test]
async fn test_get_repository_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}")))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "Server Error"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.get_repository(OWNER, REPO).await;

    match result {
        Err(Error::Api { status, .. }) => assert_eq!(status, 500),
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_repository_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}")))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "API rate limit exceeded for user ID 1."
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.get_repository(OWNER, REPO).await;

    assert_eq!(result, Err(Error::RateLimitExceeded));
}

#[tokio::test]
async fn test_get_repository_bad_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}")))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Bad credentials"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.get_repository(OWNER, REPO).await;

    assert_eq!(result, Err(Error::AuthError("Bad credentials".to_string())));
}

#[tokio::test]
async fn test_update_repository_settings_sends_sparse_patch_then_topics() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path(format!("/repos/{OWNER}/{REPO}")))
        .and(body_json(json!({
            "allow_merge_commit": false,
            "private": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 1 })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path(format!("/repos/{OWNER}/{REPO}/topics")))
        .and(body_json(json!({ "names": ["rust", "cli"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "names": ["rust", "cli"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let update = RepositorySettingsUpdate {
        allow_merge_commit: Some(false),
        private: Some(true),
        topics: Some(vec!["rust".to_string(), "cli".to_string()]),
        ..Default::default()
    };

    let result = client
        .update_repository_settings(OWNER, REPO, &update)
        .await;

    assert_eq!(result, Ok(()));
}

#[tokio::test]
async fn test_update_repository_settings_topics_only_skips_patch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 1 })))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path(format!("/repos/{OWNER}/{REPO}/topics")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "names": ["rust"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let update = RepositorySettingsUpdate {
        topics: Some(vec!["rust".to_string()]),
        ..Default::default()
    };

    let result = client
        .update_repository_settings(OWNER, REPO, &update)
        .await;

    assert_eq!(result, Ok(()));
}

#[tokio::test]
async fn test_update_repository_settings_validation_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path(format!("/repos/{OWNER}/{REPO}")))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Validation Failed"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let update = RepositorySettingsUpdate {
        default_branch: Some("does-not-exist".to_string()),
        ..Default::default()
    };

    let result = client
        .update_repository_settings(OWNER, REPO, &update)
        .await;

    assert_eq!(
        result,
        Err(Error::Api {
            operation: "update repository".to_string(),
            status: 422,
            message: "Validation Failed".to_string(),
        })
    );
}

#[tokio::test]
async fn test_get_branch_protection_not_found_is_unprotected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!(
            "/repos/{OWNER}/{REPO}/branches/main/protection"
        )))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Branch not protected"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.get_branch_protection(OWNER, REPO, "main").await;

    assert_eq!(result, Ok(BranchProtectionSnapshot::unprotected()));
}

#[tokio::test]
async fn test_get_branch_protection_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!(
            "/repos/{OWNER}/{REPO}/branches/main/protection"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "required_status_checks": {
                "strict": false,
                "contexts": ["ci/build"],
                "checks": [{ "context": "ci/build", "app_id": null }]
            },
            "required_pull_request_reviews": {
                "dismiss_stale_reviews": false,
                "require_code_owner_reviews": true,
                "required_approving_review_count": 1
            },
            "enforce_admins": { "enabled": false },
            "required_signatures": { "enabled": false }
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let snapshot = client
        .get_branch_protection(OWNER, REPO, "main")
        .await
        .expect("Request failed");

    assert!(snapshot.enabled);
    assert!(snapshot.pull_request_reviews_enabled);
    assert_eq!(snapshot.required_reviews, 1);
    assert!(snapshot.require_code_owner_reviews);
    assert!(snapshot.status_checks_enabled);
    assert_eq!(snapshot.status_check_contexts, vec!["ci/build".to_string()]);
    assert!(!snapshot.include_admins);
}

#[tokio::test]
async fn test_update_branch_protection_sends_full_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!(
            "/repos/{OWNER}/{REPO}/branches/main/protection"
        )))
        .and(body_json(json!({
            "required_status_checks": {
                "strict": true,
                "contexts": ["ci/test"],
                "checks": []
            },
            "enforce_admins": true,
            "required_pull_request_reviews": {
                "dismiss_stale_reviews": true,
                "require_code_owner_reviews": false,
                "required_approving_review_count": 2
            },
            "restrictions": null,
            "required_linear_history": true,
            "allow_force_pushes": false,
            "allow_deletions": false,
            "required_conversation_resolution": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "x"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let protection = BranchProtectionSnapshot {
        enabled: true,
        pull_request_reviews_enabled: true,
        required_reviews: 2,
        dismiss_stale_reviews: true,
        status_checks_enabled: true,
        require_branches_up_to_date: true,
        status_check_contexts: vec!["ci/test".to_string()],
        include_admins: true,
        require_linear_history: true,
        ..Default::default()
    };

    let result = client
        .update_branch_protection(OWNER, REPO, "main", &protection)
        .await;

    assert_eq!(result, Ok(()));
}

#[tokio::test]
async fn test_remove_branch_protection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!(
            "/repos/{OWNER}/{REPO}/branches/main/protection"
        )))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.remove_branch_protection(OWNER, REPO, "main").await;

    assert_eq!(result, Ok(()));
}

#[tokio::test]
async fn test_remove_branch_protection_forbidden() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!(
            "/repos/{OWNER}/{REPO}/branches/main/protection"
        )))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "Resource not accessible by integration"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.remove_branch_protection(OWNER, REPO, "main").await;

    match result {
        Err(Error::Api { status, message, .. }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "Resource not accessible by integration");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_set_signed_commits_requirement_enable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!(
            "/repos/{OWNER}/{REPO}/branches/main/protection/required_signatures"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "enabled": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client
        .set_signed_commits_requirement(OWNER, REPO, "main", true)
        .await;

    assert_eq!(result, Ok(()));
}

#[tokio::test]
async fn test_set_signed_commits_requirement_disable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!(
            "/repos/{OWNER}/{REPO}/branches/main/protection/required_signatures"
        )))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client
        .set_signed_commits_requirement(OWNER, REPO, "main", false)
        .await;

    assert_eq!(result, Ok(()));
}

#[tokio::test]
async fn test_authenticated_user() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "octocat",
            "id": 1
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let user = client.authenticated_user().await.expect("Request failed");

    assert_eq!(user.login, "octocat");
}

#[tokio::test]
async fn test_create_token_client_without_base_uri() {
    let result = create_token_client("test-token", None);

    assert!(result.is_ok());
}
