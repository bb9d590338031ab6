//! Tests for configuration loading

use super::*;
use crate::Visibility;
use std::io::Write;
use tempfile::{Builder, TempDir};

fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("Failed to create file");
    file.write_all(content.as_bytes())
        .expect("Failed to write file");
    path
}

const VALID_YAML: &str = r#"
repositories:
  - owner: my-org
    name: service-a
  - owner: my-org
    name: service-b

settings:
  allow_merge_commit: false
  visibility: private
  topics: ["rust", "cli"]
  branch_protection:
    enabled: true
    pattern: main
    required_reviews: 2
"#;

#[test]
fn test_load_yaml_configuration() {
    let dir = Builder::new().prefix("janitor-config").tempdir().unwrap();
    let path = write_file(&dir, "repo-janitor.yaml", VALID_YAML);

    let config = JanitorConfig::load(&path).expect("Failed to load configuration");

    assert_eq!(config.repositories.len(), 2);
    assert_eq!(config.repositories[1].full_name(), "my-org/service-b");
    assert_eq!(config.settings.allow_merge_commit, Some(false));
    assert_eq!(config.settings.visibility, Some(Visibility::Private));
    assert_eq!(
        config.settings.topics,
        Some(vec!["rust".to_string(), "cli".to_string()])
    );
    let bp = config.settings.branch_protection.expect("branch protection");
    assert!(bp.enabled);
    assert_eq!(bp.required_reviews, Some(2));
}

#[test]
fn test_load_toml_configuration() {
    let dir = Builder::new().prefix("janitor-config").tempdir().unwrap();
    let path = write_file(
        &dir,
        "repo-janitor.toml",
        r#"
[[repositories]]
owner = "my-org"
name = "service-a"

[settings]
has_wiki = false

[settings.branch_protection]
enabled = false
pattern = "main"
"#,
    );

    let config = JanitorConfig::load(&path).expect("Failed to load configuration");

    assert_eq!(config.repositories.len(), 1);
    assert_eq!(config.settings.has_wiki, Some(false));
    assert!(!config.settings.branch_protection.unwrap().enabled);
}

#[test]
fn test_load_missing_file() {
    let dir = Builder::new().prefix("janitor-config").tempdir().unwrap();
    let path = dir.path().join("does-not-exist.yaml");

    let result = JanitorConfig::load(&path);

    assert!(matches!(
        result,
        Err(ConfigurationError::FileNotFound { .. })
    ));
}

#[test]
fn test_load_invalid_yaml() {
    let dir = Builder::new().prefix("janitor-config").tempdir().unwrap();
    let path = write_file(&dir, "broken.yaml", "repositories: [\n  - owner");

    let result = JanitorConfig::load(&path);

    assert!(matches!(result, Err(ConfigurationError::ParseError { .. })));
}

#[test]
fn test_unknown_top_level_key_is_a_parse_error() {
    let result = JanitorConfig::from_yaml_str(
        r#"
repositories:
  - owner: my-org
    name: repo
setings:
  has_wiki: false
"#,
    );

    assert!(matches!(result, Err(ConfigurationError::ParseError { .. })));
}

#[test]
fn test_loading_runs_validation() {
    let result = JanitorConfig::from_yaml_str("settings:\n  has_wiki: false\n");

    assert_eq!(
        result,
        Err(ConfigurationError::RequiredConfigMissing {
            key: "repositories".to_string()
        })
    );
}
