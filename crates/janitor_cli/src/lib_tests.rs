use super::*;
use std::path::Path;

#[test]
fn test_parse_sync_defaults() {
    let cli = Cli::try_parse_from(["repo-janitor", "sync"]).unwrap();

    assert!(matches!(
        cli.command,
        Commands::Sync(SyncArgs { dry_run: false })
    ));
    assert_eq!(cli.global.format, OutputFormat::Pretty);
    assert!(!cli.global.no_color);
}

#[test]
fn test_parse_sync_dry_run() {
    let cli = Cli::try_parse_from(["repo-janitor", "sync", "--dry-run"]).unwrap();

    assert!(matches!(
        cli.command,
        Commands::Sync(SyncArgs { dry_run: true })
    ));
}

#[test]
fn test_parse_global_options_after_subcommand() {
    let cli = Cli::try_parse_from([
        "repo-janitor",
        "plan",
        "--config",
        "settings.toml",
        "--token",
        "ghp_test",
        "--api-url",
        "https://github.example.com/api/v3",
        "--format",
        "json",
        "--no-color",
    ])
    .unwrap();

    assert!(matches!(cli.command, Commands::Plan));
    assert_eq!(cli.global.config, Path::new("settings.toml"));
    assert_eq!(cli.global.token.as_deref(), Some("ghp_test"));
    assert_eq!(
        cli.global.api_url.as_ref().map(Url::as_str),
        Some("https://github.example.com/api/v3")
    );
    assert_eq!(cli.global.format, OutputFormat::Json);
    assert!(cli.global.no_color);
}

#[test]
fn test_parse_rejects_invalid_api_url() {
    let result = Cli::try_parse_from(["repo-janitor", "validate", "--api-url", "not a url"]);

    assert!(result.is_err());
}

#[test]
fn test_parse_requires_subcommand() {
    let result = Cli::try_parse_from(["repo-janitor"]);

    assert!(result.is_err());
}

#[test]
fn test_cli_definition_is_consistent() {
    use clap::CommandFactory;

    Cli::command().debug_assert();
}
