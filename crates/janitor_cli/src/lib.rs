//! repo-janitor CLI: keeps the settings of GitHub repositories in line with a
//! configuration file.
//!
//! The binary in `main.rs` only parses arguments and sets up logging; the
//! commands live here so they can be tested without spawning a process.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use config_manager::DEFAULT_CONFIG_FILENAME;
use url::Url;

pub mod commands;
pub mod errors;
pub mod output;

use commands::sync_cmd::SyncArgs;
use errors::Error;
pub use output::OutputFormat;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// repo-janitor: Synchronize GitHub repository settings across repositories
#[derive(Parser, Debug)]
#[command(name = "repo-janitor", version)]
#[command(
    about = "Synchronize GitHub repository settings across repositories",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Path to the configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "REPO_JANITOR_CONFIG",
        default_value = DEFAULT_CONFIG_FILENAME
    )]
    pub config: PathBuf,

    /// GitHub personal access token
    #[arg(short, long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Base URL of the GitHub API, for GitHub Enterprise Server
    #[arg(long, global = true, env = "GITHUB_API_URL")]
    pub api_url: Option<Url>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Output format of the results
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply the configured settings to all repositories
    Sync(SyncArgs),

    /// Preview changes without applying them (same as `sync --dry-run`)
    Plan,

    /// Validate the configuration file and the GitHub token
    Validate,

    /// Create an example configuration file
    Init,
}

/// Runs the selected command.
pub async fn run(cli: &Cli) -> Result<(), Error> {
    match &cli.command {
        Commands::Sync(args) => commands::sync_cmd::execute(&cli.global, args.dry_run)
            .await
            .map(|_| ()),
        Commands::Plan => commands::sync_cmd::execute(&cli.global, true)
            .await
            .map(|_| ()),
        Commands::Validate => commands::validate_cmd::execute(&cli.global)
            .await
            .map(|_| ()),
        Commands::Init => commands::init_cmd::execute(&cli.global.config),
    }
}
