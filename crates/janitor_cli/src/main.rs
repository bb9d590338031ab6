use clap::Parser;
use colored::Colorize;
use janitor_cli::{run, Cli};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    // Logs go to stderr so `--format json` output stays parseable
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_env("REPO_JANITOR_LOG"))
        .init();

    let cli = Cli::parse();
    if cli.global.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = run(&cli).await {
        eprintln!("{} {e}", "Error:".red());
        std::process::exit(1);
    }
}
