//! The `sync` and `plan` commands.

use std::sync::Arc;

use clap::Args;
use config_manager::JanitorConfig;
use janitor_core::{Reconciler, RunSummary};
use tracing::{info, instrument};

use crate::commands::connect;
use crate::errors::Error;
use crate::output::{format_header, format_results, OutputFormat};
use crate::GlobalArgs;

#[cfg(test)]
#[path = "sync_cmd_tests.rs"]
mod tests;

/// Arguments of the `sync` command
#[derive(Args, Debug, Clone, Default)]
pub struct SyncArgs {
    /// Preview changes without applying them
    #[arg(long)]
    pub dry_run: bool,
}

/// Reconciles every configured repository and prints the results.
///
/// # Errors
///
/// Fails before reconciliation if the configuration cannot be loaded or the
/// token is rejected. Afterwards, returns `Error::ReconciliationFailed` if any
/// repository carries an error; all results are printed first.
#[instrument(skip(global), fields(config = ?global.config))]
pub async fn execute(global: &GlobalArgs, dry_run: bool) -> Result<RunSummary, Error> {
    let config = JanitorConfig::load(&global.config)?;

    let client = connect(global)?;
    let user = client.authenticated_user().await?;
    info!(user = %user.login, dry_run = dry_run, "Starting reconciliation");

    if global.format == OutputFormat::Pretty {
        println!(
            "{}",
            format_header(&user.login, config.repositories.len(), dry_run)
        );
    }

    let reconciler = Reconciler::new(Arc::new(client));
    let results = reconciler.reconcile_all(&config, dry_run).await;

    println!("{}", format_results(&results, dry_run, global.format)?);

    let summary = RunSummary::from_results(&results);
    if summary.has_failures() {
        return Err(Error::ReconciliationFailed {
            failed: summary.failed,
            total: summary.total,
        });
    }

    Ok(summary)
}
