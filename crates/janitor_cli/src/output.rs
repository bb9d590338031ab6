//! Rendering of reconciliation results for the terminal.

use clap::ValueEnum;
use colored::Colorize;
use janitor_core::{ReconcileResult, RunSummary};
use serde::Serialize;

use crate::errors::Error;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

const RULE_WIDTH: usize = 60;

/// Output format of the results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored output
    #[default]
    Pretty,

    /// Machine-readable JSON document
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    dry_run: bool,
    results: &'a [ReconcileResult],
    summary: RunSummary,
}

/// Formats the results of a run in the requested format.
pub fn format_results(
    results: &[ReconcileResult],
    dry_run: bool,
    format: OutputFormat,
) -> Result<String, Error> {
    match format {
        OutputFormat::Pretty => Ok(format_results_pretty(results, dry_run)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&JsonReport {
            dry_run,
            results,
            summary: RunSummary::from_results(results),
        })?),
    }
}

/// The banner printed before reconciliation starts.
pub fn format_header(user: &str, repositories: usize, dry_run: bool) -> String {
    let mode = if dry_run {
        "DRY-RUN (preview only)".yellow()
    } else {
        "APPLYING".white().bold()
    };
    let count = if dry_run {
        repositories.to_string().yellow()
    } else {
        repositories.to_string().cyan()
    };

    format!(
        "Authenticated as: {}\n\nMode: {}\nRepositories: {}\n",
        user.cyan(),
        mode,
        count
    )
}

fn format_results_pretty(results: &[ReconcileResult], dry_run: bool) -> String {
    let rule = "=".repeat(RULE_WIDTH).white().bold();
    let mut output = String::new();

    output.push_str(&format!("\n{}\n", rule));
    let title = if dry_run {
        "PLAN RESULTS"
    } else {
        "SYNC RESULTS"
    };
    output.push_str(&format!("{}\n", title.white().bold()));
    output.push_str(&format!("{}\n", rule));

    for result in results {
        let status = if result.is_success() {
            "✓".green()
        } else {
            "✗".red()
        };
        output.push_str(&format!("\n{} {}\n", status, result.repository));

        if !result.exists && result.error.is_none() {
            output.push_str(&format!(
                "   {}\n",
                "Skipped: repository does not exist".yellow()
            ));
            continue;
        }

        if result.exists && result.changes.is_empty() && result.error.is_none() {
            output.push_str(&format!("   {}\n", "Up to date".dimmed()));
        }

        for change in &result.changes {
            output.push_str(&format!(
                "   {}: {} {} {}\n",
                change.field.cyan(),
                change.current,
                "→".yellow(),
                change.desired
            ));
        }

        if let Some(error) = &result.error {
            output.push_str(&format!("   {}: {}\n", "Error".red(), error));
        }
    }

    output.push_str(&format!("\n{}\n", rule));
    output.push_str(&format_summary(&RunSummary::from_results(results)));
    output
}

fn format_summary(summary: &RunSummary) -> String {
    let failed = if summary.failed > 0 {
        summary.failed.to_string().red()
    } else {
        summary.failed.to_string().normal()
    };

    format!(
        "{} repositories: {} succeeded, {} failed, {} skipped, {} with changes\n",
        summary.total,
        summary.succeeded.to_string().green(),
        failed,
        summary.skipped.to_string().yellow(),
        summary.changed
    )
}
