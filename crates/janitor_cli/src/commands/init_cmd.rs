//! The `init` command.

use std::path::Path;

use colored::Colorize;
use config_manager::{example_config, ConfigurationError};
use tracing::{error, info, instrument};

use crate::errors::Error;

#[cfg(test)]
#[path = "init_cmd_tests.rs"]
mod tests;

/// Writes the example configuration to `path`.
///
/// # Errors
///
/// Returns `ConfigurationError::FileAlreadyExists` if `path` exists; the
/// file is never overwritten.
#[instrument]
pub fn init_config(path: &Path) -> Result<(), Error> {
    if path.exists() {
        let err = ConfigurationError::FileAlreadyExists {
            path: path.display().to_string(),
        };
        error!(path = ?path, "Configuration file already exists");
        return Err(err.into());
    }

    std::fs::write(path, example_config()).map_err(|source| Error::WriteFile {
        path: path.display().to_string(),
        source,
    })?;

    info!(path = ?path, "Created example configuration");
    Ok(())
}

/// Runs `init` and prints the next steps.
pub fn execute(path: &Path) -> Result<(), Error> {
    init_config(path)?;

    println!(
        "Created example configuration file: {}",
        path.display().to_string().green()
    );
    println!("\n{}", "Next steps:".white().bold());
    println!("1. Edit the configuration file to add your repositories");
    println!("2. Run 'repo-janitor validate' to verify your setup");
    println!("3. Run 'repo-janitor plan' to preview changes");
    println!("4. Run 'repo-janitor sync' to apply changes");

    Ok(())
}
