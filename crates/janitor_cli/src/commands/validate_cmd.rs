//! The `validate` command.

use colored::Colorize;
use config_manager::JanitorConfig;
use tracing::instrument;

use crate::commands::connect;
use crate::errors::Error;
use crate::GlobalArgs;

#[cfg(test)]
#[path = "validate_cmd_tests.rs"]
mod tests;

/// Checks that the configuration loads and the token is accepted by GitHub.
///
/// Returns the login of the authenticated user.
#[instrument(skip(global), fields(config = ?global.config))]
pub async fn execute(global: &GlobalArgs) -> Result<String, Error> {
    println!("{}", "Validating configuration...".cyan());
    let config = JanitorConfig::load(&global.config)?;
    println!(
        "Configuration valid: {} repositories configured",
        config.repositories.len().to_string().green()
    );

    println!("\n{}", "Validating GitHub authentication...".cyan());
    let client = connect(global)?;
    let user = client.authenticated_user().await?;
    println!(
        "Authentication valid: authenticated as {}",
        user.login.cyan()
    );

    println!("\n{}", "All validations passed!".green());
    Ok(user.login)
}
