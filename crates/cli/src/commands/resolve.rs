//! `acctest resolve`

use super::CommandContext;
use crate::cli::CliError;

/// Merged test configuration of one service, as pretty JSON
///
/// # Errors
/// Fails for an unknown service or environment.
pub fn execute_resolve(ctx: &CommandContext, service: &str) -> Result<String, CliError> {
    let config = ctx.settings.resolve_config(service, &ctx.environment)?;
    let mut json = serde_json::to_string_pretty(&config)
        .map_err(|e| CliError::other(format!("Failed to serialize configuration: {e}")))?;
    json.push('\n');
    Ok(json)
}
