//! `acctest validate`

use super::CommandContext;
use crate::cli::CliError;
use acctest_ci::ir::ProjectValidator;

/// Assemble the project and run every validation check
///
/// # Errors
/// Returns `CliError::Validation` listing every failed check.
pub fn execute_validate(ctx: &CommandContext) -> Result<String, CliError> {
    let project = ctx.assemble()?;

    if let Err(errors) = ProjectValidator::new(&project, &ctx.settings).validate() {
        for error in &errors {
            tracing::error!(%error, "Validation check failed");
        }
        return Err(CliError::validation(&errors));
    }

    Ok(format!(
        "{}: {} jobs, all checks passed\n",
        project.id,
        project.jobs().len()
    ))
}
