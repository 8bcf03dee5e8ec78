//! `acctest generate`

use super::CommandContext;
use crate::cli::{CliError, OutputFormat};
use acctest_ci::emitter::{EmitterRegistry, EmitterRegistryBuilder, JsonEmitter};
use acctest_ci::ir::ProjectValidator;
use acctest_teamcity::TeamCityEmitter;
use std::path::Path;

/// Registry of every supported output format
#[must_use]
pub fn registry(redact: bool) -> EmitterRegistry {
    EmitterRegistryBuilder::new()
        .with_emitter(TeamCityEmitter::new().with_redacted_secrets(redact))
        .with_emitter(JsonEmitter::new().with_redacted_secrets(redact))
        .build()
}

/// Assemble, validate and render the project.
///
/// With `output` the document is written to that file and nothing is
/// returned for stdout.
///
/// # Errors
/// Fails when assembly or validation fails, or the output cannot be written.
pub fn execute_generate(
    ctx: &CommandContext,
    format: OutputFormat,
    output: Option<&Path>,
    redact: bool,
) -> Result<String, CliError> {
    let missing = ctx.credentials.missing();
    if !missing.is_empty() {
        tracing::warn!(
            missing = %missing.join(", "),
            "Credentials not supplied; parameters will be empty"
        );
    }

    let project = ctx.assemble()?;
    ProjectValidator::new(&project, &ctx.settings)
        .validate()
        .map_err(|errors| CliError::validation(&errors))?;

    let document = registry(redact).emit(format.as_str(), &project)?;

    match output {
        Some(path) => {
            std::fs::write(path, &document)
                .map_err(|e| acctest_core::Error::io(format!("writing {}", path.display()), e))?;
            tracing::info!(
                path = %path.display(),
                format = format.as_str(),
                jobs = project.jobs().len(),
                "Wrote project"
            );
            Ok(String::new())
        }
        None => Ok(document),
    }
}
