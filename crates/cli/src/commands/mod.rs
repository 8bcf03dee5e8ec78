//! Subcommand implementations
//!
//! Commands return the text destined for stdout; `main` prints it. Nothing is
//! written until the whole document has been rendered.

mod generate;
mod resolve;
mod services;
mod validate;

pub use generate::execute_generate;
pub use resolve::execute_resolve;
pub use services::execute_services;
pub use validate::execute_validate;

use crate::cli::{Cli, CliError, Commands};
use acctest_ci::ProjectAssembler;
use acctest_ci::ir::Project;
use acctest_core::{ClientConfiguration, Settings};
use std::path::Path;

/// Inputs shared by every subcommand
#[derive(Debug)]
pub struct CommandContext {
    /// Settings tables
    pub settings: Settings,
    /// Target environment
    pub environment: String,
    /// Credentials and server switches
    pub credentials: ClientConfiguration,
}

impl CommandContext {
    /// Load settings and collect credentials from parsed arguments
    ///
    /// # Errors
    /// Fails when the settings file cannot be read or is invalid.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        Ok(Self {
            settings: load_settings(cli.settings.as_deref())?,
            environment: cli.environment.clone(),
            credentials: cli.client.clone().into(),
        })
    }

    /// Assemble the project for the target environment
    ///
    /// # Errors
    /// Fails for an unknown environment or colliding job ids.
    pub fn assemble(&self) -> Result<Project, CliError> {
        Ok(ProjectAssembler::new(&self.settings).assemble(&self.environment, &self.credentials)?)
    }
}

/// Settings from a file, or the built-in tables
///
/// # Errors
/// Fails when the file cannot be read or parsed, or the tables are invalid.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, CliError> {
    let settings = match path {
        Some(path) => Settings::load(path)?,
        None => {
            tracing::debug!("Using built-in settings tables");
            Settings::builtin()?
        }
    };
    Ok(settings)
}

/// Run the selected subcommand
///
/// # Errors
/// Returns the subcommand's error.
pub fn execute(cli: &Cli) -> Result<String, CliError> {
    let ctx = CommandContext::from_cli(cli)?;
    match &cli.command {
        Commands::Generate {
            format,
            output,
            redact,
        } => execute_generate(&ctx, *format, output.as_deref(), *redact),
        Commands::Validate => execute_validate(&ctx),
        Commands::Resolve { service } => execute_resolve(&ctx, service),
        Commands::Services => Ok(execute_services(&ctx)),
    }
}
