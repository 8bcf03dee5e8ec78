//! Command line definition and error reporting

use crate::tracing::{LogLevel, TracingFormat};
use acctest_ci::emitter::EmitterError;
use acctest_ci::ir::ValidationError;
use acctest_core::ClientConfiguration;
use clap::{Args, Parser, Subcommand, ValueEnum};
use miette::{Diagnostic, Report};
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application
pub const EXIT_OK: i32 = 0;
/// Validation checks failed
pub const EXIT_VALIDATION: i32 = 1;
/// CLI or configuration error exit code
pub const EXIT_CLI: i32 = 2;
/// Unexpected runtime error exit code
pub const EXIT_OTHER: i32 = 3;

/// CLI-specific error types with exit code mapping
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum CliError {
    /// Settings or argument error (exit code 2)
    #[error("Configuration error: {message}")]
    #[diagnostic(code(acctest::cli::config))]
    Config {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
    /// One or more validation checks failed (exit code 1)
    #[error("Validation failed: {message}")]
    #[diagnostic(code(acctest::cli::validation))]
    Validation {
        /// Summary line
        message: String,
        /// Every failed check, one per line
        #[help]
        help: Option<String>,
    },
    /// Other unexpected error (exit code 3)
    #[error("Unexpected error: {message}")]
    #[diagnostic(code(acctest::cli::other))]
    Other {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
}

impl CliError {
    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: None,
        }
    }

    /// Create a new other error
    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
            help: None,
        }
    }

    /// Create a new other error with help text
    #[must_use]
    pub fn other_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Collapse validation errors into a single report
    #[must_use]
    pub fn validation(errors: &[ValidationError]) -> Self {
        let lines: Vec<String> = errors.iter().map(|e| format!("- {e}")).collect();
        Self::Validation {
            message: format!("{} check(s) failed", errors.len()),
            help: Some(lines.join("\n")),
        }
    }
}

/// Map `acctest_core::Error` onto CLI categories.
///
/// Settings problems are configuration errors (exit code 2); I/O failures and
/// id collisions are unexpected (exit code 3).
impl From<acctest_core::Error> for CliError {
    fn from(err: acctest_core::Error) -> Self {
        let help = err.help().map(|h| h.to_string());
        match err {
            acctest_core::Error::Io { .. } => Self::other_with_help(
                err.to_string(),
                "Check file permissions and ensure the path exists",
            ),
            acctest_core::Error::DuplicateJob { .. } => Self::Other {
                message: err.to_string(),
                help,
            },
            acctest_core::Error::Configuration { message, .. } => Self::Config { message, help },
            acctest_core::Error::UnknownEnvironment { .. }
            | acctest_core::Error::UnknownService { .. }
            | acctest_core::Error::DuplicateOverride { .. }
            | acctest_core::Error::DuplicateService { .. }
            | acctest_core::Error::SettingsParse { .. } => Self::Config {
                message: err.to_string(),
                help,
            },
        }
    }
}

impl From<EmitterError> for CliError {
    fn from(err: EmitterError) -> Self {
        Self::other(err.to_string())
    }
}

/// Map CLI error to its exit code
#[must_use]
pub const fn exit_code_for(err: &CliError) -> i32 {
    match err {
        CliError::Validation { .. } => EXIT_VALIDATION,
        CliError::Config { .. } => EXIT_CLI,
        CliError::Other { .. } => EXIT_OTHER,
    }
}

/// Render an error through miette on stderr
#[allow(clippy::print_stderr)]
pub fn render_error(err: &CliError) {
    let report = Report::new(err.clone());
    eprintln!("{report:?}");
}

/// Generate TeamCity acceptance test projects for the azurerm provider.
#[derive(Parser, Debug)]
#[command(name = "acctest")]
#[command(about = "Generate and validate acceptance test CI projects")]
#[command(version)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Logging verbosity level.
    #[arg(
        short = 'L',
        long,
        global = true,
        help = "Set logging level",
        default_value = "warn",
        value_enum
    )]
    pub level: LogLevel,

    /// Log output format.
    #[arg(
        long,
        global = true,
        help = "Log output format",
        default_value = "compact",
        value_enum
    )]
    pub log_format: TracingFormat,

    /// Target environment.
    #[arg(
        long,
        short = 'e',
        global = true,
        env = "ACCTEST_ENVIRONMENT",
        default_value = "public",
        help = "Cloud environment to generate jobs for"
    )]
    pub environment: String,

    /// TOML settings file replacing the built-in tables.
    #[arg(
        long,
        global = true,
        env = "ACCTEST_SETTINGS",
        value_name = "FILE",
        help = "TOML settings file replacing the built-in tables"
    )]
    pub settings: Option<PathBuf>,

    /// Credentials and server switches.
    #[command(flatten)]
    pub client: ClientArgs,
}

/// Values supplied by the hosting CI server.
///
/// Every value can come from the environment; unset values are empty.
#[derive(Args, Debug, Clone, Default)]
pub struct ClientArgs {
    /// VCS root the jobs check out.
    #[arg(long, global = true, env = "ACCTEST_VCS_ROOT_ID", default_value = "")]
    pub vcs_root_id: String,

    /// Enable scheduled triggers on nightly environments.
    #[arg(long, global = true, env = "ACCTEST_ENABLE_TRIGGERS")]
    pub enable_triggers: bool,

    /// Service principal client id.
    #[arg(long, global = true, env = "ARM_CLIENT_ID", default_value = "", hide_env_values = true)]
    pub client_id: String,

    /// Service principal client secret.
    #[arg(
        long,
        global = true,
        env = "ARM_CLIENT_SECRET",
        default_value = "",
        hide_env_values = true
    )]
    pub client_secret: String,

    /// Primary subscription id.
    #[arg(
        long,
        global = true,
        env = "ARM_SUBSCRIPTION_ID",
        default_value = "",
        hide_env_values = true
    )]
    pub subscription_id: String,

    /// Tenant id.
    #[arg(long, global = true, env = "ARM_TENANT_ID", default_value = "", hide_env_values = true)]
    pub tenant_id: String,

    /// Alternate service principal client id.
    #[arg(
        long,
        global = true,
        env = "ARM_CLIENT_ID_ALT",
        default_value = "",
        hide_env_values = true
    )]
    pub client_id_alt: String,

    /// Alternate service principal client secret.
    #[arg(
        long,
        global = true,
        env = "ARM_CLIENT_SECRET_ALT",
        default_value = "",
        hide_env_values = true
    )]
    pub client_secret_alt: String,

    /// Alternate subscription id.
    #[arg(
        long,
        global = true,
        env = "ARM_SUBSCRIPTION_ID_ALT",
        default_value = "",
        hide_env_values = true
    )]
    pub subscription_id_alt: String,

    /// Dev-test subscription id.
    #[arg(
        long,
        global = true,
        env = "ARM_SUBSCRIPTION_ID_DEVTEST",
        default_value = "",
        hide_env_values = true
    )]
    pub subscription_id_dev_test: String,

    /// Alternate tenant id.
    #[arg(
        long,
        global = true,
        env = "ARM_TENANT_ID_ALT",
        default_value = "",
        hide_env_values = true
    )]
    pub tenant_id_alt: String,

    /// Subscription id in the alternate tenant.
    #[arg(
        long,
        global = true,
        env = "ARM_SUBSCRIPTION_ID_ALT_TENANT",
        default_value = "",
        hide_env_values = true
    )]
    pub subscription_id_alt_tenant: String,

    /// Service principal object id in the alternate tenant.
    #[arg(
        long,
        global = true,
        env = "ARM_PRINCIPAL_ID_ALT_TENANT",
        default_value = "",
        hide_env_values = true
    )]
    pub principal_id_alt_tenant: String,
}

impl From<ClientArgs> for ClientConfiguration {
    fn from(args: ClientArgs) -> Self {
        Self {
            client_id: args.client_id.into(),
            client_secret: args.client_secret.into(),
            subscription_id: args.subscription_id.into(),
            tenant_id: args.tenant_id.into(),
            client_id_alt: args.client_id_alt.into(),
            client_secret_alt: args.client_secret_alt.into(),
            subscription_id_alt: args.subscription_id_alt.into(),
            subscription_id_dev_test: args.subscription_id_dev_test.into(),
            tenant_id_alt: args.tenant_id_alt.into(),
            subscription_id_alt_tenant: args.subscription_id_alt_tenant.into(),
            principal_id_alt_tenant: args.principal_id_alt_tenant.into(),
            vcs_root_id: args.vcs_root_id,
            enable_test_triggers_globally: args.enable_triggers,
        }
    }
}

/// Output document format
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    /// TeamCity project YAML
    #[default]
    Teamcity,
    /// Build job descriptors as JSON
    Json,
}

impl OutputFormat {
    /// Emitter format name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Teamcity => "teamcity",
            Self::Json => "json",
        }
    }
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble, validate and emit the project.
    #[command(about = "Assemble, validate and emit the project")]
    Generate {
        /// Output format.
        #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Teamcity)]
        format: OutputFormat,
        /// Write to a file instead of stdout.
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
        /// Blank out secret values.
        #[arg(long)]
        redact: bool,
    },
    /// Assemble the project and run every validation check.
    #[command(about = "Assemble the project and run every validation check")]
    Validate,
    /// Print the merged test configuration of a service as JSON.
    #[command(about = "Print the merged test configuration of a service as JSON")]
    Resolve {
        /// Service key (e.g. `containers`).
        service: String,
    },
    /// List the service catalog.
    #[command(about = "List the service catalog")]
    Services,
}

/// Parse the process arguments
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
