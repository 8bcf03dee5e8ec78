//! Error types for settings resolution and project assembly

use miette::Diagnostic;
use std::path::Path;
use thiserror::Error;

/// Errors that abort pipeline generation
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Environment is missing from the location table
    #[error("Unknown environment '{environment}'")]
    #[diagnostic(code(acctest::settings::unknown_environment))]
    UnknownEnvironment {
        /// The requested environment name
        environment: String,
        /// Environments that do have a location configuration
        #[help]
        available: Option<String>,
    },

    /// Service key is missing from the service catalog
    #[error("Unknown service '{service}'")]
    #[diagnostic(
        code(acctest::settings::unknown_service),
        help("Run 'acctest services' to list the known service keys")
    )]
    UnknownService {
        /// The requested service key
        service: String,
    },

    /// The same service was given two overrides
    #[error("Service '{service}' has more than one test configuration override")]
    #[diagnostic(code(acctest::settings::duplicate_override))]
    DuplicateOverride {
        /// The repeated service key
        service: String,
    },

    /// The same service key appears twice in the catalog
    #[error("Service '{service}' is listed more than once in the catalog")]
    #[diagnostic(code(acctest::settings::duplicate_service))]
    DuplicateService {
        /// The repeated service key
        service: String,
    },

    /// Two job descriptors derived the same id
    #[error("Build job id '{id}' is not unique within the project")]
    #[diagnostic(code(acctest::project::duplicate_job))]
    DuplicateJob {
        /// The colliding job id
        id: String,
    },

    /// Settings values that make no sense (hour out of range, zero parallelism, ...)
    #[error("Configuration error: {message}")]
    #[diagnostic(code(acctest::settings::config))]
    Configuration {
        /// What is wrong
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },

    /// A settings file could not be parsed
    #[error("Failed to parse settings file {}: {message}", path.display())]
    #[diagnostic(code(acctest::settings::parse))]
    SettingsParse {
        /// Path of the settings file
        path: Box<Path>,
        /// Parser message
        message: String,
    },

    /// I/O failure while reading settings or writing output
    #[error("I/O error during {operation}: {source}")]
    #[diagnostic(code(acctest::io))]
    Io {
        /// What was being attempted
        operation: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an unknown-environment error listing the known environments
    #[must_use]
    pub fn unknown_environment<'a>(
        environment: impl Into<String>,
        known: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let known: Vec<&str> = known.into_iter().collect();
        Self::UnknownEnvironment {
            environment: environment.into(),
            available: (!known.is_empty())
                .then(|| format!("Known environments: {}", known.join(", "))),
        }
    }

    /// Create an unknown-service error
    #[must_use]
    pub fn unknown_service(service: impl Into<String>) -> Self {
        Self::UnknownService {
            service: service.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            help: None,
        }
    }

    /// Create a configuration error with help text
    #[must_use]
    pub fn configuration_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create a settings parse error
    #[must_use]
    pub fn settings_parse(path: &Path, message: impl Into<String>) -> Self {
        Self::SettingsParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error
    #[must_use]
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_environment_lists_known() {
        let err = Error::unknown_environment("mars", ["china", "public"]);
        assert!(err.to_string().contains("mars"));
        match err {
            Error::UnknownEnvironment { available, .. } => {
                assert_eq!(available.as_deref(), Some("Known environments: china, public"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_environment_without_known() {
        let err = Error::unknown_environment("mars", []);
        assert!(matches!(
            err,
            Error::UnknownEnvironment {
                available: None,
                ..
            }
        ));
    }

    #[test]
    fn test_settings_parse_error() {
        let err = Error::settings_parse(Path::new("/etc/acctest.toml"), "duplicate key");
        assert!(err.to_string().contains("/etc/acctest.toml"));
        assert!(err.to_string().contains("duplicate key"));
    }

    #[test]
    fn test_diagnostic_codes() {
        let err = Error::unknown_service("nope");
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("acctest::settings::unknown_service"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
