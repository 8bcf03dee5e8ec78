//! Project Emitter Trait
//!
//! Defines the interface for rendering an assembled [`Project`] into a
//! document a CI server can load. The [`EmitterRegistry`] maps format names
//! (the CLI `--format` values) to emitters.

mod json;
mod registry;

pub use json::JsonEmitter;
pub use registry::{EmitterInfo, EmitterRegistry, EmitterRegistryBuilder};

use crate::ir::Project;
use thiserror::Error;

/// Error types for emitter operations
#[derive(Debug, Error)]
pub enum EmitterError {
    /// YAML/JSON serialization failed
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Project cannot be represented by this emitter
    #[error("Invalid project: {0}")]
    InvalidProject(String),
}

/// Result type for emitter operations
pub type EmitterResult<T> = std::result::Result<T, EmitterError>;

/// Trait for CI project emitters
///
/// Implementations map the project onto a server-specific document. Secret
/// parameters must always be marked as passwords in the output, whether or
/// not their values are redacted.
pub trait Emitter: Send + Sync {
    /// Render the project.
    ///
    /// # Errors
    /// Returns `EmitterError` if the project cannot be transformed or serialized
    fn emit(&self, project: &Project) -> EmitterResult<String>;

    /// Format identifier, used for CLI flag matching (e.g. "teamcity")
    fn format_name(&self) -> &'static str;

    /// File extension for output files
    fn file_extension(&self) -> &'static str;

    /// Human-readable description of this emitter
    fn description(&self) -> &'static str {
        "CI project emitter"
    }

    /// Validate the project before emission
    ///
    /// # Errors
    /// Returns `EmitterError::InvalidProject` if validation fails
    fn validate(&self, project: &Project) -> EmitterResult<()> {
        let _ = project;
        Ok(())
    }
}
