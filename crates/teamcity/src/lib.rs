//! TeamCity Project Emitter for acceptance test jobs
//!
//! Renders an assembled [`acctest_ci::ir::Project`] as a TeamCity project
//! document in YAML. Secret parameters become hidden `password` parameters.
//!
//! # Example
//!
//! ```ignore
//! use acctest_ci::emitter::Emitter;
//! use acctest_teamcity::TeamCityEmitter;
//!
//! let emitter = TeamCityEmitter::new().with_redacted_secrets(true);
//! let yaml = emitter.emit(&project)?;
//! ```

pub mod emitter;
pub mod schema;

pub use emitter::TeamCityEmitter;
