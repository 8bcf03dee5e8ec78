//! Acceptance test pipeline generation
//!
//! Turns [`acctest_core::Settings`] and a credential bundle into a validated
//! [`ir::Project`]: one pull-request job plus one scheduled job per service.
//! Emitters render the project for a specific CI server.

pub mod assembler;
pub mod emitter;
pub mod ir;
pub mod jobs;

pub use assembler::ProjectAssembler;

use acctest_core::Error;

/// Result type for project generation
pub type Result<T> = std::result::Result<T, Error>;
