//! acctest command line
//!
//! Loads settings (built-in or from a TOML file), collects credentials from
//! flags and environment variables, and runs one of the subcommands:
//!
//! - `generate`: assemble, validate and emit the project
//! - `validate`: run every validation check and report failures
//! - `resolve`: print the merged configuration of a service
//! - `services`: list the service catalog

pub mod cli;
pub mod commands;
pub mod tracing;
