//! Build project intermediate representation
//!
//! The IR is the bridge between the settings tables and CI-server-native
//! configuration. Parameter names, step order and trigger shape are a
//! compatibility contract with the consuming server.

mod schema;
mod validation;

pub use schema::*;
pub use validation::*;
