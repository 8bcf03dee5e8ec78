//! Core types for acctest pipeline generation
//!
//! This crate holds the static inputs of the generator:
//!
//! - [`services`]: the catalog of provider services that get an acceptance test job
//! - [`settings`]: global defaults, per-environment locations and nightly policy,
//!   and per-service test configuration overrides
//! - [`credentials`]: the credential bundle supplied by the hosting CI server
//!
//! Everything here is immutable once constructed. The CI crate reads these
//! structures by reference to build job descriptors.

pub mod credentials;
pub mod error;
pub mod services;
pub mod settings;

pub use credentials::{ClientConfiguration, SecretValue};
pub use error::Error;
pub use services::{ServiceCatalog, ServiceEntry};
pub use settings::{
    Defaults, LocationConfiguration, Settings, SettingsBuilder, TestConfiguration,
    TestConfigurationOverride,
};

/// Result type for acctest core operations
pub type Result<T> = std::result::Result<T, Error>;
