//! TOML settings files
//!
//! A settings file replaces the built-in tables wholesale:
//!
//! ```toml
//! [defaults]
//! parallelism = 20
//! timeout = 12
//!
//! [locations.public]
//! primary = "westeurope"
//! secondary = "eastus2"
//! tertiary = "westus2"
//! rotate = true
//!
//! [nightly]
//! public = true
//!
//! [overrides.containers]
//! parallelism = 5
//! timeout = 18
//! location_override = { primary = "eastus", secondary = "westeurope", tertiary = "eastus2" }
//! ```
//!
//! When no `[[services]]` array is given the built-in catalog is used.
//! TOML itself rejects a table key defined twice, so a duplicated override
//! fails to parse instead of shadowing the first definition.

use super::{Defaults, LocationConfiguration, Settings, TestConfigurationOverride};
use crate::{Error, Result, ServiceCatalog, ServiceEntry};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// On-disk representation of [`Settings`]
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    /// Global defaults
    #[serde(default)]
    pub defaults: Defaults,
    /// Service catalog (built-in catalog when absent)
    #[serde(default)]
    pub services: Option<Vec<ServiceEntry>>,
    /// Environment name to default locations
    #[serde(default)]
    pub locations: BTreeMap<String, LocationConfiguration>,
    /// Environment name to nightly flag
    #[serde(default)]
    pub nightly: BTreeMap<String, bool>,
    /// Service key to override
    #[serde(default)]
    pub overrides: BTreeMap<String, TestConfigurationOverride>,
}

impl SettingsFile {
    /// Validate and convert into [`Settings`]
    ///
    /// # Errors
    /// Propagates catalog and builder validation errors.
    pub fn into_settings(self) -> Result<Settings> {
        let mut builder = Settings::builder().defaults(self.defaults);
        if let Some(services) = self.services {
            builder = builder.services(ServiceCatalog::new(services)?);
        }
        for (environment, location) in self.locations {
            builder = builder.location(environment, location);
        }
        for (environment, enabled) in self.nightly {
            builder = builder.nightly(environment, enabled);
        }
        for (service, test_config) in self.overrides {
            builder = builder.override_service(service, test_config);
        }
        builder.build()
    }
}

impl Settings {
    /// Parse settings from TOML source; `path` is only used in error messages.
    ///
    /// # Errors
    /// Returns `Error::SettingsParse` for malformed TOML and builder errors for
    /// inconsistent tables.
    pub fn from_toml_str(source: &str, path: &Path) -> Result<Self> {
        let file: SettingsFile =
            toml::from_str(source).map_err(|e| Error::settings_parse(path, e.to_string()))?;
        if file.locations.is_empty() {
            return Err(Error::configuration_with_help(
                format!("{} defines no environments", path.display()),
                "Add at least one [locations.<environment>] table",
            ));
        }
        file.into_settings()
    }

    /// Load settings from a TOML file
    ///
    /// # Errors
    /// Returns `Error::Io` when the file cannot be read, otherwise as
    /// [`Settings::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading settings file");
        let source = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("reading {}", path.display()), e))?;
        Self::from_toml_str(&source, path)
    }
}
