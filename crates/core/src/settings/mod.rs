//! Test settings: defaults, environment tables and per-service overrides
//!
//! A [`Settings`] value is built once (from the built-in tables or a TOML file)
//! and passed by reference into project assembly. Resolution never mutates it.
//!
//! ## Merge rules
//!
//! - Every service starts from [`Defaults`].
//! - An override replaces only the fields it sets.
//! - The override location wins when its `primary` region is non-empty,
//!   otherwise the environment's location applies.
//! - An unknown environment is fatal; there is no safe default region.

mod builtin;
mod file;

pub use file::SettingsFile;

use crate::{Error, Result, ServiceCatalog};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Global default test configuration values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Defaults {
    /// Tests run concurrently per service package
    pub parallelism: u32,
    /// Hour (UTC, 0-23) at which scheduled runs start
    pub start_hour: u8,
    /// Cron day-of-week field
    pub days_of_week: String,
    /// Cron day-of-month field
    pub days_of_month: String,
    /// Test timeout in hours
    pub timeout: u32,
    /// Terraform Core version the acceptance tests run against
    pub terraform_core_version: String,
    /// Whether jobs publish Go test results through the test-runner feature
    pub test_runner_feature: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            parallelism: 20,
            start_hour: 0,
            days_of_week: "*".to_string(),
            days_of_month: "*".to_string(),
            timeout: 12,
            terraform_core_version: "1.5.7".to_string(),
            test_runner_feature: true,
        }
    }
}

/// Primary, secondary and tertiary regions used by a test run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct LocationConfiguration {
    /// Primary region
    pub primary: String,
    /// Secondary region
    pub secondary: String,
    /// Tertiary region
    pub tertiary: String,
    /// Round-robin across the three regions between runs (decided by the CI server)
    #[serde(default)]
    pub rotate: bool,
}

impl LocationConfiguration {
    /// Create a location configuration
    pub fn new(
        primary: impl Into<String>,
        secondary: impl Into<String>,
        tertiary: impl Into<String>,
        rotate: bool,
    ) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
            tertiary: tertiary.into(),
            rotate,
        }
    }

    /// A location is set when its primary region is non-empty
    #[must_use]
    pub fn is_set(&self) -> bool {
        !self.primary.is_empty()
    }
}

/// Fully merged test configuration for one service
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TestConfiguration {
    /// Tests run concurrently
    pub parallelism: u32,
    /// Hour (UTC) of the scheduled run
    pub start_hour: u8,
    /// Cron day-of-week field
    pub days_of_week: String,
    /// Cron day-of-month field
    pub days_of_month: String,
    /// Timeout in hours
    pub timeout: u32,
    /// Run against the alternate subscription
    pub use_alt_subscription: bool,
    /// Run against the dev-test subscription
    pub use_dev_test_subscription: bool,
    /// Regions replacing the environment default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_override: Option<LocationConfiguration>,
}

impl TestConfiguration {
    /// The configuration a service gets without any override
    #[must_use]
    pub fn from_defaults(defaults: &Defaults) -> Self {
        Self {
            parallelism: defaults.parallelism,
            start_hour: defaults.start_hour,
            days_of_week: defaults.days_of_week.clone(),
            days_of_month: defaults.days_of_month.clone(),
            timeout: defaults.timeout,
            use_alt_subscription: false,
            use_dev_test_subscription: false,
            location_override: None,
        }
    }

    /// Locations the job should use given the environment default
    #[must_use]
    pub fn effective_location<'a>(
        &'a self,
        environment_default: &'a LocationConfiguration,
    ) -> &'a LocationConfiguration {
        match &self.location_override {
            Some(location) if location.is_set() => location,
            _ => environment_default,
        }
    }

    /// Execution limit for the CI server, in minutes
    #[must_use]
    pub fn timeout_minutes(&self) -> u32 {
        self.timeout.saturating_mul(60)
    }
}

/// Per-service override; unset fields fall back to [`Defaults`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct TestConfigurationOverride {
    /// Tests run concurrently
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallelism: Option<u32>,
    /// Hour (UTC) of the scheduled run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_hour: Option<u8>,
    /// Cron day-of-week field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<String>,
    /// Cron day-of-month field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_month: Option<String>,
    /// Timeout in hours
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    /// Run against the alternate subscription
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_alt_subscription: Option<bool>,
    /// Run against the dev-test subscription
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_dev_test_subscription: Option<bool>,
    /// Regions replacing the environment default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_override: Option<LocationConfiguration>,
}

impl TestConfigurationOverride {
    /// An override that changes nothing
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parallelism
    #[must_use]
    pub const fn parallelism(mut self, parallelism: u32) -> Self {
        self.parallelism = Some(parallelism);
        self
    }

    /// Set the scheduled start hour
    #[must_use]
    pub const fn start_hour(mut self, hour: u8) -> Self {
        self.start_hour = Some(hour);
        self
    }

    /// Set the cron day-of-week field
    #[must_use]
    pub fn days_of_week(mut self, days: impl Into<String>) -> Self {
        self.days_of_week = Some(days.into());
        self
    }

    /// Set the cron day-of-month field
    #[must_use]
    pub fn days_of_month(mut self, days: impl Into<String>) -> Self {
        self.days_of_month = Some(days.into());
        self
    }

    /// Set the timeout in hours
    #[must_use]
    pub const fn timeout(mut self, hours: u32) -> Self {
        self.timeout = Some(hours);
        self
    }

    /// Run against the alternate subscription
    #[must_use]
    pub const fn alt_subscription(mut self) -> Self {
        self.use_alt_subscription = Some(true);
        self
    }

    /// Run against the dev-test subscription
    #[must_use]
    pub const fn dev_test_subscription(mut self) -> Self {
        self.use_dev_test_subscription = Some(true);
        self
    }

    /// Replace the environment's regions
    #[must_use]
    pub fn location(mut self, location: LocationConfiguration) -> Self {
        self.location_override = Some(location);
        self
    }

    /// Merge this override over the defaults, field by field
    #[must_use]
    pub fn apply(&self, defaults: &Defaults) -> TestConfiguration {
        TestConfiguration {
            parallelism: self.parallelism.unwrap_or(defaults.parallelism),
            start_hour: self.start_hour.unwrap_or(defaults.start_hour),
            days_of_week: self
                .days_of_week
                .clone()
                .unwrap_or_else(|| defaults.days_of_week.clone()),
            days_of_month: self
                .days_of_month
                .clone()
                .unwrap_or_else(|| defaults.days_of_month.clone()),
            timeout: self.timeout.unwrap_or(defaults.timeout),
            use_alt_subscription: self.use_alt_subscription.unwrap_or(false),
            use_dev_test_subscription: self.use_dev_test_subscription.unwrap_or(false),
            location_override: self
                .location_override
                .clone()
                .filter(LocationConfiguration::is_set),
        }
    }
}

/// Immutable settings tables
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    defaults: Defaults,
    services: ServiceCatalog,
    locations: BTreeMap<String, LocationConfiguration>,
    nightly: BTreeMap<String, bool>,
    overrides: BTreeMap<String, TestConfigurationOverride>,
}

impl Settings {
    /// Start building settings from scratch
    #[must_use]
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }

    /// The built-in tables for the `azurerm` provider
    ///
    /// # Errors
    /// Fails only if the built-in tables are inconsistent.
    pub fn builtin() -> Result<Self> {
        builtin::builder().build()
    }

    /// Global defaults
    #[must_use]
    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// Service catalog
    #[must_use]
    pub fn services(&self) -> &ServiceCatalog {
        &self.services
    }

    /// Environments with a location configuration, sorted
    pub fn environments(&self) -> impl Iterator<Item = &str> {
        self.locations.keys().map(String::as_str)
    }

    /// Default locations for an environment
    ///
    /// # Errors
    /// Returns `Error::UnknownEnvironment` when the environment has no entry.
    pub fn locations_for(&self, environment: &str) -> Result<&LocationConfiguration> {
        self.locations
            .get(environment)
            .ok_or_else(|| Error::unknown_environment(environment, self.environments()))
    }

    /// Whether scheduled runs are enabled for an environment (absent means no)
    #[must_use]
    pub fn runs_nightly(&self, environment: &str) -> bool {
        self.nightly.get(environment).copied().unwrap_or(false)
    }

    /// Override registered for a service key, if any
    #[must_use]
    pub fn override_for(&self, service: &str) -> Option<&TestConfigurationOverride> {
        self.overrides.get(service)
    }

    /// All overrides, sorted by service key
    pub fn overrides(&self) -> impl Iterator<Item = (&str, &TestConfigurationOverride)> {
        self.overrides.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Override keys that do not name a catalog service
    #[must_use]
    pub fn unknown_override_keys(&self) -> Vec<&str> {
        self.overrides
            .keys()
            .map(String::as_str)
            .filter(|key| !self.services.contains(key))
            .collect()
    }

    /// Merge defaults and the service's override for an environment.
    ///
    /// # Errors
    /// Returns `Error::UnknownEnvironment` for an environment without locations
    /// and `Error::UnknownService` for a key missing from the catalog.
    pub fn resolve_config(&self, service: &str, environment: &str) -> Result<TestConfiguration> {
        self.locations_for(environment)?;
        if !self.services.contains(service) {
            return Err(Error::unknown_service(service));
        }

        let config = self.override_for(service).map_or_else(
            || TestConfiguration::from_defaults(&self.defaults),
            |o| o.apply(&self.defaults),
        );
        tracing::trace!(service, environment, ?config, "Resolved test configuration");
        Ok(config)
    }
}

/// Builder for [`Settings`]
#[derive(Debug, Clone, Default)]
pub struct SettingsBuilder {
    defaults: Defaults,
    services: Option<ServiceCatalog>,
    locations: BTreeMap<String, LocationConfiguration>,
    nightly: BTreeMap<String, bool>,
    overrides: Vec<(String, TestConfigurationOverride)>,
}

impl SettingsBuilder {
    /// Replace the defaults
    #[must_use]
    pub fn defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Replace the service catalog (the built-in catalog is used otherwise)
    #[must_use]
    pub fn services(mut self, services: ServiceCatalog) -> Self {
        self.services = Some(services);
        self
    }

    /// Set the default locations of an environment
    #[must_use]
    pub fn location(
        mut self,
        environment: impl Into<String>,
        location: LocationConfiguration,
    ) -> Self {
        self.locations.insert(environment.into(), location);
        self
    }

    /// Set whether an environment runs scheduled tests
    #[must_use]
    pub fn nightly(mut self, environment: impl Into<String>, enabled: bool) -> Self {
        self.nightly.insert(environment.into(), enabled);
        self
    }

    /// Register an override for a service
    #[must_use]
    pub fn override_service(
        mut self,
        service: impl Into<String>,
        test_config: TestConfigurationOverride,
    ) -> Self {
        self.overrides.push((service.into(), test_config));
        self
    }

    /// Validate and freeze the settings.
    ///
    /// Override keys are not checked against the catalog here; that is the job
    /// of the override validation check so it can be reported alongside others.
    ///
    /// # Errors
    /// Returns `Error::DuplicateOverride` for a repeated override key and
    /// `Error::Configuration` for out-of-range values.
    pub fn build(self) -> Result<Settings> {
        validate_values("defaults", &TestConfiguration::from_defaults(&self.defaults))?;

        let mut overrides = BTreeMap::new();
        for (service, test_config) in self.overrides {
            validate_values(&service, &test_config.apply(&self.defaults))?;
            if overrides.insert(service.clone(), test_config).is_some() {
                return Err(Error::DuplicateOverride { service });
            }
        }

        for (environment, location) in &self.locations {
            if !location.is_set() {
                return Err(Error::configuration(format!(
                    "environment '{environment}' has no primary location"
                )));
            }
        }

        Ok(Settings {
            defaults: self.defaults,
            services: self.services.unwrap_or_else(ServiceCatalog::builtin),
            locations: self.locations,
            nightly: self.nightly,
            overrides,
        })
    }
}

fn validate_values(scope: &str, config: &TestConfiguration) -> Result<()> {
    if config.start_hour > 23 {
        return Err(Error::configuration_with_help(
            format!("{scope}: start hour {} is out of range", config.start_hour),
            "Start hours are UTC hours between 0 and 23",
        ));
    }
    if config.parallelism == 0 {
        return Err(Error::configuration(format!(
            "{scope}: parallelism must be at least 1"
        )));
    }
    if config.timeout == 0 {
        return Err(Error::configuration(format!(
            "{scope}: timeout must be at least 1 hour"
        )));
    }
    Ok(())
}
