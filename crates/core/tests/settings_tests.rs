//! Integration tests for settings loading and merging

use acctest_core::{Defaults, Error, Settings, TestConfigurationOverride};
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_settings_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("acctest.toml");
    fs::write(
        &path,
        r#"
[locations.china]
primary = "chinaeast2"
secondary = "chinanorth2"
tertiary = "chinaeast"

[overrides.storage]
parallelism = 5
use_dev_test_subscription = true
"#,
    )
    .unwrap();

    let settings = Settings::load(&path).unwrap();
    let storage = settings.resolve_config("storage", "china").unwrap();
    assert_eq!(storage.parallelism, 5);
    assert!(storage.use_dev_test_subscription);
    assert!(!settings.runs_nightly("china"));
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = Settings::load(&temp_dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn test_every_builtin_service_resolves_in_every_environment() {
    let settings = Settings::builtin().unwrap();
    let environments: Vec<String> = settings.environments().map(str::to_string).collect();
    for service in settings.services() {
        for environment in &environments {
            let config = settings.resolve_config(&service.key, environment).unwrap();
            assert!(config.start_hour < 24, "{}: bad start hour", service.key);
            assert!(config.parallelism > 0, "{}: zero parallelism", service.key);
        }
    }
}

#[test]
fn test_resolved_config_serializes() {
    let settings = Settings::builtin().unwrap();
    let config = settings.resolve_config("containers", "public").unwrap();
    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["parallelism"], 5);
    assert_eq!(json["timeout"], 18);
    assert_eq!(json["location_override"]["primary"], "eastus");
}

proptest! {
    #[test]
    fn test_unset_fields_fall_back_to_defaults(
        parallelism in proptest::option::of(1u32..64),
        start_hour in proptest::option::of(0u8..24),
        timeout in proptest::option::of(1u32..48),
    ) {
        let defaults = Defaults::default();
        let o = TestConfigurationOverride {
            parallelism,
            start_hour,
            timeout,
            ..TestConfigurationOverride::default()
        };
        let merged = o.apply(&defaults);

        prop_assert_eq!(merged.parallelism, parallelism.unwrap_or(defaults.parallelism));
        prop_assert_eq!(merged.start_hour, start_hour.unwrap_or(defaults.start_hour));
        prop_assert_eq!(merged.timeout, timeout.unwrap_or(defaults.timeout));
        prop_assert_eq!(merged.days_of_week, defaults.days_of_week);
        prop_assert_eq!(merged.days_of_month, defaults.days_of_month);
        prop_assert!(merged.location_override.is_none());
    }
}
