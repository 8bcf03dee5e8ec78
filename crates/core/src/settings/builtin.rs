//! Built-in settings tables for the `azurerm` provider

use super::{Defaults, LocationConfiguration, SettingsBuilder, TestConfigurationOverride};
use crate::ServiceCatalog;

pub(super) fn builder() -> SettingsBuilder {
    let builder = SettingsBuilder::default()
        .defaults(Defaults::default())
        .services(ServiceCatalog::builtin())
        .location(
            "public",
            LocationConfiguration::new("westeurope", "eastus2", "westus2", true),
        )
        .location(
            "china",
            LocationConfiguration::new("chinaeast2", "chinanorth2", "chinaeast", false),
        )
        .location(
            "germany",
            LocationConfiguration::new(
                "germanynortheast",
                "germanycentral",
                "germanynortheast",
                false,
            ),
        )
        .location(
            "usgovernment",
            LocationConfiguration::new("usgovvirginia", "usgovarizona", "usgovtexas", false),
        )
        .nightly("public", true)
        .nightly("china", false)
        .nightly("germany", false)
        .nightly("usgovernment", false);

    overrides()
        .into_iter()
        .fold(builder, |b, (service, o)| b.override_service(service, o))
}

fn overrides() -> Vec<(&'static str, TestConfigurationOverride)> {
    vec![
        // Server is only available in certain locations
        (
            "analysisservices",
            TestConfigurationOverride::new()
                .location(LocationConfiguration::new(
                    "westus",
                    "northeurope",
                    "southcentralus",
                    true,
                ))
                .dev_test_subscription(),
        ),
        // Linux plans are unavailable in westus2
        (
            "appservice",
            TestConfigurationOverride::new()
                .start_hour(3)
                .days_of_week("2,4,6")
                .location(LocationConfiguration::new(
                    "westeurope",
                    "westus",
                    "eastus2",
                    true,
                )),
        ),
        // Role assignments collide when run concurrently
        ("authorization", TestConfigurationOverride::new().parallelism(1)),
        ("automation", TestConfigurationOverride::new().parallelism(5)),
        (
            "containers",
            TestConfigurationOverride::new()
                .parallelism(5)
                .location(LocationConfiguration::new(
                    "eastus",
                    "westeurope",
                    "eastus2",
                    false,
                ))
                .timeout(18),
        ),
        (
            "cosmos",
            TestConfigurationOverride::new()
                .parallelism(15)
                .location(LocationConfiguration::new(
                    "westus",
                    "northeurope",
                    "eastus2",
                    true,
                )),
        ),
        ("datashare", TestConfigurationOverride::new().parallelism(5)),
        (
            "hdinsight",
            TestConfigurationOverride::new()
                .parallelism(15)
                .days_of_week("2,4,6")
                .location(LocationConfiguration::new(
                    "westeurope",
                    "southeastasia",
                    "eastus2",
                    false,
                )),
        ),
        // Caches are expensive; twice a month is enough
        (
            "hpccache",
            TestConfigurationOverride::new()
                .parallelism(3)
                .days_of_month("1,15"),
        ),
        (
            "kusto",
            TestConfigurationOverride::new()
                .parallelism(8)
                .location(LocationConfiguration::new(
                    "westeurope",
                    "eastus2",
                    "southcentralus",
                    false,
                )),
        ),
        ("managementgroup", TestConfigurationOverride::new().parallelism(1)),
        (
            "netapp",
            TestConfigurationOverride::new()
                .parallelism(3)
                .dev_test_subscription()
                .location(LocationConfiguration::new(
                    "westeurope",
                    "eastus2",
                    "westus2",
                    false,
                )),
        ),
        (
            "network",
            TestConfigurationOverride::new()
                .parallelism(5)
                .days_of_week("1,3,5")
                .alt_subscription(),
        ),
        ("servicefabricmanaged", TestConfigurationOverride::new().parallelism(5)),
        (
            "signalr",
            TestConfigurationOverride::new()
                .parallelism(3)
                .alt_subscription(),
        ),
        (
            "springcloud",
            TestConfigurationOverride::new()
                .parallelism(5)
                .days_of_week("2,4,6"),
        ),
        (
            "storage",
            TestConfigurationOverride::new()
                .parallelism(5)
                .dev_test_subscription(),
        ),
        ("subscription", TestConfigurationOverride::new().parallelism(3)),
        (
            "videoanalyzer",
            TestConfigurationOverride::new().location(LocationConfiguration::new(
                "westus2",
                "eastus2",
                "westeurope",
                false,
            )),
        ),
        (
            "vmware",
            TestConfigurationOverride::new()
                .parallelism(3)
                .location(LocationConfiguration::new(
                    "westeurope",
                    "westus2",
                    "eastus2",
                    false,
                )),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use crate::Settings;

    #[test]
    fn test_builtin_settings_build() {
        let settings = Settings::builtin().unwrap();
        assert!(settings.unknown_override_keys().is_empty());
        let environments: Vec<&str> = settings.environments().collect();
        assert_eq!(environments, vec!["china", "germany", "public", "usgovernment"]);
    }

    #[test]
    fn test_authorization_only_changes_parallelism() {
        let settings = Settings::builtin().unwrap();
        let config = settings.resolve_config("authorization", "public").unwrap();
        assert_eq!(config.parallelism, 1);
        assert_eq!(config.start_hour, 0);
        assert_eq!(config.days_of_week, "*");
        assert_eq!(config.days_of_month, "*");
        assert_eq!(config.timeout, 12);
        assert!(!config.use_alt_subscription);
        assert!(!config.use_dev_test_subscription);
        assert!(config.location_override.is_none());
    }

    #[test]
    fn test_containers_override() {
        let settings = Settings::builtin().unwrap();
        let config = settings.resolve_config("containers", "public").unwrap();
        assert_eq!(config.parallelism, 5);
        assert_eq!(config.timeout, 18);

        let public = settings.locations_for("public").unwrap();
        let location = config.location_override.as_ref().unwrap();
        assert_ne!(location, public);
        assert_eq!(location.primary, "eastus");
        assert_eq!(config.effective_location(public).primary, "eastus");
    }

    #[test]
    fn test_only_public_runs_nightly() {
        let settings = Settings::builtin().unwrap();
        assert!(settings.runs_nightly("public"));
        assert!(!settings.runs_nightly("china"));
        assert!(!settings.runs_nightly("usgovernment"));
    }
}
