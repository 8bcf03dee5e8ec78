//! Service catalog
//!
//! Every entry gets its own acceptance test job. The key doubles as the Go
//! package name under `internal/services/`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A provider service with its display name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceEntry {
    /// Package key (e.g. `containers`)
    pub key: String,
    /// Human-readable name (e.g. `Container Services`)
    pub display_name: String,
}

impl ServiceEntry {
    /// Create a service entry
    pub fn new(key: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
        }
    }

    /// Package path handed to `go test`
    #[must_use]
    pub fn package_path(&self) -> String {
        format!("./internal/services/{}", self.key)
    }
}

/// Ordered catalog of services with unique keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceCatalog {
    entries: Vec<ServiceEntry>,
}

impl ServiceCatalog {
    /// Build a catalog, rejecting duplicate keys.
    ///
    /// # Errors
    /// Returns `Error::DuplicateService` when a key repeats.
    pub fn new(entries: impl IntoIterator<Item = ServiceEntry>) -> Result<Self> {
        let entries: Vec<ServiceEntry> = entries.into_iter().collect();
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.key.as_str()) {
                return Err(Error::DuplicateService {
                    service: entry.key.clone(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// The catalog of `azurerm` services.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_SERVICES
                .iter()
                .map(|(key, name)| ServiceEntry::new(*key, *name))
                .collect(),
        }
    }

    /// Look up a service by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ServiceEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Whether a key is in the catalog
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Entries in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &ServiceEntry> {
        self.entries.iter()
    }

    /// Number of services
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ServiceCatalog {
    type Item = &'a ServiceEntry;
    type IntoIter = std::slice::Iter<'a, ServiceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

const BUILTIN_SERVICES: &[(&str, &str)] = &[
    ("aadb2c", "AAD B2C"),
    ("advisor", "Advisor"),
    ("analysisservices", "Analysis Services"),
    ("apimanagement", "API Management"),
    ("appconfiguration", "App Configuration"),
    ("applicationinsights", "Application Insights"),
    ("appservice", "App Service"),
    ("arckubernetes", "ArcKubernetes"),
    ("attestation", "Attestation"),
    ("authorization", "Authorization"),
    ("automanage", "Automanage"),
    ("automation", "Automation"),
    ("azurestackhci", "Azure Stack HCI"),
    ("batch", "Batch"),
    ("blueprints", "Blueprints"),
    ("bot", "Bot"),
    ("cdn", "CDN"),
    ("cognitive", "Cognitive Services"),
    ("communication", "Communication"),
    ("compute", "Compute"),
    ("computefleet", "Compute Fleet"),
    ("connections", "Connections"),
    ("consumption", "Consumption"),
    ("containerapps", "Container Apps"),
    ("containers", "Container Services"),
    ("cosmos", "CosmosDB"),
    ("costmanagement", "Cost Management"),
    ("customproviders", "Custom Providers"),
    ("databasemigration", "Database Migration"),
    ("databoxedge", "Databox Edge"),
    ("databricks", "DataBricks"),
    ("datafactory", "Data Factory"),
    ("datalake", "Data Lake"),
    ("dataprotection", "DataProtection"),
    ("datashare", "Data Share"),
    ("desktopvirtualization", "Desktop Virtualization"),
    ("devtestlabs", "Dev Test"),
    ("digitaltwins", "Digital Twins"),
    ("dns", "DNS"),
    ("domainservices", "DomainServices"),
    ("eventgrid", "EventGrid"),
    ("eventhub", "EventHub"),
    ("firewall", "Firewall"),
    ("frontdoor", "FrontDoor"),
    ("hdinsight", "HDInsight"),
    ("healthcare", "Health Care"),
    ("hpccache", "HPC Cache"),
    ("hsm", "Hardware Security Module"),
    ("iotcentral", "IoT Central"),
    ("iothub", "IoT Hub"),
    ("iotoperations", "IoT Operations"),
    ("keyvault", "KeyVault"),
    ("kusto", "Kusto"),
    ("labservice", "Lab Service"),
    ("lighthouse", "Lighthouse"),
    ("loadbalancer", "Load Balancer"),
    ("loganalytics", "Log Analytics"),
    ("logic", "Logic"),
    ("machinelearning", "Machine Learning"),
    ("maintenance", "Maintenance"),
    ("managedapplications", "Managed Applications"),
    ("managementgroup", "Management Group"),
    ("maps", "Maps"),
    ("mariadb", "MariaDB"),
    ("media", "Media"),
    ("mixedreality", "Mixed Reality"),
    ("monitor", "Monitor"),
    ("msi", "Managed Service Identities"),
    ("mssql", "Microsoft SQL Server / SQL Azure"),
    ("mssqlmanagedinstance", "Microsoft SQL Server Managed Instances"),
    ("mysql", "MySQL"),
    ("netapp", "NetApp"),
    ("network", "Network"),
    ("notificationhub", "Notification Hub"),
    ("policy", "Policy"),
    ("portal", "Portal"),
    ("postgres", "PostgreSQL"),
    ("powerbi", "PowerBI"),
    ("privatedns", "Private DNS"),
    ("purview", "Purview"),
    ("recoveryservices", "Recovery Services"),
    ("redis", "Redis"),
    ("redisenterprise", "Redis Enterprise"),
    ("relay", "Relay"),
    ("resource", "Resources"),
    ("search", "Search"),
    ("securitycenter", "Security Center"),
    ("sentinel", "Sentinel"),
    ("servicebus", "ServiceBus"),
    ("servicefabric", "Service Fabric"),
    ("servicefabricmanaged", "Service Fabric Managed Clusters"),
    ("signalr", "SignalR"),
    ("springcloud", "Spring Cloud"),
    ("sql", "SQL"),
    ("storage", "Storage"),
    ("storagecache", "Storage Cache"),
    ("streamanalytics", "Stream Analytics"),
    ("subscription", "Subscription"),
    ("synapse", "Synapse"),
    ("systemcentervirtualmachinemanager", "System Center Virtual Machine Manager"),
    ("trafficmanager", "Traffic Manager"),
    ("videoanalyzer", "Video Analyzer"),
    ("vmware", "VMware"),
    ("web", "Web"),
    ("workloads", "Workloads"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_unique() {
        let builtin = ServiceCatalog::builtin();
        let rebuilt = ServiceCatalog::new(builtin.iter().cloned());
        assert!(rebuilt.is_ok());
        assert_eq!(rebuilt.unwrap().len(), builtin.len());
    }

    #[test]
    fn test_lookup() {
        let catalog = ServiceCatalog::builtin();
        let containers = catalog.get("containers").unwrap();
        assert_eq!(containers.display_name, "Container Services");
        assert!(catalog.contains("network"));
        assert!(!catalog.contains("not-a-service"));
    }

    #[test]
    fn test_builtin_catalog_covers_newer_packages() {
        let catalog = ServiceCatalog::builtin();
        for key in [
            "arckubernetes",
            "containerapps",
            "hpccache",
            "mssqlmanagedinstance",
            "storagecache",
            "systemcentervirtualmachinemanager",
            "workloads",
        ] {
            assert!(catalog.contains(key), "missing {key}");
        }
        assert_eq!(
            catalog.get("storagecache").unwrap().package_path(),
            "./internal/services/storagecache"
        );
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let result = ServiceCatalog::new([
            ServiceEntry::new("network", "Network"),
            ServiceEntry::new("network", "Network (again)"),
        ]);
        assert!(matches!(
            result,
            Err(Error::DuplicateService { service }) if service == "network"
        ));
    }

    #[test]
    fn test_package_path() {
        let entry = ServiceEntry::new("storage", "Storage");
        assert_eq!(entry.package_path(), "./internal/services/storage");
    }

    #[test]
    fn test_catalog_order_is_preserved() {
        let catalog = ServiceCatalog::new([
            ServiceEntry::new("web", "Web"),
            ServiceEntry::new("aadb2c", "AAD B2C"),
        ])
        .unwrap();
        let keys: Vec<&str> = catalog.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["web", "aadb2c"]);
    }
}
