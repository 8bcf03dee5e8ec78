//! Credentials supplied by the hosting CI server
//!
//! Values arrive already resolved (from the CI server's parameter store or the
//! process environment). Missing values stay empty strings; the cloud API
//! rejects them downstream.

use secrecy::{ExposeSecret, SecretString};

/// A credential value that never shows up in `Debug` or `Display` output.
#[derive(Clone)]
pub struct SecretValue {
    inner: SecretString,
}

impl SecretValue {
    /// Wrap a credential value
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: SecretString::from(value.into()),
        }
    }

    /// Expose the value for emission into the CI configuration.
    ///
    /// Callers must not log the returned string.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.inner.expose_secret()
    }

    /// Whether the value is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.expose_secret().is_empty()
    }
}

impl Default for SecretValue {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl PartialEq for SecretValue {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for SecretValue {}

impl From<String> for SecretValue {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecretValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl std::fmt::Display for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Service principal credentials, subscriptions and global switches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfiguration {
    /// Primary service principal client id
    pub client_id: SecretValue,
    /// Primary service principal secret
    pub client_secret: SecretValue,
    /// Primary subscription
    pub subscription_id: SecretValue,
    /// Primary tenant
    pub tenant_id: SecretValue,
    /// Alternate service principal client id
    pub client_id_alt: SecretValue,
    /// Alternate service principal secret
    pub client_secret_alt: SecretValue,
    /// Alternate subscription
    pub subscription_id_alt: SecretValue,
    /// Dev-test subscription
    pub subscription_id_dev_test: SecretValue,
    /// Alternate tenant
    pub tenant_id_alt: SecretValue,
    /// Subscription inside the alternate tenant
    pub subscription_id_alt_tenant: SecretValue,
    /// Principal inside the alternate tenant
    pub principal_id_alt_tenant: SecretValue,
    /// VCS root the jobs check out
    pub vcs_root_id: String,
    /// Master switch for scheduled triggers
    pub enable_test_triggers_globally: bool,
}

impl ClientConfiguration {
    /// Credentials that have not been supplied, by their environment variable name
    #[must_use]
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("ARM_CLIENT_ID", &self.client_id),
            ("ARM_CLIENT_SECRET", &self.client_secret),
            ("ARM_SUBSCRIPTION_ID", &self.subscription_id),
            ("ARM_TENANT_ID", &self.tenant_id),
            ("ARM_CLIENT_ID_ALT", &self.client_id_alt),
            ("ARM_CLIENT_SECRET_ALT", &self.client_secret_alt),
            ("ARM_SUBSCRIPTION_ID_ALT", &self.subscription_id_alt),
            ("ARM_SUBSCRIPTION_ID_DEVTEST", &self.subscription_id_dev_test),
            ("ARM_TENANT_ID_ALT", &self.tenant_id_alt),
            ("ARM_SUBSCRIPTION_ID_ALT_TENANT", &self.subscription_id_alt_tenant),
            ("ARM_PRINCIPAL_ID_ALT_TENANT", &self.principal_id_alt_tenant),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_value_is_redacted() {
        let secret = SecretValue::new("hunter2");
        assert_eq!(format!("{secret:?}"), "[REDACTED]");
        assert_eq!(secret.to_string(), "[REDACTED]");
        assert_eq!(secret.expose(), "hunter2");
    }

    #[test]
    fn test_client_configuration_debug_has_no_secrets() {
        let config = ClientConfiguration {
            client_secret: "super-secret".into(),
            vcs_root_id: "AzureRM_Root".to_string(),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("AzureRM_Root"));
    }

    #[test]
    fn test_defaults_are_empty() {
        let config = ClientConfiguration::default();
        assert!(config.client_id.is_empty());
        assert!(!config.enable_test_triggers_globally);
        assert_eq!(config.missing().len(), 11);
    }

    #[test]
    fn test_missing_lists_only_empty_values() {
        let config = ClientConfiguration {
            client_id: "id".into(),
            client_secret: "secret".into(),
            ..Default::default()
        };
        let missing = config.missing();
        assert!(!missing.contains(&"ARM_CLIENT_ID"));
        assert!(missing.contains(&"ARM_TENANT_ID"));
    }

    #[test]
    fn test_secret_equality_compares_values() {
        assert_eq!(SecretValue::new("a"), SecretValue::from("a"));
        assert_ne!(SecretValue::new("a"), SecretValue::new("b"));
    }
}
