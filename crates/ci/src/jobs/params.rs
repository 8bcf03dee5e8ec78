//! Build parameters
//!
//! Parameter names are read by the test binaries and the CI server; they must
//! not change.

use crate::ir::Parameter;
use acctest_core::{ClientConfiguration, Defaults, LocationConfiguration, SecretValue};

/// Which subscription a job runs against
///
/// | profile | `ARM_SUBSCRIPTION_ID` | `ARM_SUBSCRIPTION_ID_ALT` |
/// |---------|-----------------------|---------------------------|
/// | `Default` | primary | alternate |
/// | `Alt` | alternate | primary |
/// | `DevTest` | dev-test | primary |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubscriptionProfile {
    /// Primary subscription
    #[default]
    Default,
    /// Alternate subscription, primary becomes the alternate
    Alt,
    /// Dev-test subscription, primary becomes the alternate
    DevTest,
}

impl SubscriptionProfile {
    /// Profile for a test configuration's flags; the alternate flag wins
    #[must_use]
    pub const fn from_flags(use_alt_subscription: bool, use_dev_test_subscription: bool) -> Self {
        if use_alt_subscription {
            Self::Alt
        } else if use_dev_test_subscription {
            Self::DevTest
        } else {
            Self::Default
        }
    }

    /// `(ARM_SUBSCRIPTION_ID, ARM_SUBSCRIPTION_ID_ALT)` values for this profile
    #[must_use]
    pub const fn select(self, config: &ClientConfiguration) -> (&SecretValue, &SecretValue) {
        match self {
            Self::Default => (&config.subscription_id, &config.subscription_id_alt),
            Self::Alt => (&config.subscription_id_alt, &config.subscription_id),
            Self::DevTest => (&config.subscription_id_dev_test, &config.subscription_id),
        }
    }
}

/// `PARALLELISM`, `TEST_PREFIX` and `TIMEOUT` (hours)
#[must_use]
pub fn acceptance_test_parameters(parallelism: u32, prefix: &str, timeout: u32) -> Vec<Parameter> {
    vec![
        Parameter::text("PARALLELISM", parallelism.to_string()),
        Parameter::text("TEST_PREFIX", prefix),
        Parameter::text("TIMEOUT", timeout.to_string()),
    ]
}

/// Terraform test harness switches
#[must_use]
pub fn terraform_parameters(defaults: &Defaults) -> Vec<Parameter> {
    vec![
        Parameter::hidden("env.TF_ACC", "1", "Set to a value to run the Acceptance Tests"),
        Parameter::text(
            "env.TF_ACC_TERRAFORM_VERSION",
            defaults.terraform_core_version.clone(),
        ),
        Parameter::hidden(
            "env.TF_SCHEMA_PANIC_ON_ERROR",
            "1",
            "Panic if unknown/unmatched fields are set into the state",
        ),
        Parameter::hidden(
            "teamcity.ui.settings.readOnly",
            "true",
            "Requires build configurations be edited via versioned settings",
        ),
    ]
}

/// Credentials, subscriptions and locations for the Azure test harness
#[must_use]
pub fn azure_parameters(
    environment: &str,
    config: &ClientConfiguration,
    locations: &LocationConfiguration,
    profile: SubscriptionProfile,
) -> Vec<Parameter> {
    let (subscription, subscription_alt) = profile.select(config);
    vec![
        Parameter::secret(
            "env.ARM_CLIENT_ID",
            &config.client_id,
            "The ID of the Service Principal used for Testing",
        ),
        Parameter::secret(
            "env.ARM_CLIENT_ID_ALT",
            &config.client_id_alt,
            "The ID of the Alternate Service Principal used for Testing",
        ),
        Parameter::secret(
            "env.ARM_CLIENT_SECRET",
            &config.client_secret,
            "The Client Secret of the Service Principal used for Testing",
        ),
        Parameter::secret(
            "env.ARM_CLIENT_SECRET_ALT",
            &config.client_secret_alt,
            "The Client Secret of the Alternate Service Principal used for Testing",
        ),
        Parameter::secret(
            "env.ARM_TENANT_ID",
            &config.tenant_id,
            "The ID of the Azure Active Directory Tenant used for Testing",
        ),
        Parameter::secret(
            "env.ARM_TENANT_ID_ALT",
            &config.tenant_id_alt,
            "The ID of the Alternate Azure Active Directory Tenant used for Testing",
        ),
        Parameter::secret(
            "env.ARM_SUBSCRIPTION_ID_ALT_TENANT",
            &config.subscription_id_alt_tenant,
            "The ID of the Subscription in the Alternate Tenant used for Testing",
        ),
        Parameter::secret(
            "env.ARM_PRINCIPAL_ID_ALT_TENANT",
            &config.principal_id_alt_tenant,
            "The ID of the Service Principal in the Alternate Tenant used for Testing",
        ),
        Parameter::secret(
            "env.ARM_SUBSCRIPTION_ID",
            subscription,
            "The ID of the Azure Subscription used for Testing",
        ),
        Parameter::secret(
            "env.ARM_SUBSCRIPTION_ID_ALT",
            subscription_alt,
            "The ID of the Alternate Azure Subscription used for Testing",
        ),
        Parameter::hidden(
            "env.ARM_TEST_LOCATION",
            locations.primary.clone(),
            "The Primary region which should be used for testing",
        ),
        Parameter::hidden(
            "env.ARM_TEST_LOCATION_ALT",
            locations.secondary.clone(),
            "The Secondary region which should be used for testing",
        ),
        Parameter::hidden(
            "env.ARM_TEST_LOCATION_ALT2",
            locations.tertiary.clone(),
            "The Tertiary region which should be used for testing",
        ),
        Parameter::hidden(
            "env.ARM_ENVIRONMENT",
            environment,
            "The Azure Environment in which the tests are running",
        ),
    ]
}
