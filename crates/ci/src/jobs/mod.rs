//! Build job descriptor builders
//!
//! Builders are pure: the same inputs always give an identical descriptor.
//! Every job carries, in order, the environment setup step, the acceptance
//! test step, a schedule trigger (possibly disabled), the fail-on-error
//! condition with its execution limit, and plain then secret parameters.

mod params;
mod pull_request;
mod service;
mod steps;

pub use params::{
    SubscriptionProfile, acceptance_test_parameters, azure_parameters, terraform_parameters,
};
pub use pull_request::{PULL_REQUEST_DISPLAY_NAME, build_pull_request_job};
pub use service::build_service_job;
pub use steps::{configure_go_env, run_acceptance_tests, run_acceptance_tests_for_pull_request};

use crate::ir::{BuildFeature, DEFAULT_BRANCH_FILTER, ScheduleTrigger, TestFormat, Trigger};
use acctest_core::{Defaults, LocationConfiguration};

/// Test function prefix selecting acceptance tests
pub const TEST_PREFIX: &str = "TestAcc";

/// Inputs shared by every job of a project
#[derive(Debug, Clone, Copy)]
pub struct JobContext<'a> {
    /// Provider name (e.g. `azurerm`)
    pub provider: &'a str,
    /// Environment name (e.g. `public`)
    pub environment: &'a str,
    /// Global defaults
    pub defaults: &'a Defaults,
    /// Whether the environment runs scheduled tests
    pub runs_nightly: bool,
    /// The environment's default locations
    pub environment_locations: &'a LocationConfiguration,
}

/// `{PROVIDER}_SERVICE_{ENVIRONMENT}_{SERVICE}`, upper-cased
#[must_use]
pub fn service_job_id(provider: &str, environment: &str, service: &str) -> String {
    format!("{provider}_SERVICE_{environment}_{service}").to_uppercase()
}

/// `{PROVIDER}_PR_{ENVIRONMENT}`, upper-cased
#[must_use]
pub fn pull_request_job_id(provider: &str, environment: &str) -> String {
    format!("{provider}_PR_{environment}").to_uppercase()
}

/// Scheduled trigger on the main branch at the given hour
#[must_use]
pub fn nightly_trigger(
    enabled: bool,
    start_hour: u8,
    days_of_week: &str,
    days_of_month: &str,
) -> Trigger {
    Trigger::Schedule(ScheduleTrigger {
        enabled,
        branch_filter: DEFAULT_BRANCH_FILTER.to_string(),
        hours: start_hour,
        days_of_week: days_of_week.to_string(),
        days_of_month: days_of_month.to_string(),
        timezone: "SERVER".to_string(),
        trigger_build_always: true,
        with_pending_changes_only: false,
    })
}

fn features(defaults: &Defaults) -> Vec<BuildFeature> {
    if defaults.test_runner_feature {
        vec![BuildFeature::GoTestReport {
            test_format: TestFormat::Json,
        }]
    } else {
        Vec::new()
    }
}
