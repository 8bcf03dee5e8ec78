//! Scheduled per-service acceptance test job

use super::{
    JobContext, SubscriptionProfile, TEST_PREFIX, acceptance_test_parameters, azure_parameters,
    configure_go_env, features, nightly_trigger, run_acceptance_tests, service_job_id,
    terraform_parameters,
};
use crate::ir::{BuildJobDescriptor, FailureConditions, JobKind, Parameter, VcsSettings};
use acctest_core::{ClientConfiguration, ServiceEntry, TestConfiguration};

/// Build the scheduled job of one service from its merged configuration
#[must_use]
pub fn build_service_job(
    ctx: &JobContext<'_>,
    service: &ServiceEntry,
    test_config: &TestConfiguration,
    credentials: &ClientConfiguration,
) -> BuildJobDescriptor {
    let package_path = service.package_path();
    let locations = test_config.effective_location(ctx.environment_locations);
    let triggers_enabled = credentials.enable_test_triggers_globally && ctx.runs_nightly;
    let profile = SubscriptionProfile::from_flags(
        test_config.use_alt_subscription,
        test_config.use_dev_test_subscription,
    );

    let mut parameters =
        acceptance_test_parameters(test_config.parallelism, TEST_PREFIX, test_config.timeout);
    parameters.extend(terraform_parameters(ctx.defaults));
    parameters.push(Parameter::hidden(
        "SERVICE_PATH",
        package_path.clone(),
        "The path at which to run - automatically updated",
    ));
    parameters.extend(azure_parameters(
        ctx.environment,
        credentials,
        locations,
        profile,
    ));

    BuildJobDescriptor {
        id: service_job_id(ctx.provider, ctx.environment, &service.key),
        name: format!("{} - Acceptance Tests", service.display_name),
        kind: JobKind::Service {
            service: service.key.clone(),
        },
        vcs: VcsSettings {
            root_id: credentials.vcs_root_id.clone(),
            clean_checkout: true,
        },
        steps: vec![configure_go_env(), run_acceptance_tests(&package_path)],
        parameters,
        failure_conditions: FailureConditions {
            error_message: true,
            execution_timeout_min: Some(test_config.timeout_minutes()),
        },
        features: features(ctx.defaults),
        triggers: vec![nightly_trigger(
            triggers_enabled,
            test_config.start_hour,
            &test_config.days_of_week,
            &test_config.days_of_month,
        )],
        locations: locations.clone(),
    }
}
