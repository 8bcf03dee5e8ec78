//! On-demand pull request job

use super::{
    JobContext, SubscriptionProfile, TEST_PREFIX, acceptance_test_parameters, azure_parameters,
    configure_go_env, features, nightly_trigger, pull_request_job_id,
    run_acceptance_tests_for_pull_request, terraform_parameters,
};
use crate::ir::{BuildJobDescriptor, FailureConditions, JobKind, Parameter, VcsSettings};
use acctest_core::ClientConfiguration;

/// Display name of the pull request job; the `!` sorts it first in the UI
pub const PULL_REQUEST_DISPLAY_NAME: &str = "! Run Pull Request";

/// Build the pull request job.
///
/// Uses the default test configuration and the environment's locations. Its
/// schedule trigger is always disabled; runs are started by hand with the
/// `SERVICES` parameter naming the packages to test.
#[must_use]
pub fn build_pull_request_job(
    ctx: &JobContext<'_>,
    credentials: &ClientConfiguration,
) -> BuildJobDescriptor {
    let defaults = ctx.defaults;

    let mut parameters =
        acceptance_test_parameters(defaults.parallelism, TEST_PREFIX, defaults.timeout);
    parameters.extend(terraform_parameters(defaults));
    parameters.push(Parameter::text("SERVICES", "portal"));
    parameters.extend(azure_parameters(
        ctx.environment,
        credentials,
        ctx.environment_locations,
        SubscriptionProfile::Default,
    ));

    BuildJobDescriptor {
        id: pull_request_job_id(ctx.provider, ctx.environment),
        name: PULL_REQUEST_DISPLAY_NAME.to_string(),
        kind: JobKind::PullRequest,
        vcs: VcsSettings {
            root_id: credentials.vcs_root_id.clone(),
            clean_checkout: true,
        },
        steps: vec![configure_go_env(), run_acceptance_tests_for_pull_request()],
        parameters,
        failure_conditions: FailureConditions {
            error_message: true,
            execution_timeout_min: Some(defaults.timeout.saturating_mul(60)),
        },
        features: features(defaults),
        triggers: vec![nightly_trigger(
            false,
            defaults.start_hour,
            &defaults.days_of_week,
            &defaults.days_of_month,
        )],
        locations: ctx.environment_locations.clone(),
    }
}
