//! Project assembly
//!
//! Turns the settings tables and the client configuration into a complete
//! [`Project`]: the pull request job first, then one scheduled job per
//! catalog service in catalog order.

use crate::Result;
use crate::ir::{PROVIDER_NAME, Project};
use crate::jobs::{JobContext, build_pull_request_job, build_service_job};
use acctest_core::{ClientConfiguration, Settings};

/// Assembles projects from a settings table
#[derive(Debug, Clone, Copy)]
pub struct ProjectAssembler<'a> {
    settings: &'a Settings,
    provider: &'a str,
}

impl<'a> ProjectAssembler<'a> {
    /// Create an assembler for the `azurerm` provider
    #[must_use]
    pub const fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            provider: PROVIDER_NAME,
        }
    }

    /// Use a different provider name in job ids
    #[must_use]
    pub const fn with_provider(mut self, provider: &'a str) -> Self {
        self.provider = provider;
        self
    }

    /// Build every job for an environment.
    ///
    /// # Errors
    /// Returns `Error::UnknownEnvironment` before any job is built when the
    /// environment has no locations, and `Error::DuplicateJob` when two
    /// services map to the same job id.
    pub fn assemble(
        &self,
        environment: &str,
        credentials: &ClientConfiguration,
    ) -> Result<Project> {
        let environment_locations = self.settings.locations_for(environment)?;
        let runs_nightly = self.settings.runs_nightly(environment);

        if runs_nightly && !credentials.enable_test_triggers_globally {
            tracing::warn!(
                environment,
                "Scheduled triggers are disabled globally; nightly jobs will not run"
            );
        }

        let ctx = JobContext {
            provider: self.provider,
            environment,
            defaults: self.settings.defaults(),
            runs_nightly,
            environment_locations,
        };

        let mut project = Project::new(self.provider, environment, credentials.vcs_root_id.clone());

        let pull_request = build_pull_request_job(&ctx, credentials);
        tracing::debug!(job = %pull_request.id, "Built pull request job");
        project.add_job(pull_request)?;

        for service in self.settings.services() {
            let test_config = self.settings.resolve_config(&service.key, environment)?;
            let job = build_service_job(&ctx, service, &test_config, credentials);
            tracing::debug!(
                job = %job.id,
                parallelism = test_config.parallelism,
                timeout = test_config.timeout,
                "Built service job"
            );
            project.add_job(job)?;
        }

        tracing::info!(
            project = %project.id,
            jobs = project.jobs().len(),
            "Assembled project"
        );
        Ok(project)
    }
}
