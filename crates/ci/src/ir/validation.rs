//! Project validation
//!
//! Structural checks the CI server relies on. Each check is callable on its
//! own; [`ProjectValidator`] runs all of them and reports every offender.

use super::schema::{BuildJobDescriptor, Project};
use acctest_core::Settings;
use std::collections::HashSet;
use thiserror::Error;

/// Validation errors for assembled projects
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Job does not fail on logged error messages
    #[error("Job '{job}' does not fail on error messages")]
    MissingErrorOnMessage {
        /// Job id
        job: String,
    },

    /// Go test report feature present when disabled, or absent when enabled
    #[error("Job '{job}' Go test report feature mismatch (expected enabled: {expected})")]
    MissingTestRunnerFeature {
        /// Job id
        job: String,
        /// Whether the feature should be declared
        expected: bool,
    },

    /// Job has no schedule trigger at all
    #[error("Job '{job}' has no schedule trigger")]
    MissingScheduleTrigger {
        /// Job id
        job: String,
    },

    /// Job keeps files between builds
    #[error("Job '{job}' does not clean its checkout directory")]
    DirtyCheckout {
        /// Job id
        job: String,
    },

    /// Override key without a catalog entry
    #[error("Override '{service}' does not match any service in the catalog")]
    UnknownOverride {
        /// Override key
        service: String,
    },

    /// Two jobs share an id
    #[error("Job id '{job}' is used more than once")]
    DuplicateJobId {
        /// Job id
        job: String,
    },
}

/// Every job fails the build when an error message is logged
#[must_use]
pub fn fails_on_error_message(project: &Project) -> bool {
    project.jobs().iter().all(job_fails_on_error_message)
}

/// Every job declares the Go test report feature exactly when `enabled`
#[must_use]
pub fn declares_test_runner_feature(project: &Project, enabled: bool) -> bool {
    project
        .jobs()
        .iter()
        .all(|job| job.has_go_test_report() == enabled)
}

/// Every job carries at least one schedule trigger, enabled or not
#[must_use]
pub fn has_schedule_trigger(project: &Project) -> bool {
    project.jobs().iter().all(job_has_schedule_trigger)
}

/// Every job wipes its checkout directory before building
#[must_use]
pub fn uses_clean_checkout(project: &Project) -> bool {
    project.jobs().iter().all(|job| job.vcs.clean_checkout)
}

/// Every override key names a service in the catalog
#[must_use]
pub fn overrides_match_services(settings: &Settings) -> bool {
    settings.unknown_override_keys().is_empty()
}

const fn job_fails_on_error_message(job: &BuildJobDescriptor) -> bool {
    job.failure_conditions.error_message
}

fn job_has_schedule_trigger(job: &BuildJobDescriptor) -> bool {
    job.schedule_triggers().next().is_some()
}

/// Validator for assembled projects
#[derive(Debug, Clone, Copy)]
pub struct ProjectValidator<'a> {
    project: &'a Project,
    settings: &'a Settings,
}

impl<'a> ProjectValidator<'a> {
    /// Create a validator for a project and the settings it was built from
    #[must_use]
    pub const fn new(project: &'a Project, settings: &'a Settings) -> Self {
        Self { project, settings }
    }

    /// Run every check.
    ///
    /// # Errors
    /// Returns one error per offending job or override key.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let feature_enabled = self.settings.defaults().test_runner_feature;
        let mut seen = HashSet::new();

        for job in self.project.jobs() {
            if !seen.insert(job.id.as_str()) {
                errors.push(ValidationError::DuplicateJobId {
                    job: job.id.clone(),
                });
            }

            if !job_fails_on_error_message(job) {
                errors.push(ValidationError::MissingErrorOnMessage {
                    job: job.id.clone(),
                });
            }

            if job.has_go_test_report() != feature_enabled {
                errors.push(ValidationError::MissingTestRunnerFeature {
                    job: job.id.clone(),
                    expected: feature_enabled,
                });
            }

            if !job_has_schedule_trigger(job) {
                errors.push(ValidationError::MissingScheduleTrigger {
                    job: job.id.clone(),
                });
            }

            if !job.vcs.clean_checkout {
                errors.push(ValidationError::DirtyCheckout {
                    job: job.id.clone(),
                });
            }
        }

        errors.extend(
            self.settings
                .unknown_override_keys()
                .into_iter()
                .map(|service| ValidationError::UnknownOverride {
                    service: service.to_string(),
                }),
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
