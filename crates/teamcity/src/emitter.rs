//! TeamCity Project Emitter
//!
//! Transforms an assembled project into a TeamCity project document.

use crate::schema::{
    BuildType, CronPolicy, Document, FailureConditions, Feature, Locations, Param, ParamDisplay,
    ParamKind, ParamSpec, Project as TeamCityProject, ScheduleTrigger, ScriptStep, Vcs,
};
use acctest_ci::emitter::{Emitter, EmitterError, EmitterResult};
use acctest_ci::ir::{
    BuildFeature, BuildJobDescriptor, Parameter, ParameterDisplay, Project, TestFormat, Trigger,
};

/// Longest external id TeamCity accepts
const MAX_ID_LENGTH: usize = 225;

/// TeamCity project emitter
///
/// # Project to TeamCity Mapping
///
/// | Project Field | TeamCity YAML |
/// |---------------|---------------|
/// | `job.id` | `buildTypes[].id` |
/// | `job.vcs` | `vcs: { root, cleanCheckout }` |
/// | `job.steps` | `steps[]` (script runner) |
/// | `job.parameters` | `params[]` (`password` spec for secrets) |
/// | `job.failure_conditions` | `failureConditions` |
/// | `job.features` | `features[]` (`golang`) |
/// | `job.triggers` | `triggers[]` (`schedule` with a cron policy) |
/// | `job.locations` | `locations: { primary, secondary, tertiary, rotate }` |
#[derive(Debug, Clone, Default)]
pub struct TeamCityEmitter {
    /// Blank out secret values
    pub redact_secrets: bool,
}

impl TeamCityEmitter {
    /// Create a new TeamCity emitter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank out secret parameter values in the output
    #[must_use]
    pub const fn with_redacted_secrets(mut self, redact: bool) -> Self {
        self.redact_secrets = redact;
        self
    }

    /// Convert the project to a TeamCity document
    #[must_use]
    pub fn build_document(&self, project: &Project) -> Document {
        let build_types = project
            .jobs()
            .iter()
            .map(|job| self.build_type(job))
            .collect();

        Document {
            project: TeamCityProject {
                id: project.id.clone(),
                name: project.name.clone(),
                build_types,
            },
        }
    }

    fn build_type(&self, job: &BuildJobDescriptor) -> BuildType {
        BuildType {
            id: job.id.clone(),
            name: job.name.clone(),
            vcs: Vcs {
                root: job.vcs.root_id.clone(),
                clean_checkout: job.vcs.clean_checkout,
            },
            steps: job
                .steps
                .iter()
                .map(|step| ScriptStep::new(step.name.clone(), step.script.clone()))
                .collect(),
            params: job.parameters.iter().map(|p| self.param(p)).collect(),
            failure_conditions: FailureConditions {
                error_message: job.failure_conditions.error_message,
                execution_timeout_min: job.failure_conditions.execution_timeout_min,
            },
            features: job.features.iter().map(feature).collect(),
            triggers: job.triggers.iter().map(trigger).collect(),
            locations: Locations {
                primary: job.locations.primary.clone(),
                secondary: job.locations.secondary.clone(),
                tertiary: job.locations.tertiary.clone(),
                rotate: job.locations.rotate,
            },
        }
    }

    fn param(&self, parameter: &Parameter) -> Param {
        let value = if parameter.is_secret() && self.redact_secrets {
            String::new()
        } else {
            parameter.value.expose().to_string()
        };

        let display = match parameter.display {
            ParameterDisplay::Normal => ParamDisplay::Normal,
            ParameterDisplay::Hidden => ParamDisplay::Hidden,
        };

        let spec = if parameter.is_secret() {
            Some(ParamSpec {
                kind: ParamKind::Password,
                display: ParamDisplay::Hidden,
                description: parameter.description.clone(),
            })
        } else if display == ParamDisplay::Hidden || parameter.description.is_some() {
            Some(ParamSpec {
                kind: ParamKind::Text,
                display,
                description: parameter.description.clone(),
            })
        } else {
            None
        };

        Param {
            name: parameter.name.clone(),
            value,
            spec,
        }
    }
}

fn feature(feature: &BuildFeature) -> Feature {
    match feature {
        BuildFeature::GoTestReport { test_format } => Feature::Golang {
            test_format: match test_format {
                TestFormat::Json => "json".to_string(),
            },
        },
    }
}

fn trigger(trigger: &Trigger) -> ScheduleTrigger {
    let Trigger::Schedule(schedule) = trigger;
    ScheduleTrigger {
        trigger_type: "schedule",
        enabled: schedule.enabled,
        branch_filter: schedule.branch_filter.clone(),
        scheduling_policy: CronPolicy {
            policy_type: "cron",
            seconds: "0".to_string(),
            minutes: "0".to_string(),
            hours: schedule.hours.to_string(),
            day_of_month: schedule.days_of_month.clone(),
            month: "*".to_string(),
            day_of_week: schedule.days_of_week.clone(),
            timezone: schedule.timezone.clone(),
        },
        trigger_build: if schedule.trigger_build_always {
            "always"
        } else {
            "onWatchedChanges"
        },
        with_pending_changes_only: schedule.with_pending_changes_only,
    }
}

fn is_valid_external_id(id: &str) -> bool {
    let mut chars = id.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && id.len() <= MAX_ID_LENGTH
}

impl Emitter for TeamCityEmitter {
    fn emit(&self, project: &Project) -> EmitterResult<String> {
        let document = self.build_document(project);
        tracing::debug!(
            project = %document.project.id,
            build_types = document.project.build_types.len(),
            redacted = self.redact_secrets,
            "Emitting TeamCity project"
        );
        serde_yaml::to_string(&document).map_err(|e| EmitterError::Serialization(e.to_string()))
    }

    fn format_name(&self) -> &'static str {
        "teamcity"
    }

    fn file_extension(&self) -> &'static str {
        "yml"
    }

    fn description(&self) -> &'static str {
        "TeamCity project YAML emitter"
    }

    fn validate(&self, project: &Project) -> EmitterResult<()> {
        if !is_valid_external_id(&project.id) {
            return Err(EmitterError::InvalidProject(format!(
                "Project ID '{}' is not a valid TeamCity external id",
                project.id
            )));
        }

        for job in project.jobs() {
            if !is_valid_external_id(&job.id) {
                return Err(EmitterError::InvalidProject(format!(
                    "Job ID '{}' is not a valid TeamCity external id",
                    job.id
                )));
            }
        }

        Ok(())
    }
}
