//! Project and build job descriptor types

use acctest_core::{Error, LocationConfiguration, SecretValue};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Provider whose acceptance tests the jobs run
pub const PROVIDER_NAME: &str = "azurerm";

/// Branch filter applied to scheduled triggers
pub const DEFAULT_BRANCH_FILTER: &str = "+:refs/heads/main";

/// Root project document
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Project {
    /// Project id (e.g. `AZURERM_PUBLIC`)
    pub id: String,

    /// Display name
    pub name: String,

    /// Environment the jobs test against
    pub environment: String,

    /// VCS root every job checks out
    pub vcs_root_id: String,

    jobs: Vec<BuildJobDescriptor>,
}

impl Project {
    /// Create an empty project for a provider and environment
    pub fn new(
        provider: &str,
        environment: impl Into<String>,
        vcs_root_id: impl Into<String>,
    ) -> Self {
        let environment = environment.into();
        Self {
            id: format!("{provider}_{environment}").to_uppercase(),
            name: format!("{provider} ({environment})"),
            environment,
            vcs_root_id: vcs_root_id.into(),
            jobs: Vec::new(),
        }
    }

    /// Append a job, keeping ids unique.
    ///
    /// # Errors
    /// Returns `Error::DuplicateJob` if a job with the same id exists.
    pub fn add_job(&mut self, job: BuildJobDescriptor) -> Result<(), Error> {
        if self.job(&job.id).is_some() {
            return Err(Error::DuplicateJob { id: job.id });
        }
        self.jobs.push(job);
        Ok(())
    }

    /// Jobs in insertion order
    #[must_use]
    pub fn jobs(&self) -> &[BuildJobDescriptor] {
        &self.jobs
    }

    /// Look up a job by id
    #[must_use]
    pub fn job(&self, id: &str) -> Option<&BuildJobDescriptor> {
        self.jobs.iter().find(|j| j.id == id)
    }

    /// Copy of the project with every secret value blanked out
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut project = self.clone();
        for job in &mut project.jobs {
            for parameter in &mut job.parameters {
                if parameter.is_secret() {
                    parameter.value = ParameterValue::Secret(SecretValue::default());
                }
            }
        }
        project
    }
}

/// What a job tests
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum JobKind {
    /// Scheduled tests of a single service package
    Service {
        /// Service key
        service: String,
    },
    /// On-demand tests of the services touched by a pull request
    PullRequest,
}

/// One CI build job
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BuildJobDescriptor {
    /// Unique id, upper-cased
    pub id: String,

    /// Display name
    pub name: String,

    /// Job kind
    pub kind: JobKind,

    /// Checkout settings
    pub vcs: VcsSettings,

    /// Steps in execution order
    pub steps: Vec<BuildStep>,

    /// Parameters in declaration order
    pub parameters: Vec<Parameter>,

    /// Conditions that fail the build
    pub failure_conditions: FailureConditions,

    /// Build features
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<BuildFeature>,

    /// Triggers
    pub triggers: Vec<Trigger>,

    /// Regions the job uses
    pub locations: LocationConfiguration,
}

impl BuildJobDescriptor {
    /// Look up a parameter by name
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Schedule triggers, enabled or not
    pub fn schedule_triggers(&self) -> impl Iterator<Item = &ScheduleTrigger> {
        self.triggers.iter().map(|t| match t {
            Trigger::Schedule(schedule) => schedule,
        })
    }

    /// Whether the Go test report feature is declared
    #[must_use]
    pub fn has_go_test_report(&self) -> bool {
        self.features
            .iter()
            .any(|f| matches!(f, BuildFeature::GoTestReport { .. }))
    }
}

/// VCS checkout settings
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VcsSettings {
    /// VCS root id
    pub root_id: String,

    /// Wipe the checkout directory before each build
    pub clean_checkout: bool,
}

/// A script step
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BuildStep {
    /// Step name
    pub name: String,

    /// Shell script content
    pub script: String,
}

/// Whether the CI server shows a parameter in its UI
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParameterDisplay {
    /// Shown and editable
    #[default]
    Normal,
    /// Not shown
    Hidden,
}

/// A parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterValue {
    /// Plain text
    Text(String),
    /// Password; never displayed by the CI server
    Secret(SecretValue),
}

impl ParameterValue {
    /// The raw value, exposing secrets
    #[must_use]
    pub fn expose(&self) -> &str {
        match self {
            Self::Text(value) => value,
            Self::Secret(secret) => secret.expose(),
        }
    }
}

impl Serialize for ParameterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.expose())
    }
}

/// A named build parameter
///
/// Whether it is a password follows from the value variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Name (`env.` prefix exports it as an environment variable)
    pub name: String,

    /// Value
    pub value: ParameterValue,

    /// Description shown next to the parameter
    pub description: Option<String>,

    /// UI display mode
    pub display: ParameterDisplay,
}

impl Serialize for Parameter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.description.is_some() { 5 } else { 4 };
        let mut state = serializer.serialize_struct("Parameter", len)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("value", &self.value)?;
        if let Some(description) = &self.description {
            state.serialize_field("description", description)?;
        }
        state.serialize_field("display", &self.display)?;
        state.serialize_field("secret", &self.is_secret())?;
        state.end()
    }
}

impl Parameter {
    /// Visible text parameter
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: ParameterValue::Text(value.into()),
            description: None,
            display: ParameterDisplay::Normal,
        }
    }

    /// Hidden text parameter
    pub fn hidden(
        name: impl Into<String>,
        value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: ParameterValue::Text(value.into()),
            description: Some(description.into()),
            display: ParameterDisplay::Hidden,
        }
    }

    /// Hidden password parameter
    pub fn secret(
        name: impl Into<String>,
        value: &SecretValue,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: ParameterValue::Secret(value.clone()),
            description: Some(description.into()),
            display: ParameterDisplay::Hidden,
        }
    }

    /// Whether this is a password parameter
    #[must_use]
    pub fn is_secret(&self) -> bool {
        matches!(self.value, ParameterValue::Secret(_))
    }
}

/// Conditions under which the CI server fails a build
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FailureConditions {
    /// Fail when the build log reports an error message
    pub error_message: bool,

    /// Execution limit in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_timeout_min: Option<u32>,
}

/// Test report format for Go test output
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TestFormat {
    /// `go test -json`
    #[default]
    Json,
}

/// Build features
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum BuildFeature {
    /// Parse Go test output into test results
    GoTestReport {
        /// Output format of the test binary
        test_format: TestFormat,
    },
}

/// Build triggers
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Trigger {
    /// Cron-style schedule
    Schedule(ScheduleTrigger),
}

/// Cron-style scheduled trigger
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScheduleTrigger {
    /// Whether the trigger fires
    pub enabled: bool,

    /// Branch filter
    pub branch_filter: String,

    /// Hour (0-23)
    pub hours: u8,

    /// Cron day-of-week field
    pub days_of_week: String,

    /// Cron day-of-month field
    pub days_of_month: String,

    /// Timezone the server evaluates the cron in
    pub timezone: String,

    /// Run even when there are no pending changes
    pub trigger_build_always: bool,

    /// Only run with pending changes
    pub with_pending_changes_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: &str) -> BuildJobDescriptor {
        BuildJobDescriptor {
            id: id.to_string(),
            name: id.to_string(),
            kind: JobKind::PullRequest,
            vcs: VcsSettings {
                root_id: "root".to_string(),
                clean_checkout: true,
            },
            steps: vec![],
            parameters: vec![
                Parameter::text("PARALLELISM", "20"),
                Parameter::secret("env.ARM_CLIENT_SECRET", &SecretValue::new("s3cr3t"), "secret"),
            ],
            failure_conditions: FailureConditions {
                error_message: true,
                execution_timeout_min: None,
            },
            features: vec![],
            triggers: vec![],
            locations: LocationConfiguration::default(),
        }
    }

    #[test]
    fn test_project_id() {
        let project = Project::new("azurerm", "public", "root");
        assert_eq!(project.id, "AZURERM_PUBLIC");
        assert!(project.jobs().is_empty());
    }

    #[test]
    fn test_duplicate_job_rejected() {
        let mut project = Project::new("azurerm", "public", "root");
        project.add_job(job("A")).unwrap();
        let err = project.add_job(job("A")).unwrap_err();
        assert!(matches!(err, Error::DuplicateJob { id } if id == "A"));
        assert_eq!(project.jobs().len(), 1);
    }

    #[test]
    fn test_secret_parameter_is_hidden() {
        let p = Parameter::secret("env.ARM_CLIENT_ID", &SecretValue::new("id"), "client");
        assert!(p.is_secret());
        assert_eq!(p.display, ParameterDisplay::Hidden);
        assert!(!format!("{p:?}").contains("\"id\""));
    }

    #[test]
    fn test_redacted_blanks_only_secrets() {
        let mut project = Project::new("azurerm", "public", "root");
        project.add_job(job("A")).unwrap();
        let redacted = project.redacted();
        let job = redacted.job("A").unwrap();
        assert_eq!(job.parameter("env.ARM_CLIENT_SECRET").unwrap().value.expose(), "");
        assert_eq!(job.parameter("PARALLELISM").unwrap().value.expose(), "20");
        // original untouched
        let original = project.job("A").unwrap();
        assert_eq!(
            original.parameter("env.ARM_CLIENT_SECRET").unwrap().value.expose(),
            "s3cr3t"
        );
    }

    #[test]
    fn test_serialization_shape() {
        let json = serde_json::to_value(job("A")).unwrap();
        assert_eq!(json["kind"]["type"], "pull_request");
        assert_eq!(json["parameters"][1]["secret"], true);
        assert_eq!(json["parameters"][1]["display"], "hidden");
        assert_eq!(json["failure_conditions"]["error_message"], true);
        assert_eq!(json["parameters"][0]["secret"], false);
        assert!(json["parameters"][0].get("description").is_none());
    }

    #[test]
    fn test_secrecy_follows_value() {
        let mut p = Parameter::text("env.ARM_CLIENT_ID", "id");
        assert!(!p.is_secret());
        p.value = ParameterValue::Secret(SecretValue::new("id"));
        assert!(p.is_secret());

        let mut redacted = Project::new("azurerm", "public", "root");
        let mut job = job("A");
        job.parameters.push(p);
        redacted.add_job(job).unwrap();
        let redacted = redacted.redacted();
        let p = redacted.job("A").unwrap().parameter("env.ARM_CLIENT_ID").unwrap();
        assert!(p.is_secret());
        assert_eq!(p.value.expose(), "");
    }
}
