//! TeamCity Project Schema Types
//!
//! Data structures for the TeamCity project document. Field names follow the
//! TeamCity settings DSL in camelCase.

use serde::Serialize;

/// Top-level document
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// The project
    pub project: Project,
}

/// A TeamCity project
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// External id
    pub id: String,

    /// Display name
    pub name: String,

    /// Build configurations
    pub build_types: Vec<BuildType>,
}

/// A TeamCity build configuration
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildType {
    /// External id
    pub id: String,

    /// Display name
    pub name: String,

    /// VCS settings
    pub vcs: Vcs,

    /// Build steps
    pub steps: Vec<ScriptStep>,

    /// Parameters
    pub params: Vec<Param>,

    /// Failure conditions
    pub failure_conditions: FailureConditions,

    /// Build features
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<Feature>,

    /// Triggers
    pub triggers: Vec<ScheduleTrigger>,

    /// Test regions
    pub locations: Locations,
}

/// Regions a build configuration tests in
///
/// With `rotate` set the server round-robins primary, secondary and tertiary
/// between runs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Locations {
    /// Primary region
    pub primary: String,

    /// Secondary region
    pub secondary: String,

    /// Tertiary region
    pub tertiary: String,

    /// Round-robin the regions
    pub rotate: bool,
}

/// VCS root attachment
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vcs {
    /// VCS root id
    pub root: String,

    /// Remove all files before each build
    pub clean_checkout: bool,
}

/// Script runner step
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptStep {
    /// Runner type, always `script`
    #[serde(rename = "type")]
    pub step_type: &'static str,

    /// Step name
    pub name: String,

    /// Script body
    pub script_content: String,
}

impl ScriptStep {
    /// Create a script step
    pub fn new(name: impl Into<String>, script_content: impl Into<String>) -> Self {
        Self {
            step_type: "script",
            name: name.into(),
            script_content: script_content.into(),
        }
    }
}

/// A build parameter
#[derive(Debug, Clone, Serialize)]
pub struct Param {
    /// Name
    pub name: String,

    /// Value
    pub value: String,

    /// Typed parameter specification; plain text when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<ParamSpec>,
}

/// Typed parameter specification
#[derive(Debug, Clone, Serialize)]
pub struct ParamSpec {
    /// Control type
    #[serde(rename = "type")]
    pub kind: ParamKind,

    /// UI display mode
    pub display: ParamDisplay,

    /// Description shown in the UI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Parameter control type
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// Free text
    Text,
    /// Masked value, never shown in logs or the UI
    Password,
}

/// Parameter display mode
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParamDisplay {
    /// Shown in the run dialog
    Normal,
    /// Not shown
    Hidden,
}

/// Build failure conditions
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureConditions {
    /// Fail on an error message from the build runner
    pub error_message: bool,

    /// Execution timeout in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_timeout_min: Option<u32>,
}

/// Build feature
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Feature {
    /// Golang test reporting
    Golang {
        /// Test output format
        #[serde(rename = "testFormat")]
        test_format: String,
    },
}

/// Schedule trigger
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleTrigger {
    /// Trigger type, always `schedule`
    #[serde(rename = "type")]
    pub trigger_type: &'static str,

    /// Whether the trigger is enabled
    pub enabled: bool,

    /// Branch filter
    pub branch_filter: String,

    /// Scheduling policy
    pub scheduling_policy: CronPolicy,

    /// `always` to build without pending changes
    pub trigger_build: &'static str,

    /// Only trigger with pending changes
    pub with_pending_changes_only: bool,
}

/// Cron scheduling policy
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CronPolicy {
    /// Policy type, always `cron`
    #[serde(rename = "type")]
    pub policy_type: &'static str,

    /// Seconds field
    pub seconds: String,

    /// Minutes field
    pub minutes: String,

    /// Hours field
    pub hours: String,

    /// Day-of-month field
    pub day_of_month: String,

    /// Month field
    pub month: String,

    /// Day-of-week field
    pub day_of_week: String,

    /// Timezone the cron is evaluated in
    pub timezone: String,
}
