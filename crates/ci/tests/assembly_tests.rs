//! Integration tests for project assembly over the built-in tables.
//!
//! These tests verify the contracts the CI server relies on:
//! - Uniqueness: no two jobs share an id
//! - Determinism: assembling twice gives identical projects
//! - Structure: every job passes the validation checks

use acctest_ci::ProjectAssembler;
use acctest_ci::emitter::{EmitterRegistryBuilder, JsonEmitter};
use acctest_ci::ir::{
    ProjectValidator, Trigger, declares_test_runner_feature, fails_on_error_message,
    has_schedule_trigger, overrides_match_services, uses_clean_checkout,
};
use acctest_core::{
    ClientConfiguration, LocationConfiguration, ServiceCatalog, ServiceEntry, Settings,
};
use proptest::prelude::*;
use std::collections::HashSet;

fn credentials() -> ClientConfiguration {
    ClientConfiguration {
        client_id: "client".into(),
        client_secret: "secret".into(),
        subscription_id: "primary".into(),
        subscription_id_alt: "alt".into(),
        subscription_id_dev_test: "devtest".into(),
        tenant_id: "tenant".into(),
        vcs_root_id: "AzureRM_Root".to_string(),
        enable_test_triggers_globally: true,
        ..Default::default()
    }
}

// =============================================================================
// Built-in tables
// =============================================================================

#[test]
fn test_every_environment_assembles_and_validates() {
    let settings = Settings::builtin().unwrap();
    assert!(overrides_match_services(&settings));

    for environment in settings.environments() {
        let project = ProjectAssembler::new(&settings)
            .assemble(environment, &credentials())
            .unwrap();

        assert_eq!(project.jobs().len(), settings.services().len() + 1);
        assert!(fails_on_error_message(&project), "{environment}");
        assert!(declares_test_runner_feature(&project, true), "{environment}");
        assert!(has_schedule_trigger(&project), "{environment}");
        assert!(uses_clean_checkout(&project), "{environment}");
        assert!(
            ProjectValidator::new(&project, &settings).validate().is_ok(),
            "{environment}"
        );
    }
}

#[test]
fn test_pull_request_job_comes_first() {
    let settings = Settings::builtin().unwrap();
    let project = ProjectAssembler::new(&settings)
        .assemble("public", &credentials())
        .unwrap();

    let first = &project.jobs()[0];
    assert_eq!(first.id, "AZURERM_PR_PUBLIC");
    assert_eq!(first.name, "! Run Pull Request");
}

#[test]
fn test_network_runs_on_alternate_subscription() {
    let settings = Settings::builtin().unwrap();
    let project = ProjectAssembler::new(&settings)
        .assemble("public", &credentials())
        .unwrap();

    let network = project.job("AZURERM_SERVICE_PUBLIC_NETWORK").unwrap();
    let value = |name: &str| network.parameter(name).unwrap().value.expose();
    assert_eq!(value("env.ARM_SUBSCRIPTION_ID"), "alt");
    assert_eq!(value("env.ARM_SUBSCRIPTION_ID_ALT"), "primary");
    assert_eq!(value("PARALLELISM"), "5");
}

#[test]
fn test_containers_uses_its_own_locations() {
    let settings = Settings::builtin().unwrap();
    let project = ProjectAssembler::new(&settings)
        .assemble("public", &credentials())
        .unwrap();

    let containers = project.job("AZURERM_SERVICE_PUBLIC_CONTAINERS").unwrap();
    assert_eq!(
        containers
            .parameter("env.ARM_TEST_LOCATION")
            .unwrap()
            .value
            .expose(),
        "eastus"
    );
    assert_eq!(containers.failure_conditions.execution_timeout_min, Some(18 * 60));
}

#[test]
fn test_only_nightly_environments_schedule_jobs() {
    let settings = Settings::builtin().unwrap();

    for environment in settings.environments() {
        let project = ProjectAssembler::new(&settings)
            .assemble(environment, &credentials())
            .unwrap();
        let enabled = project
            .jobs()
            .iter()
            .flat_map(|job| &job.triggers)
            .filter(|trigger| {
                let Trigger::Schedule(schedule) = trigger;
                schedule.enabled
            })
            .count();

        if settings.runs_nightly(environment) {
            assert_eq!(enabled, settings.services().len(), "{environment}");
        } else {
            assert_eq!(enabled, 0, "{environment}");
        }
    }
}

#[test]
fn test_missing_credentials_pass_through_empty() {
    let settings = Settings::builtin().unwrap();
    let project = ProjectAssembler::new(&settings)
        .assemble("public", &ClientConfiguration::default())
        .unwrap();

    let job = project.job("AZURERM_SERVICE_PUBLIC_WEB").unwrap();
    assert_eq!(job.parameter("env.ARM_CLIENT_ID").unwrap().value.expose(), "");
    assert_eq!(job.vcs.root_id, "");
}

#[test]
fn test_registry_emits_json() {
    let settings = Settings::builtin().unwrap();
    let project = ProjectAssembler::new(&settings)
        .assemble("public", &credentials())
        .unwrap();
    let registry = EmitterRegistryBuilder::new()
        .with_emitter(JsonEmitter::new().with_redacted_secrets(true))
        .build();

    let output = registry.emit("json", &project).unwrap();
    assert!(output.contains("AZURERM_SERVICE_PUBLIC_NETWORK"));
    assert!(!output.contains("\"value\": \"secret\""));
}

// =============================================================================
// Property tests
// =============================================================================

fn catalog_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-z][a-z0-9]{0,12}", 1..30)
        .prop_map(|keys| keys.into_iter().collect())
}

fn settings_for(keys: &[String]) -> Settings {
    Settings::builder()
        .services(
            ServiceCatalog::new(keys.iter().map(|k| ServiceEntry::new(k.clone(), k.clone())))
                .unwrap(),
        )
        .location(
            "public",
            LocationConfiguration::new("westeurope", "eastus2", "westus2", true),
        )
        .nightly("public", true)
        .build()
        .unwrap()
}

proptest! {
    /// Contract: every job id in a project is unique
    #[test]
    fn prop_job_ids_are_unique(keys in catalog_strategy()) {
        let settings = settings_for(&keys);
        let project = ProjectAssembler::new(&settings)
            .assemble("public", &credentials())
            .unwrap();

        let ids: HashSet<_> = project.jobs().iter().map(|j| j.id.as_str()).collect();
        prop_assert_eq!(ids.len(), project.jobs().len());
        prop_assert_eq!(ids.len(), keys.len() + 1);
    }

    /// Contract: identical inputs give identical projects
    #[test]
    fn prop_assembly_is_idempotent(keys in catalog_strategy()) {
        let settings = settings_for(&keys);
        let assembler = ProjectAssembler::new(&settings);
        let first = assembler.assemble("public", &credentials()).unwrap();
        let second = assembler.assemble("public", &credentials()).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Contract: job order follows catalog order after the pull request job
    #[test]
    fn prop_jobs_follow_catalog_order(keys in catalog_strategy()) {
        let settings = settings_for(&keys);
        let project = ProjectAssembler::new(&settings)
            .assemble("public", &credentials())
            .unwrap();

        for (job, key) in project.jobs().iter().skip(1).zip(&keys) {
            let expected = format!("AZURERM_SERVICE_PUBLIC_{}", key.to_uppercase());
            prop_assert_eq!(&job.id, &expected);
        }
    }
}
