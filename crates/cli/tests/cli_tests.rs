//! End-to-end tests for the acctest binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

const ENV_VARS: [&str; 15] = [
    "ACCTEST_ENVIRONMENT",
    "ACCTEST_SETTINGS",
    "ACCTEST_VCS_ROOT_ID",
    "ACCTEST_ENABLE_TRIGGERS",
    "ARM_CLIENT_ID",
    "ARM_CLIENT_SECRET",
    "ARM_SUBSCRIPTION_ID",
    "ARM_TENANT_ID",
    "ARM_CLIENT_ID_ALT",
    "ARM_CLIENT_SECRET_ALT",
    "ARM_SUBSCRIPTION_ID_ALT",
    "ARM_SUBSCRIPTION_ID_DEVTEST",
    "ARM_TENANT_ID_ALT",
    "ARM_SUBSCRIPTION_ID_ALT_TENANT",
    "ARM_PRINCIPAL_ID_ALT_TENANT",
];

/// The binary with a clean environment
fn acctest() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("acctest").unwrap();
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.env_remove("RUST_LOG");
    cmd
}

const SETTINGS: &str = r#"
[defaults]
parallelism = 10

[[services]]
key = "network"
display_name = "Network"

[[services]]
key = "web"
display_name = "Web"

[locations.public]
primary = "westeurope"
secondary = "eastus2"
tertiary = "westus2"
rotate = true

[nightly]
public = true

[overrides.network]
use_alt_subscription = true
"#;

#[test]
fn test_generate_teamcity_from_builtin_tables() {
    acctest()
        .arg("generate")
        .env("ARM_CLIENT_SECRET", "hunter2")
        .env("ACCTEST_VCS_ROOT_ID", "AzureRM_Root")
        .assert()
        .success()
        .stdout(predicate::str::contains("buildTypes:"))
        .stdout(predicate::str::contains("id: AZURERM_PR_PUBLIC"))
        .stdout(predicate::str::contains("AZURERM_SERVICE_PUBLIC_CONTAINERS"))
        .stdout(predicate::str::contains("root: AzureRM_Root"))
        .stdout(predicate::str::contains("rotate: true"))
        .stdout(predicate::str::contains("hunter2"));
}

#[test]
fn test_generate_redacted_json() {
    acctest()
        .args(["generate", "--format", "json", "--redact"])
        .env("ARM_CLIENT_SECRET", "hunter2")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\": \"AZURERM_PUBLIC\""))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn test_generate_from_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("settings.toml");
    let output = dir.path().join("project.yml");
    fs::write(&settings, SETTINGS).unwrap();

    acctest()
        .arg("generate")
        .arg("--output")
        .arg(&output)
        .env("ACCTEST_SETTINGS", &settings)
        .env("ARM_SUBSCRIPTION_ID", "primary")
        .env("ARM_SUBSCRIPTION_ID_ALT", "alt")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let yaml = fs::read_to_string(&output).unwrap();
    assert!(yaml.contains("AZURERM_SERVICE_PUBLIC_NETWORK"));
    assert!(yaml.contains("AZURERM_SERVICE_PUBLIC_WEB"));
    assert!(!yaml.contains("AZURERM_SERVICE_PUBLIC_CONTAINERS"));
}

#[test]
fn test_unknown_environment_fails() {
    acctest()
        .args(["generate", "--environment", "mars"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("mars"));
}

#[test]
fn test_validate_builtin_tables() {
    acctest()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("AZURERM_PUBLIC"))
        .stdout(predicate::str::contains("all checks passed"));
}

#[test]
fn test_validate_reports_stray_override() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("settings.toml");
    fs::write(
        &settings,
        format!("{SETTINGS}\n[overrides.netwrok]\nparallelism = 2\n"),
    )
    .unwrap();

    acctest()
        .arg("validate")
        .arg("--settings")
        .arg(&settings)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("netwrok"));
}

#[test]
fn test_duplicate_override_table_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("settings.toml");
    fs::write(
        &settings,
        format!("{SETTINGS}\n[overrides.network]\nparallelism = 2\n"),
    )
    .unwrap();

    acctest()
        .arg("validate")
        .env("ACCTEST_SETTINGS", &settings)
        .assert()
        .code(2);
}

#[test]
fn test_resolve_containers() {
    acctest()
        .args(["resolve", "containers"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"parallelism\": 5"))
        .stdout(predicate::str::contains("\"timeout\": 18"))
        .stdout(predicate::str::contains("eastus"));
}

#[test]
fn test_resolve_unknown_service() {
    acctest()
        .args(["resolve", "nope"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn test_services_lists_catalog() {
    acctest()
        .arg("services")
        .assert()
        .success()
        .stdout(predicate::str::contains("authorization\t"))
        .stdout(predicate::str::contains("containers\tContainer Services"));
}
