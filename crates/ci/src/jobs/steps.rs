//! Script steps

use crate::ir::BuildStep;

/// Installs the Go version pinned by the repository and downloads the
/// Terraform Core binary the tests drive.
#[must_use]
pub fn configure_go_env() -> BuildStep {
    BuildStep {
        name: "Configure Go Version".to_string(),
        script: [
            "goenv install -s $(goenv local) && goenv rehash",
            "mkdir -p %system.teamcity.build.tempDir%/terraform",
            "wget --quiet -O terraform.zip https://releases.hashicorp.com/terraform/%env.TF_ACC_TERRAFORM_VERSION%/terraform_%env.TF_ACC_TERRAFORM_VERSION%_linux_amd64.zip",
            "unzip -o terraform.zip -d %system.teamcity.build.tempDir%/terraform",
            "echo \"##teamcity[setParameter name='env.TF_ACC_TERRAFORM_PATH' value='%system.teamcity.build.tempDir%/terraform/terraform']\"",
        ]
        .join("\n"),
    }
}

/// Runs the acceptance tests of a single package
#[must_use]
pub fn run_acceptance_tests(package_path: &str) -> BuildStep {
    BuildStep {
        name: "Run Tests".to_string(),
        script: format!(
            "go test -v \"{package_path}\" -run=\"%TEST_PREFIX%\" -timeout=\"%TIMEOUT%h\" -test.parallel=\"%PARALLELISM%\" -json"
        ),
    }
}

/// Runs the acceptance tests of every package listed in `%SERVICES%`
#[must_use]
pub fn run_acceptance_tests_for_pull_request() -> BuildStep {
    BuildStep {
        name: "Run Tests".to_string(),
        script: [
            "for service in %SERVICES%; do",
            "  go test -v \"./internal/services/$service\" -run=\"%TEST_PREFIX%\" -timeout=\"%TIMEOUT%h\" -test.parallel=\"%PARALLELISM%\" -json",
            "done",
        ]
        .join("\n"),
    }
}
