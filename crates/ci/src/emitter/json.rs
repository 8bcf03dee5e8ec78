//! JSON emitter
//!
//! Serializes the project as-is. Useful for diffing generated jobs and for
//! tooling that consumes the job list directly.

use super::{Emitter, EmitterError, EmitterResult};
use crate::ir::Project;

/// Emits the project as pretty-printed JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEmitter {
    redact_secrets: bool,
}

impl JsonEmitter {
    /// Create an emitter that writes secret values verbatim
    #[must_use]
    pub const fn new() -> Self {
        Self {
            redact_secrets: false,
        }
    }

    /// Blank out secret parameter values in the output
    #[must_use]
    pub const fn with_redacted_secrets(mut self, redact: bool) -> Self {
        self.redact_secrets = redact;
        self
    }
}

impl Emitter for JsonEmitter {
    fn emit(&self, project: &Project) -> EmitterResult<String> {
        let output = if self.redact_secrets {
            serde_json::to_string_pretty(&project.redacted())
        } else {
            serde_json::to_string_pretty(project)
        };
        output.map_err(|e| EmitterError::Serialization(e.to_string()))
    }

    fn format_name(&self) -> &'static str {
        "json"
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }

    fn description(&self) -> &'static str {
        "Build job descriptors as JSON"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::ProjectAssembler;
    use acctest_core::{
        ClientConfiguration, LocationConfiguration, ServiceCatalog, ServiceEntry, Settings,
    };

    fn project() -> Project {
        let settings = Settings::builder()
            .services(ServiceCatalog::new([ServiceEntry::new("web", "Web")]).unwrap())
            .location(
                "public",
                LocationConfiguration::new("westeurope", "eastus2", "westus2", true),
            )
            .build()
            .unwrap();
        let credentials = ClientConfiguration {
            client_secret: "hunter2".into(),
            ..Default::default()
        };
        ProjectAssembler::new(&settings)
            .assemble("public", &credentials)
            .unwrap()
    }

    #[test]
    fn test_emits_jobs() {
        let json = JsonEmitter::new().emit(&project()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["id"], "AZURERM_PUBLIC");
        assert_eq!(value["jobs"][0]["id"], "AZURERM_PR_PUBLIC");
        assert_eq!(value["jobs"][1]["id"], "AZURERM_SERVICE_PUBLIC_WEB");
        assert!(json.contains("hunter2"));
    }

    #[test]
    fn test_redacted_output() {
        let json = JsonEmitter::new()
            .with_redacted_secrets(true)
            .emit(&project())
            .unwrap();

        assert!(!json.contains("hunter2"));
        assert!(json.contains("env.ARM_CLIENT_SECRET"));
    }

    #[test]
    fn test_format_metadata() {
        let emitter = JsonEmitter::default();
        assert_eq!(emitter.format_name(), "json");
        assert_eq!(emitter.file_extension(), "json");
    }
}
