//! Machine-readable output for `--json` mode.
//!
//! Every command prints exactly one [`CommandOutput`] object to stdout.

use serde::Serialize;
use serde_json::Value;

use texpal_spec::{BackendError, ValidationError, ValidationWarning};

/// Error codes raised by the CLI itself rather than a library.
pub mod error_codes {
    /// A file could not be read, parsed or written.
    pub const INPUT_ERROR: &str = "CLI_001";
    /// The requested slot has no sub-material.
    pub const SLOT_OUT_OF_RANGE: &str = "CLI_002";
    /// The palette has no free cell.
    pub const PALETTE_FULL: &str = "CLI_003";
    /// Two outputs of one command would share a path.
    pub const DUPLICATE_OUTPUT: &str = "CLI_004";
}

/// Warning codes raised by the CLI itself.
pub mod warning_codes {
    /// An assignment found no selected faces.
    pub const NO_SELECTED_FACES: &str = "CLI_W001";
    /// A sub-material edit left faces in the cell of a removed sub-material.
    pub const ORPHANED_FACES: &str = "CLI_W002";
    /// Combine left a mesh unchanged.
    pub const SKIPPED_MESH: &str = "CLI_W003";
}

/// A single error in JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct JsonError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }

    pub fn from_validation(err: &ValidationError) -> Self {
        Self {
            code: err.code.code().to_string(),
            message: err.message.clone(),
            path: err.path.clone(),
        }
    }

    pub fn from_backend(err: &dyn BackendError) -> Self {
        Self::new(err.code(), err.message())
    }
}

/// A single warning in JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct JsonWarning {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonWarning {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }

    pub fn from_validation(warn: &ValidationWarning) -> Self {
        Self {
            code: warn.code.code().to_string(),
            message: warn.message.clone(),
            path: warn.path.clone(),
        }
    }
}

/// Top-level JSON document printed by a command.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutput {
    pub success: bool,
    pub command: String,
    pub errors: Vec<JsonError>,
    pub warnings: Vec<JsonWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

impl CommandOutput {
    pub fn success(command: &str, result: Value) -> Self {
        Self {
            success: true,
            command: command.to_string(),
            errors: Vec::new(),
            warnings: Vec::new(),
            result: Some(result),
        }
    }

    pub fn failure(command: &str, errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            command: command.to_string(),
            errors,
            warnings: Vec::new(),
            result: None,
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<JsonWarning>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Prints the document as pretty JSON on stdout.
    pub fn print(&self) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

/// Prints a failure document for an error that aborted a command.
pub fn print_failure(command: &str, err: &anyhow::Error) {
    let output = CommandOutput::failure(
        command,
        vec![JsonError::new(error_codes::INPUT_ERROR, format!("{:#}", err))],
    );
    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("failed to serialize error output: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use texpal_spec::ErrorCode;

    #[test]
    fn test_failure_shape() {
        let err = ValidationError::with_path(ErrorCode::CapacityExceeded, "full", "sub_materials");
        let output = CommandOutput::failure("build", vec![JsonError::from_validation(&err)]);
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["errors"][0]["code"], "E010");
        assert_eq!(value["errors"][0]["path"], "sub_materials");
        assert!(value.get("result").is_none());
    }

    #[test]
    fn test_success_carries_result() {
        let output = CommandOutput::success("inspect", serde_json::json!({ "capacity": 16 }));
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["result"]["capacity"], 16);
        assert_eq!(value["warnings"], serde_json::json!([]));
    }
}
