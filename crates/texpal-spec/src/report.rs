//! Reports written after a CLI operation.
//!
//! A report records which palette (by canonical hash) produced which files,
//! so a later run can confirm that a rebuild is byte-identical.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationWarning};

/// Report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Kind of artifact written by an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// A palette texture.
    Texture,
    /// The palette metadata sidecar.
    Metadata,
    /// A rewritten mesh document.
    Mesh,
    /// A rewritten palette document.
    Palette,
}

/// Result entry for a single output artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputResult {
    /// The kind of output.
    pub kind: OutputKind,
    /// Path where the artifact was written.
    pub path: PathBuf,
    /// Hex-encoded BLAKE3 hash of the file contents.
    pub hash: String,
}

impl OutputResult {
    /// Creates a new output entry.
    pub fn new(kind: OutputKind, path: impl Into<PathBuf>, hash: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            hash: hash.into(),
        }
    }
}

/// Error entry in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportError {
    /// Error code (e.g., "E010" or "PALETTE_001").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ReportError {
    /// Creates a new report error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }

    /// Converts a ValidationError to a ReportError.
    pub fn from_validation_error(err: &ValidationError) -> Self {
        Self {
            code: err.code.code().to_string(),
            message: err.message.clone(),
            path: err.path.clone(),
        }
    }
}

/// Warning entry in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWarning {
    /// Warning code (e.g., "W003").
    pub code: String,
    /// Human-readable warning message.
    pub message: String,
    /// JSON path to the relevant field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ReportWarning {
    /// Creates a new report warning.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }

    /// Converts a ValidationWarning to a ReportWarning.
    pub fn from_validation_warning(warn: &ValidationWarning) -> Self {
        Self {
            code: warn.code.code().to_string(),
            message: warn.message.clone(),
            path: warn.path.clone(),
        }
    }
}

/// Report for one operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version.
    pub report_version: u32,
    /// Operation name ("build", "assign", ...).
    pub operation: String,
    /// Canonical hash of the palette document.
    pub palette_hash: String,
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Errors that occurred.
    pub errors: Vec<ReportError>,
    /// Warnings that were generated.
    pub warnings: Vec<ReportWarning>,
    /// Artifacts written.
    pub outputs: Vec<OutputResult>,
    /// Total execution time in milliseconds.
    pub duration_ms: u64,
    /// Tool identifier and version.
    pub tool_version: String,
}

impl Report {
    /// Serializes to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Builder for creating reports.
pub struct ReportBuilder {
    operation: String,
    palette_hash: String,
    ok: bool,
    errors: Vec<ReportError>,
    warnings: Vec<ReportWarning>,
    outputs: Vec<OutputResult>,
    duration_ms: u64,
    tool_version: String,
}

impl ReportBuilder {
    /// Creates a new report builder.
    ///
    /// ```
    /// use texpal_spec::report::ReportBuilder;
    ///
    /// let report = ReportBuilder::new("build", "abc123", "texpal-cli v0.1.0")
    ///     .duration_ms(12)
    ///     .build();
    /// assert!(report.ok);
    /// ```
    pub fn new(
        operation: impl Into<String>,
        palette_hash: impl Into<String>,
        tool_version: impl Into<String>,
    ) -> Self {
        Self {
            operation: operation.into(),
            palette_hash: palette_hash.into(),
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            outputs: Vec::new(),
            duration_ms: 0,
            tool_version: tool_version.into(),
        }
    }

    /// Sets the ok status.
    pub fn ok(mut self, ok: bool) -> Self {
        self.ok = ok;
        self
    }

    /// Adds an error and marks the report failed.
    pub fn error(mut self, error: ReportError) -> Self {
        self.errors.push(error);
        self.ok = false;
        self
    }

    /// Adds validation errors and warnings.
    pub fn validation(mut self, errors: &[ValidationError], warnings: &[ValidationWarning]) -> Self {
        for err in errors {
            self = self.error(ReportError::from_validation_error(err));
        }
        self.warnings
            .extend(warnings.iter().map(ReportWarning::from_validation_warning));
        self
    }

    /// Adds a warning.
    pub fn warning(mut self, warning: ReportWarning) -> Self {
        self.warnings.push(warning);
        self
    }

    /// Adds an output artifact.
    pub fn output(mut self, output: OutputResult) -> Self {
        self.outputs.push(output);
        self
    }

    /// Sets the duration.
    pub fn duration_ms(mut self, ms: u64) -> Self {
        self.duration_ms = ms;
        self
    }

    /// Builds the final report.
    pub fn build(self) -> Report {
        Report {
            report_version: REPORT_VERSION,
            operation: self.operation,
            palette_hash: self.palette_hash,
            ok: self.ok,
            errors: self.errors,
            warnings: self.warnings,
            outputs: self.outputs,
            duration_ms: self.duration_ms,
            tool_version: self.tool_version,
        }
    }
}
