//! Error types for palette document validation and processing.

use thiserror::Error;

/// Error codes for palette and mesh document validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Grid errors (E001-E009)
    /// E001: Grid has zero rows or columns, or exceeds the supported size
    InvalidGridDimensions,
    /// E002: Cell size is zero or exceeds the supported size
    InvalidCellSize,
    /// E003: max_emission is not a positive finite number
    InvalidMaxEmission,
    /// E004: uv_margin is outside [0, 1)
    InvalidUvMargin,
    /// E005: Resulting texture would be too large
    TextureTooLarge,

    // Sub-material errors (E010-E019)
    /// E010: More sub-materials than grid cells
    CapacityExceeded,
    /// E011: Color component outside [0, 1]
    ColorOutOfRange,
    /// E012: Scalar parameter outside [0, 1]
    ParameterOutOfRange,
    /// E013: Emission strength negative or not finite
    InvalidEmissionStrength,

    // Mesh errors (E020-E029)
    /// E020: UV layer face count does not match mesh face count
    UvLayerFaceMismatch,
    /// E021: A face has no UV coordinates
    EmptyFaceUvs,
    /// E022: A face references a material slot the mesh does not declare
    MaterialSlotOutOfRange,
    /// E023: A UV coordinate is not finite
    NonFiniteUv,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidGridDimensions => "E001",
            ErrorCode::InvalidCellSize => "E002",
            ErrorCode::InvalidMaxEmission => "E003",
            ErrorCode::InvalidUvMargin => "E004",
            ErrorCode::TextureTooLarge => "E005",
            ErrorCode::CapacityExceeded => "E010",
            ErrorCode::ColorOutOfRange => "E011",
            ErrorCode::ParameterOutOfRange => "E012",
            ErrorCode::InvalidEmissionStrength => "E013",
            ErrorCode::UvLayerFaceMismatch => "E020",
            ErrorCode::EmptyFaceUvs => "E021",
            ErrorCode::MaterialSlotOutOfRange => "E022",
            ErrorCode::NonFiniteUv => "E023",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for palette and mesh document validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Palette declares no sub-materials
    EmptyPalette,
    /// W002: Two sub-materials share a name
    DuplicateSubMaterialName,
    /// W003: Emission strength exceeds max_emission and will be clamped
    EmissionClamped,
    /// W004: Mesh has no UV layer
    MissingUvLayer,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::EmptyPalette => "W001",
            WarningCode::DuplicateSubMaterialName => "W002",
            WarningCode::EmissionClamped => "W003",
            WarningCode::MissingUvLayer => "W004",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field (e.g., "sub_materials\[2\].metallic").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a JSON path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// JSON path to the problematic field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation warning with a JSON path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Top-level error type for document operations.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Document validation failed with one or more errors.
    #[error("document validation failed with {0} error(s)")]
    ValidationFailed(usize),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of document validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Creates a failed validation result.
    pub fn failure(errors: Vec<ValidationError>) -> Self {
        Self {
            ok: errors.is_empty(),
            errors,
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Merges another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.ok &= other.ok;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

/// Common trait for backend errors.
///
/// Each backend error type implements this trait so the CLI and reports can
/// surface a stable code and category regardless of which backend failed.
///
/// ```ignore
/// use texpal_spec::error::BackendError;
///
/// fn handle_error<E: BackendError>(err: E) {
///     eprintln!("[{}] {}", err.code(), err.message());
/// }
/// ```
pub trait BackendError: std::error::Error {
    /// Stable error code such as "PALETTE_001" or "UV_003".
    fn code(&self) -> &'static str;

    /// Human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Error category for grouping related errors ("palette", "uv").
    fn category(&self) -> &'static str;
}
