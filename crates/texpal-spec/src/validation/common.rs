//! Shared scalar checks used by palette and mesh validation.

use std::fmt;

/// Error type for a single failed scalar check.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonValidationError {
    /// Human-readable error message.
    pub message: String,
}

impl CommonValidationError {
    /// Creates a new validation error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CommonValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommonValidationError {}

fn check_finite(name: &str, value: f64) -> Result<(), CommonValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CommonValidationError::new(format!(
            "{} must be finite, got {}",
            name, value
        )))
    }
}

/// Validate that a value is in [0, 1].
///
/// ```
/// use texpal_spec::validation::common::validate_unit_interval;
///
/// assert!(validate_unit_interval("metallic", 0.5).is_ok());
/// assert!(validate_unit_interval("metallic", 1.5).is_err());
/// ```
pub fn validate_unit_interval(name: &str, value: f64) -> Result<(), CommonValidationError> {
    check_finite(name, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(CommonValidationError::new(format!(
            "{} must be in [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate that a value is positive (> 0).
///
/// ```
/// use texpal_spec::validation::common::validate_positive;
///
/// assert!(validate_positive("max_emission", 1.0).is_ok());
/// assert!(validate_positive("max_emission", 0.0).is_err());
/// ```
pub fn validate_positive(name: &str, value: f64) -> Result<(), CommonValidationError> {
    check_finite(name, value)?;
    if value <= 0.0 {
        return Err(CommonValidationError::new(format!(
            "{} must be positive, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate that a value is non-negative (>= 0).
pub fn validate_non_negative(name: &str, value: f64) -> Result<(), CommonValidationError> {
    check_finite(name, value)?;
    if value < 0.0 {
        return Err(CommonValidationError::new(format!(
            "{} must be non-negative, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate an integer count in [min, max].
pub fn validate_count(name: &str, value: u32, min: u32, max: u32) -> Result<(), CommonValidationError> {
    if value < min || value > max {
        return Err(CommonValidationError::new(format!(
            "{} must be in [{}, {}], got {}",
            name, min, max, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_interval_bounds() {
        assert!(validate_unit_interval("x", 0.0).is_ok());
        assert!(validate_unit_interval("x", 1.0).is_ok());
        assert!(validate_unit_interval("x", -0.01).is_err());
        assert!(validate_unit_interval("x", f64::NAN).is_err());
    }

    #[test]
    fn test_non_negative_allows_large() {
        assert!(validate_non_negative("strength", 1000.0).is_ok());
        assert!(validate_non_negative("strength", -1.0).is_err());
        assert!(validate_non_negative("strength", f64::INFINITY).is_err());
    }

    #[test]
    fn test_count_message() {
        let err = validate_count("num_rows", 0, 1, 64).unwrap_err();
        assert_eq!(err.message, "num_rows must be in [1, 64], got 0");
    }
}
