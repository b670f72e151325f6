//! # Error Types
//!
//! Domain-specific error types for camp-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  camp-core errors (this file)                                          │
//! │  ├── ValidationError   - One violated field rule                       │
//! │  ├── ValidationErrors  - Every violation found in one validation pass  │
//! │  └── CoreError         - Domain errors (not found, validation)         │
//! │                                                                         │
//! │  camp-db errors (separate crate)                                       │
//! │  └── DbError           - Database operation failures                   │
//! │                                                                         │
//! │  camp-api errors (in app)                                              │
//! │  └── ApiError          - What HTTP clients see                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `Display` text of each [`ValidationError`] is the exact message sent to
//! clients, so the wording here is part of the wire contract.

use std::fmt;

use thiserror::Error;

use crate::types::Resource;

// =============================================================================
// Core Error
// =============================================================================

/// Domain errors surfaced to the request layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A lookup by id found no row.
    #[error("{0} was not found.")]
    NotFound(Resource),

    /// The candidate entity broke one or more field rules.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single field rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Camper name missing, not a string, or empty.
    #[error("Camper must have a name.")]
    CamperNameRequired,

    /// Camper age is not a JSON integer.
    #[error("Age must be an integer.")]
    AgeNotInteger,

    /// Camper age is outside [8, 18].
    #[error("Age must be between 8 and 18.")]
    AgeOutOfRange,

    /// Signup time is not a JSON integer.
    #[error("Time must be an integer.")]
    TimeNotInteger,

    /// Signup time is outside [0, 23].
    #[error("Time must be between 0 and 23.")]
    TimeOutOfRange,

    /// Signup references a camper id with no row behind it.
    #[error("Camper was not found.")]
    CamperNotFound,

    /// Signup references an activity id with no row behind it.
    #[error("Activity was not found.")]
    ActivityNotFound,

    /// Patch names a field outside the allow-list.
    #[error("Unknown field: {0}.")]
    UnknownField(String),
}

// =============================================================================
// Validation Errors
// =============================================================================

/// All violations collected during one validation pass, in rule order.
///
/// Never empty when returned as an `Err`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates an empty collection.
    pub fn new() -> Self {
        ValidationErrors::default()
    }

    /// Records one violation.
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Returns true when no rule was violated.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of violations recorded.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The violations, in the order they were found.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Client-facing messages, one per violation.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Returns `Ok(value)` when nothing was recorded, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        ValidationErrors {
            errors: vec![error],
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join(" "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_match_wire_contract() {
        assert_eq!(
            ValidationError::CamperNameRequired.to_string(),
            "Camper must have a name."
        );
        assert_eq!(
            ValidationError::AgeOutOfRange.to_string(),
            "Age must be between 8 and 18."
        );
        assert_eq!(
            ValidationError::TimeOutOfRange.to_string(),
            "Time must be between 0 and 23."
        );
        assert_eq!(
            ValidationError::UnknownField("id".to_string()).to_string(),
            "Unknown field: id."
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = CoreError::NotFound(Resource::Activity);
        assert_eq!(err.to_string(), "Activity was not found.");
    }

    #[test]
    fn test_collection_keeps_order() {
        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::ActivityNotFound);
        errors.push(ValidationError::TimeNotInteger);

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.messages(),
            vec!["Activity was not found.", "Time must be an integer."]
        );
        assert_eq!(
            errors.to_string(),
            "Activity was not found. Time must be an integer."
        );
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ValidationErrors::new().into_result(|| 7), Ok(7));

        let errors = ValidationErrors::from(ValidationError::AgeNotInteger);
        assert!(errors.into_result(|| 7).is_err());
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationErrors::from(ValidationError::AgeNotInteger).into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
