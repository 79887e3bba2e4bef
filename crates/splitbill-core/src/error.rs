//! # Error Types
//!
//! Domain-specific error types for splitbill-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  splitbill-core errors (this file)                                     │
//! │  ├── CoreError        - Ledger lookups against stale/unknown ids       │
//! │  └── ValidationError  - Form input that never becomes an entity        │
//! │                                                                         │
//! │  Flow: form input ──► ValidationError (rejected at the boundary)       │
//! │        ledger op   ──► CoreError      (unknown id on edit/delete)      │
//! │                                                                         │
//! │  The tax accumulator and the allocation engine raise NOTHING: their    │
//! │  preconditions (finite, non-negative numbers; live person ids) are     │
//! │  enforced before entities reach them.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (the offending id or field)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Ledger operation errors.
///
/// These occur when an edit/delete/toggle targets an id that is not in the
/// ledger. They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Person cannot be found.
    ///
    /// ## When This Occurs
    /// - Editing or deleting a person whose id was already removed
    /// - Toggling a dish assignment toward a person no longer on the roster
    ///   (refused up front so a dangling reference is never created)
    #[error("Person not found: {0}")]
    PersonNotFound(String),

    /// Dish cannot be found.
    #[error("Dish not found: {0}")]
    DishNotFound(String),

    /// Tax cannot be found.
    #[error("Tax not found: {0}")]
    TaxNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when form input doesn't meet requirements.
/// Used for early validation before any entity is constructed.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or whitespace-only.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Free-text numeric input failed to parse.
    #[error("{field} is not a number: '{input}'")]
    NotANumber { field: String, input: String },

    /// Numeric value must be zero or greater.
    #[error("{field} must be zero or greater")]
    MustBeNonNegative { field: String },

    /// Numeric value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::PersonNotFound("abc-123".to_string());
        assert_eq!(err.to_string(), "Person not found: abc-123");

        let err = CoreError::DishNotFound("d-1".to_string());
        assert_eq!(err.to_string(), "Dish not found: d-1");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::NotANumber {
            field: "price".to_string(),
            input: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "price is not a number: 'abc'");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
