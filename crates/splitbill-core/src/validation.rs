//! # Validation Module
//!
//! Boundary-side input validation for Splitbill.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form layer (apps/cli)                                        │
//! │  ├── Free-text input read from the user                                │
//! │  └── THIS MODULE: parse + reject before an entity exists               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Ledger / engine (splitbill-core)                             │
//! │  ├── Assumes names are non-empty and numbers are finite, >= 0          │
//! │  └── Defends against a slipped negative by clamping to zero,           │
//! │      never by aborting the computation                                 │
//! │                                                                         │
//! │  An entity that exists is a valid entity.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use splitbill_core::validation::{validate_name, parse_amount};
//!
//! let name = validate_name("name", "  Alice ").unwrap();
//! assert_eq!(name, "Alice");
//!
//! let price = parse_amount("price", "12.50").unwrap();
//! assert_eq!(price, 12.5);
//! ```

use crate::error::ValidationError;
use crate::MAX_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a person/dish/tax display name.
///
/// ## Rules
/// - Must not be empty or whitespace-only
/// - Must be at most [`MAX_NAME_LEN`] characters after trimming
///
/// ## Returns
/// The trimmed name.
pub fn validate_name(field: &str, name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an already-parsed monetary amount (dish price or tax value).
///
/// ## Rules
/// - Must be finite (no NaN, no infinity)
/// - Must be zero or greater; zero is allowed (free dishes, zero taxes)
/// - No upper bound: percentage taxes above 100% are legal
pub fn validate_amount(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    if value < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Parses free-text numeric input and validates the result.
///
/// The form layer reads prices and tax values as text; this is the single
/// place that text becomes a number.
///
/// ## Example
/// ```rust
/// use splitbill_core::validation::parse_amount;
///
/// assert_eq!(parse_amount("price", "12.50").unwrap(), 12.5);
/// assert!(parse_amount("price", "abc").is_err());
/// assert!(parse_amount("price", "-1").is_err());
/// ```
pub fn parse_amount(field: &str, input: &str) -> ValidationResult<f64> {
    let input = input.trim();

    let value: f64 = input.parse().map_err(|_| ValidationError::NotANumber {
        field: field.to_string(),
        input: input.to_string(),
    })?;

    validate_amount(field, value)?;
    Ok(value)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("name", "Alice").unwrap(), "Alice");
        assert_eq!(validate_name("name", "  Alice  ").unwrap(), "Alice");

        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", "   ").is_err());
        assert!(validate_name("name", &"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount("price", 0.0).is_ok());
        assert!(validate_amount("price", 12.5).is_ok());
        assert!(validate_amount("value", 150.0).is_ok()); // >100% is legal

        assert!(validate_amount("price", -0.01).is_err());
        assert!(validate_amount("price", f64::NAN).is_err());
        assert!(validate_amount("price", f64::INFINITY).is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("price", "12.50").unwrap(), 12.5);
        assert_eq!(parse_amount("price", " 0 ").unwrap(), 0.0);

        assert!(matches!(
            parse_amount("price", "abc").unwrap_err(),
            ValidationError::NotANumber { .. }
        ));
        assert!(matches!(
            parse_amount("price", "-3").unwrap_err(),
            ValidationError::MustBeNonNegative { .. }
        ));
        assert!(matches!(
            parse_amount("price", "NaN").unwrap_err(),
            ValidationError::NotFinite { .. }
        ));
    }
}
