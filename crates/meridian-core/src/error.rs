//! # Error Types
//!
//! Domain-specific error types for meridian-core.
//!
//! ## Where Errors Can (and Cannot) Come From
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Boundaries                                │
//! │                                                                         │
//! │  Duty engine (excise)      → NEVER errors: total, degrades to zero      │
//! │  Catalogue deserialization → NEVER errors on scalar junk: coerced       │
//! │  Order-line submit path    → ValidationError / CoreError (this file)    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → REST backend → dashboard toast     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, limits)
//! 3. Errors are enum variants, never String
//! 4. The interactive quote path stays error-free; only submission validates

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Raised by the order-line submit path when a line that quoted fine
/// interactively is not actually sellable.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The item has no stored price for the requested unit and no override
    /// was given, so the line cannot be committed.
    #[error("item {0} has no price for the requested unit")]
    MissingUnitPrice(String),

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when order-form input doesn't meet requirements. Used for
/// early validation before a line is committed.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, non-finite number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
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
        let err = CoreError::MissingUnitPrice("it-204".to_string());
        assert_eq!(
            err.to_string(),
            "item it-204 has no price for the requested unit"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "item id".to_string(),
        };
        assert_eq!(err.to_string(), "item id is required");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1.0,
            max: 9999.0,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 9999");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
