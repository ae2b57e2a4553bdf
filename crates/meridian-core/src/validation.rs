//! # Validation Module
//!
//! Order-form input validation for Meridian DMS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Dashboard (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                                │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (on order-line submit)                            │
//! │  ├── Business rule validation                                           │
//! │  └── Limits shared with the backend                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: REST backend                                                  │
//! │  └── Persistence constraints                                            │
//! │                                                                         │
//! │  The interactive quote path deliberately skips all of this:             │
//! │  half-filled lines must still price (to zero) without erroring.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use meridian_core::validation::{validate_quantity, validate_unit_price};
//!
//! validate_quantity(12.0).unwrap();
//! validate_unit_price(85.5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::{MAX_EXCISE_RATE_PCT, MAX_LINE_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an order-line quantity.
///
/// ## Rules
/// - Must be a finite number
/// - Must be positive (> 0)
/// - Must not exceed `MAX_LINE_QUANTITY`
pub fn validate_quantity(quantity: f64) -> ValidationResult<()> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1.0,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be a finite number
/// - Must be non-negative (zero is allowed: promotional items)
///
/// ## Example
/// ```rust
/// use meridian_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(85.5).is_ok());
/// assert!(validate_unit_price(0.0).is_ok());
/// assert!(validate_unit_price(-10.0).is_err());
/// ```
pub fn validate_unit_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if price < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0.0,
            max: f64::MAX,
        });
    }

    Ok(())
}

/// Validates a stored duty rate (percent).
///
/// ## Rules
/// - Must be a finite number between 0 and `MAX_EXCISE_RATE_PCT`
///
/// Used by the item maintenance forms before a channel-rated item's
/// `agent_excise` / `direct_sell_excise` fields are saved.
pub fn validate_excise_rate(rate: f64) -> ValidationResult<()> {
    if !rate.is_finite() || rate < 0.0 || rate > MAX_EXCISE_RATE_PCT {
        return Err(ValidationError::OutOfRange {
            field: "excise rate".to_string(),
            min: 0.0,
            max: MAX_EXCISE_RATE_PCT,
        });
    }

    Ok(())
}

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates an item identifier.
///
/// ## Rules
/// - Must not be empty
/// - Must be a valid UUID
///
/// ## Example
/// ```rust
/// use meridian_core::validation::validate_item_id;
///
/// assert!(validate_item_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_item_id("not-a-uuid").is_err());
/// ```
pub fn validate_item_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "item id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "item id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
