//! # meridian-core: Pure Business Logic for Meridian DMS
//!
//! This crate is the computational heart of Meridian DMS, a
//! distribution-management system (orders, deliveries, pricing) whose
//! dashboard and REST backend live elsewhere. Everything here is pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Meridian DMS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   Dashboard (Next.js)                           │   │
//! │  │    Order form ──► Delivery UI ──► Invoice UI ──► Reports        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ REST / JSON                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ meridian-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  excise   │  │  pricing  │  │ validation│  │   │
//! │  │   │   Item    │  │  assess   │  │ OrderLine │  │   rules   │  │   │
//! │  │   │  Context  │  │  amount   │  │  totals   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, ExciseContext, schedules, channels)
//! - [`numeric`] - Loose wire-scalar coercion (the backend's numbers arrive
//!   as numbers, strings, bools, or not at all)
//! - [`excise`] - The excise duty engine
//! - [`pricing`] - Order-line quoting and totals
//! - [`error`] - Domain error types
//! - [`validation`] - Order-form rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every calculation is deterministic - same input =
//!    same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Total Calculations**: The duty engine never errors or panics;
//!    malformed data degrades to zero so the dashboard can price
//!    half-filled forms on every keystroke
//! 4. **Coerce Once**: Wire junk is normalized at the deserialization
//!    boundary; internal code only ever sees finite numbers
//!
//! ## Example Usage
//!
//! ```rust
//! use meridian_core::{excise_amount, ExciseContext, Item};
//!
//! let item: Item = serde_json::from_value(serde_json::json!({
//!     "excies": 1,
//!     "item_category": 3,
//!     "base_uom_price": 129.8
//! }))
//! .unwrap();
//!
//! // 10% of the grossed-down base price: 129.8 / 1.298 × 0.10
//! assert_eq!(excise_amount(Some(&item), &ExciseContext::default()), 10.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod excise;
pub mod numeric;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use meridian_core::Item` instead of
// `use meridian_core::types::Item`

pub use error::{CoreError, CoreResult, ValidationError};
pub use excise::{assess, excise_amount, round_to_cents, ExciseAssessment};
pub use numeric::{parse_loose, to_finite};
pub use pricing::OrderLine;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity accepted on a single order line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing a phone number into the
/// quantity box). Distribution orders are in cases, so four digits is
/// generous. Can be made configurable per distributor in future versions.
pub const MAX_LINE_QUANTITY: f64 = 9_999.0;

/// Maximum stored duty rate, in percent.
///
/// ## Business Reason
/// Channel-rated items carry their own `agent_excise` /
/// `direct_sell_excise` rates; a rate above 100% is always a data-entry
/// error.
pub const MAX_EXCISE_RATE_PCT: f64 = 100.0;
