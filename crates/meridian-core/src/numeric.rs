//! # Numeric Coercion
//!
//! The REST backend grew out of a PHP-era schema: numeric columns arrive as
//! numbers, numeric strings, booleans, `null`, or not at all, sometimes
//! varying per endpoint for the same field. Every arithmetic path in this
//! crate assumes well-typed finite numbers, so the mess is absorbed in
//! exactly one place: here, at the deserialization boundary.
//!
//! ## Coercion Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Wire value          → f64        → Option<f64>     → flag              │
//! │  ─────────────────────────────────────────────────────────────────      │
//! │  42 / 42.5           → itself     → Some(itself)    → value == 1        │
//! │  "42.5" / " 42.5 "   → 42.5       → Some(42.5)      → value == 1        │
//! │  true / false        → 1.0 / 0.0  → Some(1.0/0.0)   → true iff true     │
//! │  "" (empty string)   → 0.0        → None            → false             │
//! │  null / absent       → 0.0        → None / 0.0¹     → false             │
//! │  "abc", {}, []       → 0.0        → Some(0.0)       → false             │
//! │                                                                         │
//! │  ¹ absent fields take the struct default (0.0 / None / false)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No coercion helper ever errors or panics: garbage degrades to zero so a
//! half-filled form on the dashboard still produces a well-defined request.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

// =============================================================================
// Finite-or-Zero Helpers
// =============================================================================

/// Clamps a float to the finite domain.
///
/// Returns the value unchanged when it is finite, `0.0` for NaN and ±∞.
/// Applied before any arithmetic on caller-supplied numbers.
///
/// ## Example
/// ```rust
/// use meridian_core::numeric::to_finite;
///
/// assert_eq!(to_finite(12.5), 12.5);
/// assert_eq!(to_finite(f64::NAN), 0.0);
/// assert_eq!(to_finite(f64::INFINITY), 0.0);
/// ```
#[inline]
pub fn to_finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Parses a string as a finite number, defaulting to `0.0`.
///
/// Leading/trailing whitespace is ignored. Anything that does not parse as
/// a finite float (including `"Infinity"`) coerces to `0.0`.
///
/// ## Example
/// ```rust
/// use meridian_core::numeric::parse_loose;
///
/// assert_eq!(parse_loose(" 129.8 "), 129.8);
/// assert_eq!(parse_loose("abc"), 0.0);
/// assert_eq!(parse_loose(""), 0.0);
/// ```
pub fn parse_loose(text: &str) -> f64 {
    text.trim().parse::<f64>().map(to_finite).unwrap_or(0.0)
}

// =============================================================================
// Loose Wire Scalars
// =============================================================================

/// Any scalar shape the backend sends where a number belongs.
///
/// `Other` swallows arrays/objects that occasionally leak into numeric
/// columns; they coerce to zero like any other junk.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LooseScalar {
    Bool(bool),
    Num(f64),
    Text(String),
    Other(IgnoredAny),
}

impl LooseScalar {
    fn as_f64(&self) -> f64 {
        match self {
            LooseScalar::Bool(true) => 1.0,
            LooseScalar::Bool(false) => 0.0,
            LooseScalar::Num(n) => to_finite(*n),
            LooseScalar::Text(s) => parse_loose(s),
            LooseScalar::Other(_) => 0.0,
        }
    }

    fn is_empty_text(&self) -> bool {
        matches!(self, LooseScalar::Text(s) if s.trim().is_empty())
    }
}

// =============================================================================
// deserialize_with Adapters
// =============================================================================
// Used as `#[serde(default, deserialize_with = "crate::numeric::loose_f64")]`
// on the wire-facing structs in `types`.

/// Any scalar (or null) to a finite `f64`, defaulting to `0.0`.
pub(crate) fn loose_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<LooseScalar>::deserialize(deserializer)?;
    Ok(raw.map(|v| v.as_f64()).unwrap_or(0.0))
}

/// Any scalar to an optional finite `f64`.
///
/// `null` and the empty string are the backend's "no value" sentinels and
/// map to `None`; everything else coerces like [`loose_f64`].
pub(crate) fn loose_f64_opt<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<LooseScalar>::deserialize(deserializer)?;
    Ok(match raw {
        None => None,
        Some(v) if v.is_empty_text() => None,
        Some(v) => Some(v.as_f64()),
    })
}

/// Any scalar to an integer code (category / unit-of-measure identifiers).
///
/// Non-integral and out-of-domain values map to `0`, which matches no
/// known code.
pub(crate) fn loose_code<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = loose_f64(deserializer)?;
    if value.fract() == 0.0 {
        Ok(value as i64)
    } else {
        Ok(0)
    }
}

/// Applicability flag: `true` iff the value is boolean `true` or coerces
/// to exactly `1`.
///
/// The catalogue stores the excise flag as `0`/`1`, but individual
/// endpoints have been seen returning `"1"`, `true`, and `null`.
pub(crate) fn loose_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<LooseScalar>::deserialize(deserializer)?;
    Ok(raw.map(|v| v.as_f64() == 1.0).unwrap_or(false))
}

// =============================================================================
// Unit Tests
// =============================================================================
