//! # Order-Line Pricing
//!
//! Turns a catalogue item plus an [`ExciseContext`] into a priced order
//! line ready to display and submit.
//!
//! ## Snapshot Pattern
//! The line freezes the item's identity and resolved unit price at quote
//! time. If the catalogue record changes while the order is being edited,
//! the line keeps displaying (and later submits) the figures the user saw.
//!
//! ## Two Paths, One Math
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Keystroke in the order form ──► OrderLine::quote()                     │
//! │      total, never errors, half-filled lines price to zero               │
//! │                                                                         │
//! │  Submit button ──────────────► OrderLine::checked_quote()               │
//! │      same math, but the line must survive validation first              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::excise::{excise_amount, round_to_cents};
use crate::numeric::to_finite;
use crate::types::{ExciseContext, Item};
use crate::validation::{validate_item_id, validate_quantity, validate_unit_price};

// =============================================================================
// Order Line
// =============================================================================

/// A priced order line.
///
/// ## Design Notes
/// - `item_id` / `item_name`: frozen copies of the catalogue identity
/// - `unit_price`: the price actually charged: the form's override when
///   one was entered, else the stored price for the requested unit
/// - `excise`: duty for the whole line (already quantity-scaled)
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Item ID (frozen at quote time).
    pub item_id: String,

    /// Item name (frozen at quote time).
    pub item_name: String,

    /// Unit-of-measure code the line is priced in.
    pub uom: i64,

    /// Quantity (zero on the form quotes as one unit).
    pub quantity: f64,

    /// Unit price charged, frozen at quote time.
    pub unit_price: f64,

    /// Excise duty for the whole line.
    pub excise: f64,

    /// When this line was priced.
    #[ts(as = "String")]
    pub quoted_at: DateTime<Utc>,
}

impl OrderLine {
    /// Prices a line. Total like the duty engine itself: any missing data
    /// degrades to zero rather than erroring, so the order form can quote
    /// on every keystroke.
    ///
    /// ## Example
    /// ```rust
    /// use meridian_core::{ExciseContext, Item, OrderLine, SalesChannel};
    ///
    /// let item: Item = serde_json::from_value(serde_json::json!({
    ///     "id": "550e8400-e29b-41d4-a716-446655440000",
    ///     "name": "Cola 1.5L case",
    ///     "excies": 1,
    ///     "item_category": 5,
    ///     "base_uom_price": 200,
    ///     "agent_excise": 10
    /// }))
    /// .unwrap();
    ///
    /// let ctx = ExciseContext {
    ///     quantity: 2.0,
    ///     channel: SalesChannel::Agent,
    ///     ..ExciseContext::default()
    /// };
    ///
    /// let line = OrderLine::quote(&item, &ctx);
    /// assert_eq!(line.unit_price, 200.0);
    /// assert_eq!(line.excise, 40.0);
    /// assert_eq!(line.gross_total(), 400.0);
    /// assert_eq!(line.line_total(), 440.0);
    /// ```
    pub fn quote(item: &Item, ctx: &ExciseContext) -> Self {
        let unit_price = ctx
            .price_override
            .map(to_finite)
            .unwrap_or_else(|| item.unit_price(ctx.uom));

        OrderLine {
            item_id: item.id.clone(),
            item_name: item.name.clone(),
            uom: ctx.uom,
            quantity: ctx.effective_quantity(),
            unit_price,
            excise: excise_amount(Some(item), ctx),
            quoted_at: Utc::now(),
        }
    }

    /// Prices a line for submission: the same math as [`OrderLine::quote`],
    /// gated by validation.
    ///
    /// ## Rules
    /// - item id must be a UUID
    /// - quantity must be positive and within limits
    /// - an entered price override must be a valid price
    /// - without an override, the item must have a stored price for the
    ///   requested unit
    pub fn checked_quote(item: &Item, ctx: &ExciseContext) -> CoreResult<Self> {
        validate_item_id(&item.id)?;
        validate_quantity(ctx.effective_quantity())?;
        if let Some(price) = ctx.price_override {
            validate_unit_price(price)?;
        }

        let line = Self::quote(item, ctx);
        if ctx.price_override.is_none() && line.unit_price <= 0.0 {
            return Err(CoreError::MissingUnitPrice(item.id.clone()));
        }

        Ok(line)
    }

    /// Line total before duty (unit price × quantity), rounded to cents.
    pub fn gross_total(&self) -> f64 {
        round_to_cents(self.unit_price * self.quantity)
    }

    /// Line total including duty, rounded to cents.
    pub fn line_total(&self) -> f64 {
        round_to_cents(self.gross_total() + self.excise)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
