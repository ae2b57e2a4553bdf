//! # Domain Types
//!
//! Core domain types for the pricing side of Meridian DMS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐    │
//! │  │      Item        │   │  ExciseSchedule  │   │  SalesChannel    │    │
//! │  │  ──────────────  │   │  ──────────────  │   │  ──────────────  │    │
//! │  │  excisable       │   │  Concentrate (3) │   │  Direct          │    │
//! │  │  category_code   │   │  Juice       (4) │   │  Agent           │    │
//! │  │  base_uom        │   │  ChannelRated(5) │   └──────────────────┘    │
//! │  │  *_price, *_vol  │   │  AeratedWater(8) │                           │
//! │  │  duty rates      │   └──────────────────┘   ┌──────────────────┐    │
//! │  └──────────────────┘                          │  ExciseContext   │    │
//! │                                                │  (per-line ask)  │    │
//! │                                                └──────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Item` is wire-faithful: field names (including one long-standing
//! misspelling) match the catalogue API, and every numeric field is coerced
//! through [`crate::numeric`] at deserialization so the rest of the crate
//! never sees a stringy or missing number.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::numeric::to_finite;

// =============================================================================
// Sales Channel
// =============================================================================

/// The sales channel an order is placed through.
///
/// Distribution runs two channels: orders booked by a field agent on behalf
/// of a retailer, and direct sales from the depot. Channel-rated items store
/// a separate duty rate for each, so the channel decides which rate applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SalesChannel {
    /// Depot/direct sale (the default for every unrecognized order type).
    Direct,
    /// Agent-booked order.
    Agent,
}

impl SalesChannel {
    /// Order-type code the backend uses for agent-booked orders.
    pub const AGENT_ORDER_TYPE: i64 = 2;

    /// Maps a raw `orderType` code to a channel.
    ///
    /// Only code `2` means agent; every other code, including garbage,
    /// sells direct.
    ///
    /// ## Example
    /// ```rust
    /// use meridian_core::SalesChannel;
    ///
    /// assert_eq!(SalesChannel::from_code(2), SalesChannel::Agent);
    /// assert_eq!(SalesChannel::from_code(0), SalesChannel::Direct);
    /// assert_eq!(SalesChannel::from_code(7), SalesChannel::Direct);
    /// ```
    #[inline]
    pub fn from_code(code: i64) -> Self {
        if code == Self::AGENT_ORDER_TYPE {
            SalesChannel::Agent
        } else {
            SalesChannel::Direct
        }
    }
}

impl Default for SalesChannel {
    fn default() -> Self {
        SalesChannel::Direct
    }
}

// =============================================================================
// Excise Schedule
// =============================================================================

/// Excise schedule an item falls under, keyed by the catalogue's
/// `item_category` code.
///
/// The schedule is a closed set: a category code outside it means the item
/// carries no duty, which is a normal outcome rather than an error. That
/// keeps "unhandled category" an explicit `None` arm instead of a silent
/// map miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ExciseSchedule {
    /// Category 3: concentrates and syrups. Flat ad-valorem duty backed
    /// out of the duty-inclusive base-unit price.
    Concentrate,
    /// Category 4: juices. Ad-valorem duty with a per-litre floor.
    Juice,
    /// Category 5: items whose duty rates are stored per item and selected
    /// by sales channel.
    ChannelRated,
    /// Category 8: aerated waters. Ad-valorem duty with a per-litre floor.
    AeratedWater,
}

impl ExciseSchedule {
    /// Resolves a raw category code to a schedule.
    ///
    /// ## Example
    /// ```rust
    /// use meridian_core::ExciseSchedule;
    ///
    /// assert_eq!(ExciseSchedule::from_code(8), Some(ExciseSchedule::AeratedWater));
    /// assert_eq!(ExciseSchedule::from_code(6), None);
    /// ```
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            3 => Some(ExciseSchedule::Concentrate),
            4 => Some(ExciseSchedule::Juice),
            5 => Some(ExciseSchedule::ChannelRated),
            8 => Some(ExciseSchedule::AeratedWater),
            _ => None,
        }
    }

    /// The catalogue category code for this schedule.
    pub const fn code(&self) -> i64 {
        match self {
            ExciseSchedule::Concentrate => 3,
            ExciseSchedule::Juice => 4,
            ExciseSchedule::ChannelRated => 5,
            ExciseSchedule::AeratedWater => 8,
        }
    }

    /// All schedules, in category-code order.
    pub fn all() -> &'static [ExciseSchedule] {
        &[
            ExciseSchedule::Concentrate,
            ExciseSchedule::Juice,
            ExciseSchedule::ChannelRated,
            ExciseSchedule::AeratedWater,
        ]
    }
}

// =============================================================================
// Item
// =============================================================================

/// The duty-relevant subset of a catalogue item record.
///
/// Deserializes directly from the catalogue API's JSON. Numeric fields
/// tolerate every shape the backend sends (number, numeric string, bool,
/// null, absent); see [`crate::numeric`] for the coercion rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    /// Item identifier (UUID).
    #[serde(default)]
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Whether excise duty applies to this item at all.
    /// Wire field `excies` (sic): stored as `0`/`1`, seen as `"1"`,
    /// `true`, and `null` depending on the endpoint.
    #[serde(
        rename = "excies",
        default,
        deserialize_with = "crate::numeric::loose_flag"
    )]
    pub excisable: bool,

    /// Category code selecting the excise schedule.
    #[serde(
        rename = "item_category",
        default,
        deserialize_with = "crate::numeric::loose_code"
    )]
    pub category_code: i64,

    /// Unit-of-measure code of the item's base (stocking) unit.
    #[serde(
        rename = "baseuom",
        default,
        deserialize_with = "crate::numeric::loose_code"
    )]
    pub base_uom: i64,

    /// Price for one base unit.
    #[serde(default, deserialize_with = "crate::numeric::loose_f64")]
    pub base_uom_price: f64,

    /// Volume of one base unit, in litres.
    #[serde(default, deserialize_with = "crate::numeric::loose_f64")]
    pub base_uom_vol: f64,

    /// Volume of one alternate unit, in litres.
    #[serde(default, deserialize_with = "crate::numeric::loose_f64")]
    pub alter_uom_vol: f64,

    /// Price for one alternate unit, as the catalogue spells it (sic).
    #[serde(
        rename = "base_ulternet_umo_price",
        default,
        deserialize_with = "crate::numeric::loose_f64_opt"
    )]
    pub alternate_unit_price: Option<f64>,

    /// Alternate-unit price under the name some newer endpoints send.
    /// Consulted only when `base_ulternet_umo_price` is absent.
    #[serde(default, deserialize_with = "crate::numeric::loose_f64_opt")]
    pub alter_uom_price: Option<f64>,

    /// Duty rate (percent) for agent-channel orders of channel-rated items.
    #[serde(default, deserialize_with = "crate::numeric::loose_f64")]
    pub agent_excise: f64,

    /// Duty rate (percent) for direct-channel orders of channel-rated items.
    #[serde(default, deserialize_with = "crate::numeric::loose_f64")]
    pub direct_sell_excise: f64,
}

impl Item {
    /// The excise schedule this item falls under, if any.
    #[inline]
    pub fn schedule(&self) -> Option<ExciseSchedule> {
        ExciseSchedule::from_code(self.category_code)
    }

    /// Whether `uom` is the item's base unit.
    #[inline]
    pub fn is_base_uom(&self, uom: i64) -> bool {
        uom == self.base_uom
    }

    /// Base-unit price, coerced finite.
    #[inline]
    pub fn base_price(&self) -> f64 {
        to_finite(self.base_uom_price)
    }

    /// Alternate-unit price: the first defined of the two wire fields,
    /// in their documented order, else `0.0`.
    pub fn alternate_price(&self) -> f64 {
        self.alternate_unit_price
            .or(self.alter_uom_price)
            .map(to_finite)
            .unwrap_or(0.0)
    }

    /// Stored price for the requested unit: base price when `uom` matches
    /// the base unit, alternate price otherwise.
    pub fn unit_price(&self, uom: i64) -> f64 {
        if self.is_base_uom(uom) {
            self.base_price()
        } else {
            self.alternate_price()
        }
    }

    /// Volume (litres) of one requested unit: base or alternate by the
    /// same rule as [`Item::unit_price`].
    pub fn unit_volume(&self, uom: i64) -> f64 {
        if self.is_base_uom(uom) {
            to_finite(self.base_uom_vol)
        } else {
            to_finite(self.alter_uom_vol)
        }
    }

    /// Agent-channel duty rate, coerced finite.
    #[inline]
    pub fn agent_rate(&self) -> f64 {
        to_finite(self.agent_excise)
    }

    /// Direct-channel duty rate, coerced finite.
    #[inline]
    pub fn direct_rate(&self) -> f64 {
        to_finite(self.direct_sell_excise)
    }
}

// =============================================================================
// Excise Context
// =============================================================================

/// One duty calculation request: an order line's unit, quantity, optional
/// price override, and channel.
///
/// Constructed fresh per calculation by the order form, consumed
/// synchronously, discarded. Never persisted, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ExciseContext {
    /// Unit-of-measure code of the requested line.
    pub uom: i64,
    /// Line quantity. Zero or non-finite means "not entered yet" and is
    /// treated as `1` when scaling.
    pub quantity: f64,
    /// Explicit price override from the order form. `None` means "use the
    /// item's stored price".
    pub price_override: Option<f64>,
    /// Sales channel of the order.
    pub channel: SalesChannel,
}

impl Default for ExciseContext {
    fn default() -> Self {
        ExciseContext {
            uom: 0,
            quantity: 1.0,
            price_override: None,
            channel: SalesChannel::Direct,
        }
    }
}

impl ExciseContext {
    /// Builds a context from raw order-form values.
    ///
    /// The price field arrives as the text of an input box: empty means no
    /// override, anything else coerces through [`crate::numeric::parse_loose`].
    ///
    /// ## Example
    /// ```rust
    /// use meridian_core::{ExciseContext, SalesChannel};
    ///
    /// let ctx = ExciseContext::from_form(4, 12.0, "", 2);
    /// assert_eq!(ctx.price_override, None);
    /// assert_eq!(ctx.channel, SalesChannel::Agent);
    ///
    /// let ctx = ExciseContext::from_form(4, 12.0, " 85.5 ", 0);
    /// assert_eq!(ctx.price_override, Some(85.5));
    /// assert_eq!(ctx.channel, SalesChannel::Direct);
    /// ```
    pub fn from_form(uom: i64, quantity: f64, price_input: &str, order_type: i64) -> Self {
        let price_override = if price_input.trim().is_empty() {
            None
        } else {
            Some(crate::numeric::parse_loose(price_input))
        };
        ExciseContext {
            uom,
            quantity: to_finite(quantity),
            price_override,
            channel: SalesChannel::from_code(order_type),
        }
    }

    /// Quantity to scale per-unit amounts by: the coerced quantity, with
    /// zero defaulting to `1` so an untouched quantity box prices one unit.
    pub fn effective_quantity(&self) -> f64 {
        let qty = to_finite(self.quantity);
        if qty == 0.0 {
            1.0
        } else {
            qty
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
