//! # Excise Duty Engine
//!
//! Computes the excise duty for one order line from the item's catalogue
//! attributes and the line's context (unit, quantity, price override,
//! channel).
//!
//! ## Assessment Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Duty Assessment                                   │
//! │                                                                         │
//! │  Item + ExciseContext                                                   │
//! │       │                                                                 │
//! │       ├── no item / excise flag off ────────────► Exempt        (0)     │
//! │       │                                                                 │
//! │       ├── category not in schedule ─────────────► Unscheduled   (0)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  schedule formula ──► (ad-valorem, volumetric) candidates               │
//! │       │                                                                 │
//! │       ▼  per-unit duty = max of the two                                 │
//! │       │                                                                 │
//! │       ├── per-unit duty ≤ 0 ────────────────────► Assessed(0)           │
//! │       │                                                                 │
//! │       ▼  × quantity, round to cents                                     │
//! │  Assessed(amount)                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Duty is the *greater* of a percentage-of-price charge and a flat
//! per-volume charge wherever a schedule defines both.
//!
//! ## Totality
//!
//! [`assess`] and [`excise_amount`] are total: every input, including a
//! missing item and fields full of coerced garbage, produces a finite
//! number `>= 0`. The order form calls this on every keystroke while the
//! line is half-filled, so degrading to zero is the contract, not a
//! fallback. The only side effects are `tracing` debug events.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::numeric::to_finite;
use crate::types::{ExciseContext, ExciseSchedule, Item, SalesChannel};

// =============================================================================
// Schedule Parameters
// =============================================================================

/// Gross-up factor backing an aerated-water retail price down to its
/// excisable base (1.18 sales tax × 1.12 duty).
const AERATED_WATER_GROSS_UP: f64 = 1.3216;

/// Gross-up factor for the juice schedule (1.18 sales tax × 1.13 duty).
const JUICE_GROSS_UP: f64 = 1.3334;

/// Gross-up factor for concentrates (1.18 sales tax × 1.10 duty).
const CONCENTRATE_GROSS_UP: f64 = 1.298;

/// Ad-valorem duty rate for aerated waters and juices.
const STANDARD_RATE: f64 = 0.12;

/// Ad-valorem duty rate for concentrates.
const CONCENTRATE_RATE: f64 = 0.10;

/// Flat duty floor, rupees per litre.
const VOLUMETRIC_FLOOR_PER_LITRE: f64 = 250.0;

// =============================================================================
// Assessment Outcome
// =============================================================================

/// Outcome of a duty assessment.
///
/// The numeric contract of [`excise_amount`] cannot distinguish "no duty
/// applies" from "duty computed as zero"; this enum exists so callers and
/// tests that care can. [`ExciseAssessment::amount`] collapses it back to
/// the plain number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ExciseAssessment {
    /// No item, or the item's excise flag is off.
    Exempt,
    /// Excise applies in principle, but the category has no schedule.
    Unscheduled,
    /// Duty computed for the requested quantity, rounded to cents.
    /// May legitimately be zero.
    Assessed(f64),
}

impl ExciseAssessment {
    /// The duty amount: the assessed value, or `0.0` when no duty applies.
    #[inline]
    pub fn amount(&self) -> f64 {
        match self {
            ExciseAssessment::Assessed(amount) => *amount,
            _ => 0.0,
        }
    }
}

// =============================================================================
// Candidates
// =============================================================================

/// The two per-unit duty candidates a schedule produces.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Candidates {
    /// Percentage-of-price charge.
    ad_valorem: f64,
    /// Flat per-volume charge (zero for schedules without one).
    volumetric: f64,
}

impl Candidates {
    /// The charged per-unit duty: the greater of the two candidates.
    fn per_unit(self) -> f64 {
        self.ad_valorem.max(self.volumetric)
    }
}

// =============================================================================
// Schedule Formulas
// =============================================================================

/// Ad-valorem duty backed out of a duty-inclusive price, floored by the
/// per-litre charge. Shared by the aerated-water and juice schedules,
/// which differ only in gross-up factor.
///
/// Price and volume follow the requested unit: base figures when the line
/// is in the base unit, alternate figures otherwise. An explicit price
/// override supersedes the stored price; the volume side is unaffected.
fn inclusive_with_floor(item: &Item, ctx: &ExciseContext, gross_up: f64) -> Candidates {
    let price = ctx
        .price_override
        .map(to_finite)
        .unwrap_or_else(|| item.unit_price(ctx.uom));
    Candidates {
        ad_valorem: price / gross_up * STANDARD_RATE,
        volumetric: item.unit_volume(ctx.uom) * VOLUMETRIC_FLOOR_PER_LITRE,
    }
}

/// Concentrate schedule: flat ad-valorem on the base-unit price, no
/// volumetric floor. The base price applies whatever unit the line is in.
fn concentrate(item: &Item, ctx: &ExciseContext) -> Candidates {
    let price = ctx
        .price_override
        .map(to_finite)
        .unwrap_or_else(|| item.base_price());
    Candidates {
        ad_valorem: price / CONCENTRATE_GROSS_UP * CONCENTRATE_RATE,
        volumetric: 0.0,
    }
}

/// Channel-rated schedule: duty comes from the item's stored per-channel
/// rates rather than a fixed formula.
///
/// With an explicit price override both candidates take the
/// rate-per-unit-price form `100 × rate / price` (divisor guarded to `1`
/// when the coerced price is zero). Without one, the base price (falling
/// back to the alternate price when zero) carries the rate directly:
/// agent orders additionally floor at the rate-per-unit-price form, and
/// direct orders fall back to the agent rate when no direct rate is set.
fn channel_rated(item: &Item, ctx: &ExciseContext) -> Candidates {
    let agent = item.agent_rate();
    let direct = item.direct_rate();

    if let Some(price) = ctx.price_override.map(to_finite) {
        let rate = match ctx.channel {
            SalesChannel::Agent => agent,
            SalesChannel::Direct => direct,
        };
        let divisor = if price == 0.0 { 1.0 } else { price };
        let per_unit = 100.0 * rate / divisor;
        return Candidates {
            ad_valorem: per_unit,
            volumetric: per_unit,
        };
    }

    let base_price = if item.base_price() == 0.0 {
        item.alternate_price()
    } else {
        item.base_price()
    };

    match ctx.channel {
        SalesChannel::Agent => Candidates {
            ad_valorem: base_price * agent / 100.0,
            volumetric: if base_price == 0.0 {
                0.0
            } else {
                100.0 * agent / base_price
            },
        },
        SalesChannel::Direct => {
            let rate = if direct == 0.0 { agent } else { direct };
            let flat = base_price * rate / 100.0;
            Candidates {
                ad_valorem: flat,
                volumetric: flat,
            }
        }
    }
}

fn schedule_candidates(schedule: ExciseSchedule, item: &Item, ctx: &ExciseContext) -> Candidates {
    match schedule {
        ExciseSchedule::Concentrate => concentrate(item, ctx),
        ExciseSchedule::Juice => inclusive_with_floor(item, ctx, JUICE_GROSS_UP),
        ExciseSchedule::ChannelRated => channel_rated(item, ctx),
        ExciseSchedule::AeratedWater => inclusive_with_floor(item, ctx, AERATED_WATER_GROSS_UP),
    }
}

// =============================================================================
// Rounding
// =============================================================================

/// Rounds a currency amount to 2 decimal places, half away from zero.
///
/// ## Example
/// ```rust
/// use meridian_core::round_to_cents;
///
/// assert_eq!(round_to_cents(0.125), 0.13);
/// assert_eq!(round_to_cents(12.344), 12.34);
/// assert_eq!(round_to_cents(-0.125), -0.13);
/// ```
#[inline]
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// =============================================================================
// Orchestrator
// =============================================================================

/// Assesses the excise duty for one order line, keeping the outcome kind.
///
/// See the module docs for the flow. Use [`excise_amount`] when only the
/// number matters.
pub fn assess(item: Option<&Item>, ctx: &ExciseContext) -> ExciseAssessment {
    let Some(item) = item else {
        debug!("duty assessment skipped: no item");
        return ExciseAssessment::Exempt;
    };

    if !item.excisable {
        debug!(item = %item.id, "duty assessment skipped: item not excisable");
        return ExciseAssessment::Exempt;
    }

    let Some(schedule) = item.schedule() else {
        debug!(
            item = %item.id,
            category = item.category_code,
            "no excise schedule for category"
        );
        return ExciseAssessment::Unscheduled;
    };

    let per_unit = schedule_candidates(schedule, item, ctx).per_unit();
    if per_unit <= 0.0 {
        return ExciseAssessment::Assessed(0.0);
    }

    // Scale to the line quantity and round. `to_finite` keeps the totality
    // promise even if a hand-built item smuggles in an overflow.
    let amount = to_finite(round_to_cents(per_unit * ctx.effective_quantity())).max(0.0);
    debug!(item = %item.id, schedule = ?schedule, amount, "duty assessed");
    ExciseAssessment::Assessed(amount)
}

/// The excise duty for one order line as a plain number.
///
/// Total over its whole input domain: any missing or malformed data
/// degrades to `0.0`, never an error. This is the contract the order and
/// invoice forms rely on.
///
/// ## Example
/// ```rust
/// use meridian_core::{excise_amount, ExciseContext, Item};
///
/// let item: Item = serde_json::from_value(serde_json::json!({
///     "excies": "1",
///     "item_category": 8,
///     "baseuom": 1,
///     "base_uom_price": "132.16",
///     "base_uom_vol": 0.5
/// }))
/// .unwrap();
///
/// let ctx = ExciseContext { uom: 1, ..ExciseContext::default() };
/// // per-litre floor (0.5 L × 250) beats 12% of the grossed-down price
/// assert_eq!(excise_amount(Some(&item), &ctx), 125.0);
/// assert_eq!(excise_amount(None, &ctx), 0.0);
/// ```
pub fn excise_amount(item: Option<&Item>, ctx: &ExciseContext) -> f64 {
    assess(item, ctx).amount()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: serde_json::Value) -> Item {
        serde_json::from_value(value).unwrap()
    }

    fn ctx() -> ExciseContext {
        ExciseContext::default()
    }

    // -------------------------------------------------------------------------
    // Aerated water (category 8)
    // -------------------------------------------------------------------------

    #[test]
    fn test_aerated_water_volumetric_floor_wins() {
        let item = item(json!({
            "excies": 1,
            "item_category": 8,
            "baseuom": 1,
            "base_uom_price": 132.16,
            "base_uom_vol": 0.5
        }));
        let ctx = ExciseContext { uom: 1, ..ctx() };

        // ad valorem: 132.16 / 1.3216 × 0.12 = 12.00; floor: 0.5 × 250 = 125
        assert_eq!(excise_amount(Some(&item), &ctx), 125.0);
        assert_eq!(assess(Some(&item), &ctx), ExciseAssessment::Assessed(125.0));
    }

    #[test]
    fn test_aerated_water_ad_valorem_wins() {
        let item = item(json!({
            "excies": 1,
            "item_category": 8,
            "baseuom": 1,
            "base_uom_price": 132.16,
            "base_uom_vol": 0.01
        }));
        let ctx = ExciseContext { uom: 1, ..ctx() };

        // floor is only 2.50 here, so 12% of the grossed-down price carries
        assert_eq!(excise_amount(Some(&item), &ctx), 12.0);
    }

    #[test]
    fn test_aerated_water_alternate_unit() {
        let item = item(json!({
            "excies": 1,
            "item_category": 8,
            "baseuom": 1,
            "base_uom_price": 132.16,
            "base_uom_vol": 0.5,
            "base_ulternet_umo_price": 66.08,
            "alter_uom_vol": 0.25
        }));
        // requested unit is not the base unit: alternate price and volume
        let ctx = ExciseContext { uom: 2, ..ctx() };

        // ad valorem: 66.08 / 1.3216 × 0.12 = 6.00; floor: 0.25 × 250 = 62.50
        assert_eq!(excise_amount(Some(&item), &ctx), 62.5);
    }

    #[test]
    fn test_aerated_water_price_override() {
        let item = item(json!({
            "excies": 1,
            "item_category": 8,
            "baseuom": 1,
            "base_uom_price": 132.16,
            "base_uom_vol": 0.01
        }));
        let ctx = ExciseContext {
            uom: 1,
            price_override: Some(264.32),
            ..ctx()
        };

        // override doubles the ad-valorem side; the volume side is untouched
        assert_eq!(excise_amount(Some(&item), &ctx), 24.0);
    }

    // -------------------------------------------------------------------------
    // Concentrate (category 3)
    // -------------------------------------------------------------------------

    #[test]
    fn test_concentrate_base_price() {
        let item = item(json!({
            "excies": 1,
            "item_category": 3,
            "base_uom_price": 129.8
        }));

        // 129.8 / 1.298 × 0.10 = 10.00, no volumetric side
        assert_eq!(excise_amount(Some(&item), &ctx()), 10.0);
    }

    #[test]
    fn test_concentrate_ignores_requested_unit() {
        let item = item(json!({
            "excies": 1,
            "item_category": 3,
            "baseuom": 1,
            "base_uom_price": 129.8,
            "base_ulternet_umo_price": 1000.0
        }));
        let ctx = ExciseContext { uom: 9, ..ctx() };

        // concentrates always price off the base unit
        assert_eq!(excise_amount(Some(&item), &ctx), 10.0);
    }

    #[test]
    fn test_concentrate_price_override() {
        let item = item(json!({
            "excies": 1,
            "item_category": 3,
            "base_uom_price": 129.8
        }));
        let ctx = ExciseContext {
            price_override: Some(64.9),
            ..ctx()
        };

        assert_eq!(excise_amount(Some(&item), &ctx), 5.0);
    }

    // -------------------------------------------------------------------------
    // Juice (category 4)
    // -------------------------------------------------------------------------

    #[test]
    fn test_juice_gross_up() {
        let item = item(json!({
            "excies": 1,
            "item_category": 4,
            "baseuom": 1,
            "base_uom_price": 133.34,
            "base_uom_vol": 0.02
        }));
        let ctx = ExciseContext { uom: 1, ..ctx() };

        // ad valorem: 133.34 / 1.3334 × 0.12 = 12.00; floor: 0.02 × 250 = 5
        assert_eq!(excise_amount(Some(&item), &ctx), 12.0);
    }

    // -------------------------------------------------------------------------
    // Channel-rated (category 5)
    // -------------------------------------------------------------------------

    fn channel_rated_item() -> Item {
        item(json!({
            "excies": 1,
            "item_category": 5,
            "base_uom_price": 200,
            "agent_excise": 10,
            "direct_sell_excise": 5
        }))
    }

    #[test]
    fn test_channel_rated_agent_no_override() {
        let ctx = ExciseContext {
            channel: SalesChannel::Agent,
            ..ctx()
        };

        // 200 × 10% = 20 beats the rate-per-price form 100 × 10 / 200 = 5
        assert_eq!(excise_amount(Some(&channel_rated_item()), &ctx), 20.0);
    }

    #[test]
    fn test_channel_rated_agent_rate_per_price_wins_on_cheap_items() {
        let item = item(json!({
            "excies": 1,
            "item_category": 5,
            "base_uom_price": 5,
            "agent_excise": 10
        }));
        let ctx = ExciseContext {
            channel: SalesChannel::Agent,
            ..ctx()
        };

        // 5 × 10% = 0.50 loses to 100 × 10 / 5 = 200
        assert_eq!(excise_amount(Some(&item), &ctx), 200.0);
    }

    #[test]
    fn test_channel_rated_agent_with_override() {
        let ctx = ExciseContext {
            channel: SalesChannel::Agent,
            price_override: Some(50.0),
            ..ctx()
        };

        // 100 × 10 / 50 = 20
        assert_eq!(excise_amount(Some(&channel_rated_item()), &ctx), 20.0);
    }

    #[test]
    fn test_channel_rated_zero_override_guards_divisor() {
        let ctx = ExciseContext {
            channel: SalesChannel::Agent,
            price_override: Some(0.0),
            ..ctx()
        };

        // divisor guarded to 1: 100 × 10 / 1 = 1000
        assert_eq!(excise_amount(Some(&channel_rated_item()), &ctx), 1000.0);
    }

    #[test]
    fn test_channel_rated_direct_uses_direct_rate() {
        let ctx = ExciseContext {
            channel: SalesChannel::Direct,
            ..ctx()
        };

        // 200 × 5% = 10
        assert_eq!(excise_amount(Some(&channel_rated_item()), &ctx), 10.0);
    }

    #[test]
    fn test_channel_rated_direct_falls_back_to_agent_rate() {
        let item = item(json!({
            "excies": 1,
            "item_category": 5,
            "base_uom_price": 100,
            "agent_excise": 8
        }));
        let ctx = ExciseContext {
            channel: SalesChannel::Direct,
            ..ctx()
        };

        assert_eq!(excise_amount(Some(&item), &ctx), 8.0);
    }

    #[test]
    fn test_channel_rated_base_price_falls_back_to_alternate() {
        let item = item(json!({
            "excies": 1,
            "item_category": 5,
            "base_uom_price": 0,
            "base_ulternet_umo_price": 50,
            "agent_excise": 10
        }));
        let ctx = ExciseContext {
            channel: SalesChannel::Agent,
            ..ctx()
        };

        // alternate price 50: 50 × 10% = 5 vs 100 × 10 / 50 = 20
        assert_eq!(excise_amount(Some(&item), &ctx), 20.0);
    }

    // -------------------------------------------------------------------------
    // Gating and degradation
    // -------------------------------------------------------------------------

    #[test]
    fn test_no_item_is_exempt() {
        assert_eq!(assess(None, &ctx()), ExciseAssessment::Exempt);
        assert_eq!(excise_amount(None, &ctx()), 0.0);
    }

    #[test]
    fn test_excise_flag_off_short_circuits() {
        for flag in [json!(0), json!(false), json!(null), json!(2)] {
            let item = item(json!({
                "excies": flag,
                "item_category": 8,
                "baseuom": 1,
                "base_uom_price": 132.16,
                "base_uom_vol": 0.5
            }));
            assert_eq!(assess(Some(&item), &ctx()), ExciseAssessment::Exempt);
        }
    }

    #[test]
    fn test_unknown_category_is_unscheduled() {
        for category in [0, 1, 2, 6, 7, 9, 42] {
            let item = item(json!({
                "excies": 1,
                "item_category": category,
                "base_uom_price": 500.0
            }));
            assert_eq!(assess(Some(&item), &ctx()), ExciseAssessment::Unscheduled);
            assert_eq!(excise_amount(Some(&item), &ctx()), 0.0);
        }
    }

    #[test]
    fn test_zero_duty_still_counts_as_assessed() {
        let item = item(json!({
            "excies": 1,
            "item_category": 3,
            "base_uom_price": 0
        }));
        assert_eq!(assess(Some(&item), &ctx()), ExciseAssessment::Assessed(0.0));
    }

    #[test]
    fn test_garbage_item_degrades_to_zero() {
        let item = item(json!({
            "excies": "1",
            "item_category": "8",
            "baseuom": {},
            "base_uom_price": "n/a",
            "base_uom_vol": [],
            "base_ulternet_umo_price": "  ",
            "agent_excise": null
        }));
        let ctx = ExciseContext {
            quantity: f64::NAN,
            ..ctx()
        };

        let amount = excise_amount(Some(&item), &ctx);
        assert!(amount.is_finite());
        assert_eq!(amount, 0.0);
    }

    // -------------------------------------------------------------------------
    // Quantity scaling and rounding
    // -------------------------------------------------------------------------

    #[test]
    fn test_quantity_scaling() {
        let item = item(json!({
            "excies": 1,
            "item_category": 8,
            "baseuom": 1,
            "base_uom_price": 132.16,
            "base_uom_vol": 0.5
        }));

        let at = |quantity: f64| {
            excise_amount(
                Some(&item),
                &ExciseContext {
                    uom: 1,
                    quantity,
                    ..ctx()
                },
            )
        };

        assert_eq!(at(1.0), 125.0);
        assert_eq!(at(3.0), 375.0);
        assert_eq!(at(2.5), 312.5);
        // an untouched quantity box prices one unit
        assert_eq!(at(0.0), 125.0);
        // the result never goes below zero
        assert_eq!(at(-2.0), 0.0);
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(0.125), 0.13);
        assert_eq!(round_to_cents(12.344), 12.34);
        assert_eq!(round_to_cents(-0.125), -0.13);
        assert_eq!(round_to_cents(0.0), 0.0);
    }

    #[test]
    fn test_assessment_is_deterministic() {
        let item = channel_rated_item();
        let ctx = ExciseContext {
            channel: SalesChannel::Agent,
            quantity: 7.0,
            ..ctx()
        };

        assert_eq!(assess(Some(&item), &ctx), assess(Some(&item), &ctx));
    }
}
