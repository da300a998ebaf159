//! Itemized cost breakdown
//!
//! The deterministic heart of the engine: given a base cost and the named
//! surcharge/discount parameters, produce the fully itemized breakdown an
//! offer document prints. Every line item is rounded up to the cent on its
//! own *before* any summation, so the printed items always sum to the
//! printed totals with zero float drift.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::money::{round_up, sanitize};
use crate::service::Service;

/// Climate-protection surcharge, percent of the initial cost.
pub const CLIMATE_PERCENT: f64 = 1.5;
/// Coverage-extension surcharge, percent of the initial cost.
pub const COVERAGE_PERCENT: f64 = 1.95;
/// Fixed network canon, euros per shipment.
pub const CANON_NETWORK: f64 = 0.27;
/// Fixed digital canon, euros per shipment.
pub const CANON_DIGITAL: f64 = 0.06;
/// Fixed non-volumetric handling canon, euros per shipment.
pub const CANON_NON_VOLUMETRIC: f64 = 0.04;

/// Year-over-year increment percentages, applied to the original initial
/// cost (list-price growth, not the negotiated cost - see [`compute`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IncrementPercents {
    pub year1: f64,
    pub year2: f64,
    pub year3: f64,
}

/// Free-form flat fees entered per offer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FlatFees {
    /// Editable flat surcharge added after the increments
    pub spc: f64,
    /// Negotiated supplements
    pub supplements: f64,
    /// Irregular-package surcharge
    pub irregular: f64,
    /// Mileage fee
    pub mileage: f64,
    /// Saturday-delivery fee
    pub saturday: f64,
}

/// Calculation state of one zone's breakdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownStatus {
    /// No input yet
    #[default]
    Idle,
    /// Valid weight and (service, zone) combination resolved
    Calculated,
    /// Terminal for this input set: missing tariff or a restriction.
    /// Renders as "not computable", never as a zero cost.
    NotAvailable,
}

/// Inputs to [`compute`]
#[derive(Debug, Clone, Copy)]
pub struct BreakdownInputs {
    /// Raw initial (base tariff) cost
    pub initial_cost: f64,
    /// Service whose terms drive the energy rate and surcharge waiving
    pub service: Service,
    /// Linear discount, percent of the initial cost
    pub linear_discount_percent: f64,
    /// Plan discount amount (from [`crate::plan::resolve_plan_discount`])
    pub plan_discount: f64,
    /// Year increment percentages
    pub increments: IncrementPercents,
    /// Flat fees
    pub fees: FlatFees,
    /// Manual cost entry: replaces the discounted base and voids both
    /// discounts when present
    pub baseline_override: Option<f64>,
}

impl BreakdownInputs {
    pub fn new(initial_cost: f64, service: Service) -> Self {
        Self {
            initial_cost,
            service,
            linear_discount_percent: 0.0,
            plan_discount: 0.0,
            increments: IncrementPercents::default(),
            fees: FlatFees::default(),
            baseline_override: None,
        }
    }
}

/// Fully itemized breakdown. Every monetary field is already rounded; the
/// sums hold exactly in cents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CostBreakdown {
    pub status: BreakdownStatus,

    /// Rounded original initial cost
    pub initial_cost: f64,

    /// Linear discount amount
    pub linear_discount: f64,
    /// Plan discount amount
    pub plan_discount: f64,
    /// Capped total discount: never exceeds the initial cost
    pub total_discount: f64,
    /// Initial cost minus the capped discount, or the baseline override
    pub base_after_discount: f64,

    pub climate_surcharge: f64,
    pub coverage_surcharge: f64,
    pub network_canon: f64,
    pub digital_canon: f64,
    pub non_volumetric_canon: f64,
    pub energy_surcharge: f64,

    pub supplements: f64,
    pub irregular_surcharge: f64,
    pub mileage: f64,
    pub saturday_fee: f64,

    /// Base + surcharges + energy + flat extras
    pub subtotal: f64,

    /// Year increment amounts, each from the original initial cost
    pub increment_year1: f64,
    pub increment_year2: f64,
    pub increment_year3: f64,
    /// The increment percentages as given
    pub increment_percents: IncrementPercents,

    /// Flat editable surcharge added with the increments
    pub spc: f64,

    pub total_cost: f64,
}

impl CostBreakdown {
    /// Breakdown for a zone the resolver reported as not available.
    pub fn not_available() -> Self {
        Self {
            status: BreakdownStatus::NotAvailable,
            ..Self::default()
        }
    }
}

/// Compute the itemized breakdown.
///
/// Ordering contract: every amount is independently rounded via
/// [`round_up`] before it is summed downstream, and the five named
/// surcharges, the energy surcharge and the year increments are all computed
/// from the *original* initial cost - never the discounted base, and (for
/// the increments, deliberately) not the baseline override either: the
/// increments track list-price growth, not the negotiated cost.
pub fn compute(inputs: &BreakdownInputs) -> CostBreakdown {
    let terms = inputs.service.terms();
    let initial = round_up(inputs.initial_cost);

    // Discounts - voided entirely by a manual baseline override.
    let (linear, plan, total_discount, base_after) = match inputs.baseline_override {
        Some(manual) => (0.0, 0.0, 0.0, round_up(manual)),
        None => {
            let linear = round_up(initial * sanitize(inputs.linear_discount_percent) / 100.0);
            let plan = round_up(inputs.plan_discount);
            let total = round_up((linear + plan).min(initial));
            let base = round_up(initial - total);
            (linear, plan, total, base)
        }
    };

    // The five named surcharges are zero for the shop service by contract.
    let (climate, coverage, network, digital, non_volumetric) = if terms.is_shop {
        (0.0, 0.0, 0.0, 0.0, 0.0)
    } else {
        (
            round_up(initial * CLIMATE_PERCENT / 100.0),
            round_up(initial * COVERAGE_PERCENT / 100.0),
            CANON_NETWORK,
            CANON_DIGITAL,
            CANON_NON_VOLUMETRIC,
        )
    };
    let energy = round_up(initial * terms.energy_rate);

    let supplements = round_up(inputs.fees.supplements);
    let irregular = round_up(inputs.fees.irregular);
    let mileage = round_up(inputs.fees.mileage);
    let saturday = round_up(inputs.fees.saturday);

    let subtotal = round_up(
        base_after
            + climate
            + coverage
            + network
            + digital
            + non_volumetric
            + energy
            + supplements
            + irregular
            + mileage
            + saturday,
    );

    let inc1 = round_up(initial * sanitize(inputs.increments.year1) / 100.0);
    let inc2 = round_up(initial * sanitize(inputs.increments.year2) / 100.0);
    let inc3 = round_up(initial * sanitize(inputs.increments.year3) / 100.0);
    let spc = round_up(inputs.fees.spc);

    let total_cost = round_up(subtotal + inc1 + inc2 + inc3 + spc);

    CostBreakdown {
        status: BreakdownStatus::Calculated,
        initial_cost: initial,
        linear_discount: linear,
        plan_discount: plan,
        total_discount,
        base_after_discount: base_after,
        climate_surcharge: climate,
        coverage_surcharge: coverage,
        network_canon: network,
        digital_canon: digital,
        non_volumetric_canon: non_volumetric,
        energy_surcharge: energy,
        supplements,
        irregular_surcharge: irregular,
        mileage,
        saturday_fee: saturday,
        subtotal,
        increment_year1: inc1,
        increment_year2: inc2,
        increment_year3: inc3,
        increment_percents: inputs.increments,
        spc,
        total_cost,
    }
}
