//! Commercial plan discounts
//!
//! A plan book names discount schemes negotiated per customer group; each
//! plan applies to exactly one service. Percentage and custom plans derive a
//! monetary discount from the tariff's "arrival" reference rate (a distinct
//! column from the directional base rates), so the discount tracks what the
//! carrier itself charges the reseller for that zone and weight.
//!
//! ## Example plan book
//!
//! ```yaml
//! plans:
//!   - group: VIP
//!     service: courier24
//!     kind: percentage
//!     percent: 12
//!   - group: VIP
//!     service: maritime
//!     kind: custom
//!     brackets: { up_to_1: 10, up_to_3: 11, up_to_5: 12, up_to_10: 14, up_to_15: 16, over_15: 20 }
//!   - group: FLAT5
//!     service: economy
//!     kind: fixed
//!     amount: 5
//! ```

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::canon;
use crate::error::{Error, Result};
use crate::money::{round_up, sanitize};
use crate::resolver::extrapolation_step;
use crate::service::Service;
use crate::table::{Bracket, TariffTable};
use crate::zone::{Mode, Zone};

/// Discount percentages over the six standard weight brackets
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlanBrackets {
    pub up_to_1: f64,
    pub up_to_3: f64,
    pub up_to_5: f64,
    pub up_to_10: f64,
    pub up_to_15: f64,
    pub over_15: f64,
}

impl PlanBrackets {
    /// Percentage for a chargeable weight.
    pub fn percent_for(&self, weight_kg: f64) -> f64 {
        if weight_kg <= 1.0 {
            self.up_to_1
        } else if weight_kg <= 3.0 {
            self.up_to_3
        } else if weight_kg <= 5.0 {
            self.up_to_5
        } else if weight_kg <= 10.0 {
            self.up_to_10
        } else if weight_kg <= 15.0 {
            self.up_to_15
        } else {
            self.over_15
        }
    }
}

/// How a plan computes its discount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanKind {
    /// Flat percentage off the arrival reference rate
    Percentage { percent: f64 },
    /// Flat amount off, independent of weight and zone
    Fixed { amount: f64 },
    /// Weight-bracketed percentages off the arrival reference rate
    Custom { brackets: PlanBrackets },
}

/// One named discount plan, applicable to one service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Plan {
    /// Plan group name (the commercial offer the customer is on)
    pub group: String,

    /// Service name this plan applies to
    pub service: String,

    #[serde(flatten)]
    pub kind: PlanKind,
}

impl Plan {
    /// Percentage applicable at a weight; fixed plans have none.
    fn percent_for(&self, weight_kg: f64) -> Option<f64> {
        match &self.kind {
            PlanKind::Percentage { percent } => Some(*percent),
            PlanKind::Custom { brackets } => Some(brackets.percent_for(weight_kg)),
            PlanKind::Fixed { .. } => None,
        }
    }
}

/// A book of discount plans, keyed by (group, service)
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "Plan Book", description = "Commercial discount plans by group and service")]
pub struct PlanBook {
    #[serde(default)]
    pub plans: Vec<Plan>,
}

impl PlanBook {
    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_norway::from_str(yaml).map_err(|e| Error::PlanBook(e.to_string()))
    }

    /// Parse from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::PlanBook(e.to_string()))
    }

    /// Load from a `.yaml`/`.yml` or `.json` file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }

    /// Find the plan a (group, service) pair maps to.
    pub fn find(&self, group: &str, service: Service) -> Option<&Plan> {
        let group_norm = canon::normalize(group);
        self.plans.iter().find(|p| {
            canon::normalize(&p.group) == group_norm
                && canon::resolve_service(&p.service) == Some(service)
        })
    }

    /// Validate structural invariants. Returns human-readable problems.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = std::collections::HashSet::new();
        for (i, plan) in self.plans.iter().enumerate() {
            if plan.group.trim().is_empty() {
                errors.push(format!("Plan {i}: empty group name"));
            }
            if canon::resolve_service(&plan.service).is_none() {
                errors.push(format!("Plan {i}: unknown service '{}'", plan.service));
            }
            if !seen.insert((canon::normalize(&plan.group), canon::resolve_service(&plan.service))) {
                errors.push(format!(
                    "Duplicate plan for group '{}' and service '{}'",
                    plan.group, plan.service
                ));
            }
            match &plan.kind {
                PlanKind::Percentage { percent } => {
                    if !(0.0..=100.0).contains(percent) {
                        errors.push(format!("Plan {i}: percent {percent} out of range"));
                    }
                }
                PlanKind::Fixed { amount } => {
                    if !amount.is_finite() || *amount < 0.0 {
                        errors.push(format!("Plan {i}: invalid fixed amount {amount}"));
                    }
                }
                PlanKind::Custom { brackets } => {
                    for (label, pct) in [
                        ("up_to_1", brackets.up_to_1),
                        ("up_to_3", brackets.up_to_3),
                        ("up_to_5", brackets.up_to_5),
                        ("up_to_10", brackets.up_to_10),
                        ("up_to_15", brackets.up_to_15),
                        ("over_15", brackets.over_15),
                    ] {
                        if !(0.0..=100.0).contains(&pct) {
                            errors.push(format!("Plan {i}: {label} percent {pct} out of range"));
                        }
                    }
                }
            }
        }
        errors
    }
}

/// Whether plan discounts apply at all for this (service, zone, mode).
///
/// Business rules, preserved exactly: discounts only apply to the peninsular
/// domestic zones - except the Europe-business service, which discounts
/// Portugal and nothing else - and never to intercity shipping.
pub fn plan_applies(service: Service, zone: Zone, mode: Mode) -> bool {
    if mode == Mode::Intercity {
        return false;
    }
    if service.terms().is_euro_business {
        zone == Zone::Portugal
    } else {
        zone.is_domestic()
    }
}

/// Compute the monetary discount a plan yields for a shipment.
///
/// Returns 0 when the plan does not apply (wrong service, excluded zone,
/// intercity mode) or when the reference rate is not priced - a discount is
/// an optional benefit, never a pricing failure. The caller caps the result
/// (together with any linear discount) at the initial cost.
pub fn resolve_plan_discount(
    table: &TariffTable,
    plan: &Plan,
    service: Service,
    zone: Zone,
    mode: Mode,
    weight_kg: f64,
) -> f64 {
    if canon::resolve_service(&plan.service) != Some(service) {
        return 0.0;
    }
    if !plan_applies(service, zone, mode) {
        return 0.0;
    }

    if let PlanKind::Fixed { amount } = plan.kind {
        return round_up(sanitize(amount));
    }

    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return 0.0;
    }
    let target = weight_kg.ceil();

    let set = table.bracket_set(service, zone, mode);
    let Some(Bracket::Finite { to, arrival, .. }) = set.select(target) else {
        return 0.0;
    };

    let percent = plan.percent_for(target).unwrap_or(0.0);
    let mut discount = match arrival {
        Some(rate) => round_up(rate * percent / 100.0),
        None => 0.0,
    };

    // Past the top finite bracket the extra units are discounted with the
    // open bracket's reference rate and the percentage of the bracket one
    // step above the threshold.
    if target > to {
        if let Some(Bracket::Open { arrival: Some(rate), .. }) = set.open {
            let step = extrapolation_step(service, zone);
            let units = ((target - to) / step).ceil();
            let pct_above = plan.percent_for(to + 1.0).unwrap_or(0.0);
            discount += round_up(rate * units * pct_above / 100.0);
        }
    }

    discount
}
