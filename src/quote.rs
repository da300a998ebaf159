//! Zone quotes
//!
//! Glue over the resolver, the plan discount and the breakdown calculator:
//! one call per zone, or the all-zones matrix the offer documents print. A
//! zone the resolver rejects comes back as a `NotAvailable` breakdown with
//! the reason attached - policy restrictions render differently from missing
//! rate data.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::breakdown::{self, BreakdownInputs, CostBreakdown, FlatFees, IncrementPercents};
use crate::error::Error;
use crate::money::{round_up, sale_price};
use crate::package::Package;
use crate::plan::{resolve_plan_discount, Plan};
use crate::resolver::resolve_bracket_cost;
use crate::service::Service;
use crate::table::TariffTable;
use crate::zone::{Mode, Zone, ALL_ZONES};

/// Why a zone could not be priced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// No priced bracket for the combination - the zone is not offered
    MissingTariff,
    /// A business rule forbids the combination
    Restriction,
}

/// Everything a quote needs besides the tariff table and the plan
#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub service: Service,
    pub mode: Mode,
    pub package: Package,
    /// Linear discount, percent of the initial cost
    pub linear_discount_percent: f64,
    pub increments: IncrementPercents,
    pub fees: FlatFees,
    /// Sale margin percent; `None` skips sale-price computation
    pub margin_percent: Option<f64>,
    /// Manual cost entry replacing the discounted base
    pub baseline_override: Option<f64>,
}

impl QuoteRequest {
    pub fn new(service: Service, mode: Mode, package: Package) -> Self {
        Self {
            service,
            mode,
            package,
            linear_discount_percent: 0.0,
            increments: IncrementPercents::default(),
            fees: FlatFees::default(),
            margin_percent: None,
            baseline_override: None,
        }
    }
}

/// The priced (or rejected) result for one zone
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ZoneQuote {
    pub zone: Zone,
    /// Chargeable weight the quote was priced at, kg
    pub chargeable_weight_kg: f64,
    pub breakdown: CostBreakdown,
    /// Sale price at the requested margin; `None` when no margin was given,
    /// the zone is unavailable, or the margin is not computable (>= 100%)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<UnavailableReason>,
    /// Human-readable restriction detail, when `reason` is a restriction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Price one zone.
pub fn quote_zone(
    table: &TariffTable,
    request: &QuoteRequest,
    plan: Option<&Plan>,
    zone: Zone,
) -> ZoneQuote {
    let weight = request.package.chargeable_weight(request.service);
    let dims = request.package.dimensions;

    let unit_cost = match resolve_bracket_cost(
        table,
        request.service,
        zone,
        request.mode,
        weight,
        dims.as_ref(),
    ) {
        Ok(cost) => cost,
        Err(err) => {
            let (reason, detail) = match &err {
                Error::Restriction(msg) => (UnavailableReason::Restriction, Some(msg.clone())),
                _ => (UnavailableReason::MissingTariff, None),
            };
            return ZoneQuote {
                zone,
                chargeable_weight_kg: weight,
                breakdown: CostBreakdown::not_available(),
                sale_price: None,
                reason: Some(reason),
                detail,
            };
        }
    };

    let quantity = f64::from(request.package.quantity.max(1));
    let initial_cost = round_up(unit_cost * quantity);

    let plan_discount = plan
        .map(|p| {
            let unit = resolve_plan_discount(table, p, request.service, zone, request.mode, weight);
            round_up(unit * quantity)
        })
        .unwrap_or(0.0);

    let breakdown = breakdown::compute(&BreakdownInputs {
        initial_cost,
        service: request.service,
        linear_discount_percent: request.linear_discount_percent,
        plan_discount,
        increments: request.increments,
        fees: request.fees,
        baseline_override: request.baseline_override,
    });

    let sale = request
        .margin_percent
        .and_then(|margin| sale_price(breakdown.total_cost, margin));

    ZoneQuote {
        zone,
        chargeable_weight_kg: weight,
        breakdown,
        sale_price: sale,
        reason: None,
        detail: None,
    }
}

/// Price every zone, in display order - the offer document's zone matrix.
pub fn quote_all_zones(
    table: &TariffTable,
    request: &QuoteRequest,
    plan: Option<&Plan>,
) -> Vec<ZoneQuote> {
    ALL_ZONES
        .into_iter()
        .map(|zone| quote_zone(table, request, plan, zone))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakdown::BreakdownStatus;

    fn table() -> TariffTable {
        TariffTable::from_yaml(
            r#"
rows:
  - service: courier24
    weight_from: 0
    weight_to: 5
    rates:
      provincial: { outbound: 10.00, arrival: 8.00 }
      national:   { outbound: 20.00, arrival: 16.00 }
  - service: courier24
    weight_from: 5
    rates:
      provincial: { outbound: 1.00, arrival: 0.80 }
      national:   { outbound: 2.00, arrival: 1.60 }
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_quote_zone_calculated() {
        let req = QuoteRequest::new(Service::Courier24, Mode::Outbound, Package::new(3.0));
        let q = quote_zone(&table(), &req, None, Zone::Provincial);
        assert_eq!(q.breakdown.status, BreakdownStatus::Calculated);
        assert_eq!(q.chargeable_weight_kg, 3.0);
        assert_eq!(q.breakdown.initial_cost, 10.0);
        assert!(q.reason.is_none());
    }

    #[test]
    fn test_quote_zone_missing() {
        let req = QuoteRequest::new(Service::Courier24, Mode::Outbound, Package::new(3.0));
        let q = quote_zone(&table(), &req, None, Zone::Melilla);
        assert_eq!(q.breakdown.status, BreakdownStatus::NotAvailable);
        assert_eq!(q.reason, Some(UnavailableReason::MissingTariff));
        assert_eq!(q.breakdown.total_cost, 0.0);
    }

    #[test]
    fn test_quantity_multiplies_linearly() {
        let pkg = Package::new(3.0).with_quantity(4);
        let req = QuoteRequest::new(Service::Courier24, Mode::Outbound, pkg);
        let q = quote_zone(&table(), &req, None, Zone::Provincial);
        assert_eq!(q.breakdown.initial_cost, 40.0);
    }

    #[test]
    fn test_margin_flows_to_sale_price() {
        let mut req = QuoteRequest::new(Service::Courier24, Mode::Outbound, Package::new(3.0));
        req.margin_percent = Some(50.0);
        let q = quote_zone(&table(), &req, None, Zone::Provincial);
        assert_eq!(q.sale_price, Some(round_up(q.breakdown.total_cost * 2.0)));

        // margin >= 100% is not computable, not infinite
        req.margin_percent = Some(100.0);
        let q = quote_zone(&table(), &req, None, Zone::Provincial);
        assert_eq!(q.sale_price, None);
    }

    #[test]
    fn test_all_zones_matrix_order_and_size() {
        let req = QuoteRequest::new(Service::Courier24, Mode::Outbound, Package::new(1.0));
        let quotes = quote_all_zones(&table(), &req, None);
        assert_eq!(quotes.len(), ALL_ZONES.len());
        assert_eq!(quotes[0].zone, Zone::Provincial);
        let priced = quotes
            .iter()
            .filter(|q| q.breakdown.status == BreakdownStatus::Calculated)
            .count();
        assert_eq!(priced, 2); // provincial + national only
    }

    #[test]
    fn test_plan_discount_applies_per_package() {
        let plan = Plan {
            group: "VIP".into(),
            service: "courier24".into(),
            kind: crate::plan::PlanKind::Percentage { percent: 10.0 },
        };
        let pkg = Package::new(3.0).with_quantity(2);
        let req = QuoteRequest::new(Service::Courier24, Mode::Outbound, pkg);
        let q = quote_zone(&table(), &req, Some(&plan), Zone::Provincial);
        // per-unit discount 10% of arrival 8.00 = 0.80, times 2 packages
        assert_eq!(q.breakdown.plan_discount, 1.60);
    }
}
