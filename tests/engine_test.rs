//! End-to-end engine tests over a realistic rate card

use pretty_assertions::assert_eq;
use tarifario::*;

/// A small but realistic rate card: courier with three brackets and an open
/// per-kg bracket, maritime priced only to the islands, a shop service, and
/// a Europe-business service priced to Portugal.
fn rate_card() -> TariffTable {
    TariffTable::from_yaml(
        r#"
name: integration card
meta:
  carrier: Test Carrier
  version: "2026.1"
rows:
  - service: courier24
    weight_from: 0
    weight_to: 1
    rates:
      provincial: { outbound: 5.00, pickup: 5.20, intercity: 5.80, arrival: 4.60 }
      regional:   { outbound: 5.90, pickup: 6.10, intercity: 6.60, arrival: 5.40 }
      national:   { outbound: 7.10, pickup: 7.30, intercity: 7.90, arrival: 6.50 }
      portugal:   { outbound: 9.00, pickup: 9.20, arrival: 8.10 }
  - service: courier24
    weight_from: 1
    weight_to: 3
    rates:
      provincial: { outbound: 6.50, pickup: 6.70, intercity: 7.20, arrival: 6.00 }
      regional:   { outbound: 7.40, pickup: 7.60, intercity: 8.10, arrival: 6.80 }
      national:   { outbound: 8.90, pickup: 9.10, intercity: 9.70, arrival: 8.20 }
      portugal:   { outbound: 11.20, pickup: 11.40, arrival: 10.00 }
  - service: courier24
    weight_from: 3
    weight_to: 10
    rates:
      provincial: { outbound: 9.80, pickup: 10.00, intercity: 10.60, arrival: 9.00 }
      national:   { outbound: 13.40, pickup: 13.60, intercity: 14.20, arrival: 12.30 }
  - service: courier24
    weight_from: 10
    rates:
      provincial: { outbound: 1.20, pickup: 1.25, intercity: 1.40, arrival: 1.00 }
      national:   { outbound: 1.60, pickup: 1.65, intercity: 1.80, arrival: 1.35 }
  - service: maritime
    weight_from: 0
    weight_to: 20
    rates:
      canaries_major: { outbound: 22.00, arrival: 19.00 }
      canaries_minor: { outbound: 26.00, arrival: 22.50 }
      balearics_major: { outbound: 18.00, arrival: 15.50 }
  - service: maritime
    weight_from: 20
    rates:
      canaries_major: { outbound: 6.00, arrival: 5.00 }
      canaries_minor: { outbound: 7.00, arrival: 6.00 }
      balearics_major: { outbound: 1.10, arrival: 0.90 }
  - service: parcelshop
    weight_from: 0
    weight_to: 20
    rates:
      provincial: { outbound: 4.20 }
      national:   { outbound: 5.60 }
  - service: eurobusiness
    weight_from: 0
    weight_to: 5
    rates:
      portugal: { outbound: 10.50, arrival: 9.40 }
"#,
    )
    .unwrap()
}

#[test]
fn validates_clean() {
    assert_eq!(rate_card().validate(), Vec::<String>::new());
}

#[test]
fn bracket_ladder_extrapolates_past_last_finite() {
    // finite [0-1: 5.00][1-3: 6.50], open 1.20/kg, step 1
    let card = TariffTable::from_yaml(
        r#"
rows:
  - service: courier24
    weight_from: 0
    weight_to: 1
    rates:
      provincial: { outbound: 5.00 }
  - service: courier24
    weight_from: 1
    weight_to: 3
    rates:
      provincial: { outbound: 6.50 }
  - service: courier24
    weight_from: 3
    rates:
      provincial: { outbound: 1.20 }
"#,
    )
    .unwrap();
    let at = |w: f64| {
        resolve_bracket_cost(&card, Service::Courier24, Zone::Provincial, Mode::Outbound, w, None)
            .unwrap()
    };
    assert_eq!(at(3.0), 6.50);
    assert_eq!(at(4.0), 7.70);
    assert_eq!(at(5.0), 8.90);
}

#[test]
fn mode_selects_directional_column() {
    let card = rate_card();
    let cost = |mode| {
        resolve_bracket_cost(&card, Service::Courier24, Zone::Provincial, mode, 2.0, None).unwrap()
    };
    assert_eq!(cost(Mode::Outbound), 6.50);
    assert_eq!(cost(Mode::Pickup), 6.70);
    assert_eq!(cost(Mode::Intercity), 7.20);
}

#[test]
fn portugal_has_no_intercity_column() {
    let err = resolve_bracket_cost(
        &rate_card(),
        Service::Courier24,
        Zone::Portugal,
        Mode::Intercity,
        2.0,
        None,
    )
    .unwrap_err();
    assert!(matches!(err, Error::MissingTariff { .. }));
}

#[test]
fn full_quote_with_plan_and_margin() {
    let card = rate_card();
    let plan = Plan {
        group: "VIP".into(),
        service: "courier24".into(),
        kind: PlanKind::Percentage { percent: 10.0 },
    };

    let mut request =
        QuoteRequest::new(Service::Courier24, Mode::Outbound, Package::new(2.0));
    request.linear_discount_percent = 5.0;
    request.margin_percent = Some(30.0);
    let q = quote_zone(&card, &request, Some(&plan), Zone::Provincial);

    assert_eq!(q.breakdown.status, BreakdownStatus::Calculated);
    assert_eq!(q.breakdown.initial_cost, 6.50);
    // linear: 5% of 6.50 = 0.325 -> 0.33; plan: 10% of the 6.00 arrival
    assert_eq!(q.breakdown.linear_discount, 0.33);
    assert_eq!(q.breakdown.plan_discount, 0.60);
    assert_eq!(q.breakdown.total_discount, 0.93);
    assert_eq!(q.breakdown.base_after_discount, 5.57);
    // energy from the original 6.50
    assert_eq!(q.breakdown.energy_surcharge, round_up(6.50 * 0.0705));
    let sale = q.sale_price.unwrap();
    assert_eq!(sale, round_up(q.breakdown.total_cost / 0.70));
}

#[test]
fn volumetric_weight_drives_bracket() {
    let card = rate_card();
    // 1 kg actual, but 40x40x25 cm = 40000 cm3 -> 10 kg at divisor 4000:
    // lands exactly on the 3-10 bracket boundary
    let pkg = Package::new(1.0).with_dimensions(Dimensions::new(40.0, 40.0, 25.0));
    let req = QuoteRequest::new(Service::Courier24, Mode::Outbound, pkg);
    let q = quote_zone(&card, &req, None, Zone::Provincial);
    assert_eq!(q.chargeable_weight_kg, 10.0);
    assert_eq!(q.breakdown.initial_cost, 9.80);
}

#[test]
fn maritime_canaries_bill_per_10kg() {
    let card = rate_card();
    let at = |w: f64| {
        resolve_bracket_cost(&card, Service::Maritime, Zone::CanariesMajor, Mode::Outbound, w, None)
            .unwrap()
    };
    assert_eq!(at(20.0), 22.00);
    assert_eq!(at(21.0), 28.00);
    assert_eq!(at(30.0), 28.00);
    assert_eq!(at(31.0), 34.00);

    // Balearics stay on the 1 kg step even by sea
    let balearics = resolve_bracket_cost(
        &card,
        Service::Maritime,
        Zone::BalearicsMajor,
        Mode::Outbound,
        22.0,
        None,
    )
    .unwrap();
    assert_eq!(balearics, 20.20);
}

#[test]
fn shop_quote_has_no_surcharges() {
    let card = rate_card();
    let req = QuoteRequest::new(Service::ParcelShop, Mode::Outbound, Package::new(3.0));
    let q = quote_zone(&card, &req, None, Zone::National);
    assert_eq!(q.breakdown.initial_cost, 5.60);
    assert_eq!(q.breakdown.total_cost, 5.60);
}

#[test]
fn shop_restriction_is_distinct_from_missing() {
    let card = rate_card();
    let req = QuoteRequest::new(Service::ParcelShop, Mode::Outbound, Package::new(22.0));
    let q = quote_zone(&card, &req, None, Zone::National);
    assert_eq!(q.breakdown.status, BreakdownStatus::NotAvailable);
    assert_eq!(q.reason, Some(UnavailableReason::Restriction));
    assert!(q.detail.is_some());

    // unavailable renders as "not computable", never a zero-cost quote
    assert_eq!(q.sale_price, None);

    let req = QuoteRequest::new(Service::ParcelShop, Mode::Outbound, Package::new(3.0));
    let q = quote_zone(&card, &req, None, Zone::Ceuta);
    assert_eq!(q.reason, Some(UnavailableReason::MissingTariff));
}

#[test]
fn zone_matrix_matches_individual_quotes() {
    let card = rate_card();
    let req = QuoteRequest::new(Service::Courier24, Mode::Outbound, Package::new(2.0));
    let matrix = quote_all_zones(&card, &req, None);
    assert_eq!(matrix.len(), 14);
    for q in &matrix {
        let single = quote_zone(&card, &req, None, q.zone);
        assert_eq!(single.breakdown, q.breakdown, "zone {}", q.zone);
    }
}

#[test]
fn table_round_trips_through_files() {
    let card = rate_card();
    let dir = tempfile::tempdir().unwrap();

    let yaml_path = dir.path().join("card.yaml");
    std::fs::write(&yaml_path, card.to_yaml().unwrap()).unwrap();
    let from_yaml = TariffTable::from_path(&yaml_path).unwrap();
    assert_eq!(from_yaml.rows.len(), card.rows.len());
    assert_eq!(from_yaml.hash(), card.hash());

    let json_path = dir.path().join("card.json");
    std::fs::write(&json_path, card.to_json().unwrap()).unwrap();
    let from_json = TariffTable::from_path(&json_path).unwrap();
    assert_eq!(from_json.rows.len(), card.rows.len());
}

#[test]
fn plan_book_lookup_is_alias_tolerant() {
    let book = PlanBook::from_yaml(
        r#"
plans:
  - group: "Gran Cuenta"
    service: "Marítimo"
    kind: percentage
    percent: 8
"#,
    )
    .unwrap();
    assert!(book.find("gran cuenta", Service::Maritime).is_some());
    assert!(book.find("GRAN  CUENTA", Service::Maritime).is_some());
    assert!(book.find("gran cuenta", Service::Courier24).is_none());
}

#[test]
fn eurobusiness_plan_discounts_portugal_only() {
    let card = rate_card();
    let plan = Plan {
        group: "EU".into(),
        service: "eurobusiness".into(),
        kind: PlanKind::Percentage { percent: 10.0 },
    };
    let req = QuoteRequest::new(Service::EuroBusiness, Mode::Outbound, Package::new(2.0));

    let pt = quote_zone(&card, &req, Some(&plan), Zone::Portugal);
    assert_eq!(pt.breakdown.plan_discount, round_up(9.40 * 0.10));
}
