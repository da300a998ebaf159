//! Tariff bracket resolution
//!
//! Maps (service, zone, mode, chargeable weight) to a base monetary cost, or
//! one of the two lookup failures: `MissingTariff` (no priced bracket) and
//! `Restriction` (a policy forbids the combination).
//!
//! Weights inside a finite bracket cost that bracket's rate. Weights past the
//! last finite bracket extrapolate: `base + ceil(extra / step) * open_rate`,
//! where `step` is 1 kg except for the maritime service shipping to the
//! Canary zones, which bills sea freight in 10 kg units.

use crate::error::{Error, Result};
use crate::money::round_up;
use crate::package::Dimensions;
use crate::service::{Service, SHOP_MAX_DIM_SUM_CM, SHOP_MAX_WEIGHT_KG};
use crate::table::{Bracket, TariffTable};
use crate::zone::{Mode, Zone};

/// Extrapolation step in kg for a (service, zone) pair.
///
/// Normally 1 kg. The maritime service to the Canary groups bills per started
/// 10 kg - a documented special case, not a general rule.
pub fn extrapolation_step(service: Service, zone: Zone) -> f64 {
    if service.terms().is_maritime && zone.is_canaries() {
        10.0
    } else {
        1.0
    }
}

/// Policy pre-check for the parcel-shop network: runs before any bracket
/// lookup so an oversized package reports "restriction", not "missing
/// tariff".
pub fn check_restrictions(
    service: Service,
    weight_kg: f64,
    dims: Option<&Dimensions>,
) -> Result<()> {
    if !service.terms().is_shop {
        return Ok(());
    }
    if weight_kg > SHOP_MAX_WEIGHT_KG {
        return Err(Error::Restriction(format!(
            "parcel-shop packages are limited to {SHOP_MAX_WEIGHT_KG} kg (got {weight_kg} kg)"
        )));
    }
    if let Some(d) = dims {
        let sum = d.linear_sum_cm();
        if sum > SHOP_MAX_DIM_SUM_CM {
            return Err(Error::Restriction(format!(
                "parcel-shop packages are limited to {SHOP_MAX_DIM_SUM_CM} cm summed sides (got {sum} cm)"
            )));
        }
    }
    Ok(())
}

/// Resolve the base cost for one package unit.
///
/// `weight_kg` is the chargeable weight; it is ceiling'd here again so direct
/// callers get the same integer-kg semantics as [`crate::package::Package`].
/// Weights `<= 0` price at 0.
pub fn resolve_bracket_cost(
    table: &TariffTable,
    service: Service,
    zone: Zone,
    mode: Mode,
    weight_kg: f64,
    dims: Option<&Dimensions>,
) -> Result<f64> {
    check_restrictions(service, weight_kg, dims)?;

    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Ok(0.0);
    }
    let target = weight_kg.ceil();

    let set = table.bracket_set(service, zone, mode);
    let missing = || Error::MissingTariff { service, zone, mode, weight_kg: target };

    if set.finite.is_empty() {
        return Err(missing());
    }

    let chosen = set.select(target).ok_or_else(missing)?;
    let (to, base) = match chosen {
        Bracket::Finite { to, rate, .. } => (to, rate.ok_or_else(missing)?),
        Bracket::Open { .. } => unreachable!("select() only returns finite brackets"),
    };

    if target <= to {
        return Ok(round_up(base));
    }

    // Extrapolate past the last finite bracket with the open per-unit rate.
    let open_rate = match set.open {
        Some(Bracket::Open { rate: Some(r), .. }) => r,
        _ => return Err(missing()),
    };
    let step = extrapolation_step(service, zone);
    let units = ((target - to) / step).ceil();
    Ok(round_up(base + units * open_rate))
}
