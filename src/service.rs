//! Service catalog
//!
//! Five canonical services, each carrying the per-service business terms the
//! engine keys on: energy surcharge rate, volumetric conversion divisor,
//! whether the shop restriction pre-check applies, and the maritime /
//! Europe-business flags. These are static configuration: tariff rows refer
//! to services by name, never redefine their terms.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Energy surcharge rate applied to most services (7.05% of the initial cost).
pub const ENERGY_RATE: f64 = 0.0705;

/// Parcel-shop network limits: anything heavier, or with a larger sum of the
/// three sides, is rejected by policy before any bracket lookup.
pub const SHOP_MAX_WEIGHT_KG: f64 = 20.0;
pub const SHOP_MAX_DIM_SUM_CM: f64 = 210.0;

/// A canonical service
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    /// Next-day courier
    Courier24,
    /// Road economy
    Economy,
    /// Delivery to a parcel-shop pickup point
    ParcelShop,
    /// Sea freight to the islands
    Maritime,
    /// Road groupage to Portugal / Europe
    EuroBusiness,
}

/// All services, in catalog order.
pub const ALL_SERVICES: [Service; 5] = [
    Service::Courier24,
    Service::Economy,
    Service::ParcelShop,
    Service::Maritime,
    Service::EuroBusiness,
];

/// Per-service business terms
#[derive(Debug, Clone, Copy, Serialize, JsonSchema)]
pub struct ServiceTerms {
    /// Energy surcharge rate (fraction of initial cost; 0 where exempt)
    pub energy_rate: f64,
    /// Divisor for volumetric weight: kg = (h x w x l cm3) / divisor
    pub volumetric_divisor: f64,
    /// Shop services waive the five named surcharges and enforce the
    /// weight/dimension restriction pre-check
    pub is_shop: bool,
    /// Maritime services take the widened 10 kg extrapolation step to the
    /// Canary zones
    pub is_maritime: bool,
    /// Europe-business services allow plan discounts on Portugal only
    pub is_euro_business: bool,
}

impl Service {
    /// Canonical snake_case identifier, matching the serde representation.
    pub fn key(&self) -> &'static str {
        match self {
            Service::Courier24 => "courier24",
            Service::Economy => "economy",
            Service::ParcelShop => "parcelshop",
            Service::Maritime => "maritime",
            Service::EuroBusiness => "eurobusiness",
        }
    }

    /// Human-readable name used in CLI tables.
    pub fn display_name(&self) -> &'static str {
        match self {
            Service::Courier24 => "Courier 24h",
            Service::Economy => "Economy",
            Service::ParcelShop => "Parcel Shop",
            Service::Maritime => "Maritime",
            Service::EuroBusiness => "Euro Business",
        }
    }

    /// Business terms for this service.
    ///
    /// The energy surcharge is exempt for the parcel-shop and maritime
    /// services; everyone else pays [`ENERGY_RATE`].
    pub fn terms(&self) -> ServiceTerms {
        match self {
            Service::Courier24 => ServiceTerms {
                energy_rate: ENERGY_RATE,
                volumetric_divisor: 4000.0,
                is_shop: false,
                is_maritime: false,
                is_euro_business: false,
            },
            Service::Economy => ServiceTerms {
                energy_rate: ENERGY_RATE,
                volumetric_divisor: 4000.0,
                is_shop: false,
                is_maritime: false,
                is_euro_business: false,
            },
            Service::ParcelShop => ServiceTerms {
                energy_rate: 0.0,
                volumetric_divisor: 4000.0,
                is_shop: true,
                is_maritime: false,
                is_euro_business: false,
            },
            Service::Maritime => ServiceTerms {
                energy_rate: 0.0,
                volumetric_divisor: 3000.0,
                is_shop: false,
                is_maritime: true,
                is_euro_business: false,
            },
            Service::EuroBusiness => ServiceTerms {
                energy_rate: ENERGY_RATE,
                volumetric_divisor: 5000.0,
                is_shop: false,
                is_maritime: false,
                is_euro_business: true,
            },
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_energy_exemptions() {
        assert_eq!(Service::ParcelShop.terms().energy_rate, 0.0);
        assert_eq!(Service::Maritime.terms().energy_rate, 0.0);
        assert_eq!(Service::Courier24.terms().energy_rate, ENERGY_RATE);
        assert_eq!(Service::Economy.terms().energy_rate, ENERGY_RATE);
        assert_eq!(Service::EuroBusiness.terms().energy_rate, ENERGY_RATE);
    }

    #[test]
    fn test_flags_are_exclusive() {
        for s in ALL_SERVICES {
            let t = s.terms();
            let flags = [t.is_shop, t.is_maritime, t.is_euro_business];
            assert!(flags.iter().filter(|f| **f).count() <= 1, "{s} overlaps");
        }
    }

    #[test]
    fn test_volumetric_divisors_positive() {
        for s in ALL_SERVICES {
            assert!(s.terms().volumetric_divisor > 0.0);
        }
    }
}
