//! Destination zones and shipping modes
//!
//! The zone set is fixed business configuration: peninsular Spain split into
//! provincial/regional/national reach, the Iberian neighbours, and the island
//! territories split into major/minor ports. Tariff rows price each zone with
//! up to three directional rates; [`Mode`] selects the column.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Destination zone for a shipment
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Provincial,
    Regional,
    National,
    Portugal,
    MadeiraAzoresMajor,
    MadeiraAzoresMinor,
    Andorra,
    Gibraltar,
    CanariesMajor,
    CanariesMinor,
    BalearicsMajor,
    BalearicsMinor,
    Ceuta,
    Melilla,
}

/// All zones, in display order (the order the offer documents list them).
pub const ALL_ZONES: [Zone; 14] = [
    Zone::Provincial,
    Zone::Regional,
    Zone::National,
    Zone::Portugal,
    Zone::Andorra,
    Zone::Gibraltar,
    Zone::BalearicsMajor,
    Zone::BalearicsMinor,
    Zone::CanariesMajor,
    Zone::CanariesMinor,
    Zone::MadeiraAzoresMajor,
    Zone::MadeiraAzoresMinor,
    Zone::Ceuta,
    Zone::Melilla,
];

impl Zone {
    /// Canonical snake_case identifier, matching the serde representation.
    pub fn key(&self) -> &'static str {
        match self {
            Zone::Provincial => "provincial",
            Zone::Regional => "regional",
            Zone::National => "national",
            Zone::Portugal => "portugal",
            Zone::MadeiraAzoresMajor => "madeira_azores_major",
            Zone::MadeiraAzoresMinor => "madeira_azores_minor",
            Zone::Andorra => "andorra",
            Zone::Gibraltar => "gibraltar",
            Zone::CanariesMajor => "canaries_major",
            Zone::CanariesMinor => "canaries_minor",
            Zone::BalearicsMajor => "balearics_major",
            Zone::BalearicsMinor => "balearics_minor",
            Zone::Ceuta => "ceuta",
            Zone::Melilla => "melilla",
        }
    }

    /// Human-readable name used in CLI tables.
    pub fn display_name(&self) -> &'static str {
        match self {
            Zone::Provincial => "Provincial",
            Zone::Regional => "Regional",
            Zone::National => "National",
            Zone::Portugal => "Portugal",
            Zone::MadeiraAzoresMajor => "Madeira/Azores (major)",
            Zone::MadeiraAzoresMinor => "Madeira/Azores (minor)",
            Zone::Andorra => "Andorra",
            Zone::Gibraltar => "Gibraltar",
            Zone::CanariesMajor => "Canaries (major)",
            Zone::CanariesMinor => "Canaries (minor)",
            Zone::BalearicsMajor => "Balearics (major)",
            Zone::BalearicsMinor => "Balearics (minor)",
            Zone::Ceuta => "Ceuta",
            Zone::Melilla => "Melilla",
        }
    }

    /// Peninsular domestic zones: the only zones commercial plan discounts
    /// apply to (Portugal is added for the Europe-business service only).
    pub fn is_domestic(&self) -> bool {
        matches!(self, Zone::Provincial | Zone::Regional | Zone::National)
    }

    /// Canary island zones: the pair that takes the 10 kg extrapolation step
    /// on the maritime service.
    pub fn is_canaries(&self) -> bool {
        matches!(self, Zone::CanariesMajor | Zone::CanariesMinor)
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Shipping mode: which directional rate column of a tariff row applies
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Outbound delivery from the customer's province
    Outbound,
    /// Pickup at origin, billed to the customer
    Pickup,
    /// Origin and destination both away from the customer's province
    Intercity,
}

impl Mode {
    pub fn key(&self) -> &'static str {
        match self {
            Mode::Outbound => "outbound",
            Mode::Pickup => "pickup",
            Mode::Intercity => "intercity",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_zones_unique() {
        let mut seen = std::collections::HashSet::new();
        for z in ALL_ZONES {
            assert!(seen.insert(z), "duplicate zone {z}");
        }
        assert_eq!(seen.len(), 14);
    }

    #[test]
    fn test_domestic_set() {
        assert!(Zone::Provincial.is_domestic());
        assert!(Zone::National.is_domestic());
        assert!(!Zone::Portugal.is_domestic());
        assert!(!Zone::CanariesMajor.is_domestic());
    }

    #[test]
    fn test_serde_keys() {
        let json = serde_json::to_string(&Zone::MadeiraAzoresMinor).unwrap();
        assert_eq!(json, "\"madeira_azores_minor\"");
        let back: Zone = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Zone::MadeiraAzoresMinor);
        assert_eq!(serde_json::to_string(&Mode::Intercity).unwrap(), "\"intercity\"");
    }
}
