//! Canonical name resolution
//!
//! Tariff rows and plan books come out of spreadsheets and remote tables with
//! free-text service and zone names ("Marítimo", "BALEARES  mayores", ...).
//! This module is the only place such text is interpreted: it normalizes case,
//! accents and whitespace, then matches against a fixed alias list. The
//! pricing engine itself only ever sees [`Service`] and [`Zone`] enum values;
//! an unknown name resolves to `None`, never to a guess.

use std::sync::OnceLock;

use regex::Regex;

use crate::service::Service;
use crate::zone::Zone;

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s_\-/]+").expect("static regex"))
}

/// Lowercase, strip the accents that appear in Spanish source data, and
/// collapse runs of whitespace/underscores/hyphens to single spaces.
///
/// # Examples
/// ```
/// use tarifario::canon::normalize;
/// assert_eq!(normalize("  Marítimo  "), "maritimo");
/// assert_eq!(normalize("BALEARES-mayores"), "baleares mayores");
/// ```
pub fn normalize(raw: &str) -> String {
    let folded: String = raw
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            'ç' => 'c',
            _ => c,
        })
        .collect();
    whitespace_re()
        .replace_all(folded.trim(), " ")
        .trim()
        .to_string()
}

/// Resolve a free-text service name to a canonical [`Service`].
pub fn resolve_service(raw: &str) -> Option<Service> {
    match normalize(raw).as_str() {
        "courier24" | "courier 24" | "courier 24h" | "24h" | "urgente" | "urgente 24" => {
            Some(Service::Courier24)
        }
        "economy" | "economico" | "48h" | "road" => Some(Service::Economy),
        "parcelshop" | "parcel shop" | "shop" | "punto de recogida" | "tienda" => {
            Some(Service::ParcelShop)
        }
        "maritime" | "maritimo" | "sea" | "barco" => Some(Service::Maritime),
        "eurobusiness" | "euro business" | "euro business parcel" | "ebp" | "europa" => {
            Some(Service::EuroBusiness)
        }
        _ => None,
    }
}

/// Resolve a free-text zone name to a canonical [`Zone`].
pub fn resolve_zone(raw: &str) -> Option<Zone> {
    match normalize(raw).as_str() {
        "provincial" | "provincia" => Some(Zone::Provincial),
        "regional" | "region" => Some(Zone::Regional),
        "national" | "nacional" | "peninsula" => Some(Zone::National),
        "portugal" => Some(Zone::Portugal),
        "madeira azores major" | "madeira capital" | "madeira azores mayores" => {
            Some(Zone::MadeiraAzoresMajor)
        }
        "madeira azores minor" | "madeira resto" | "madeira azores menores" => {
            Some(Zone::MadeiraAzoresMinor)
        }
        "andorra" => Some(Zone::Andorra),
        "gibraltar" => Some(Zone::Gibraltar),
        "canaries major" | "canarias mayores" | "canarias capital" => Some(Zone::CanariesMajor),
        "canaries minor" | "canarias menores" | "canarias resto" => Some(Zone::CanariesMinor),
        "balearics major" | "baleares mayores" | "baleares capital" => Some(Zone::BalearicsMajor),
        "balearics minor" | "baleares menores" | "baleares resto" => Some(Zone::BalearicsMinor),
        "ceuta" => Some(Zone::Ceuta),
        "melilla" => Some(Zone::Melilla),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Marítimo  "), "maritimo");
        assert_eq!(normalize("Canarias_MENORES"), "canarias menores");
        assert_eq!(normalize("euro-business"), "euro business");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_resolve_service() {
        assert_eq!(resolve_service("Marítimo"), Some(Service::Maritime));
        assert_eq!(resolve_service("COURIER 24H"), Some(Service::Courier24));
        assert_eq!(resolve_service("parcel shop"), Some(Service::ParcelShop));
        assert_eq!(resolve_service("telegram"), None);
    }

    #[test]
    fn test_resolve_zone() {
        assert_eq!(resolve_zone("Baleares mayores"), Some(Zone::BalearicsMajor));
        assert_eq!(resolve_zone("NACIONAL"), Some(Zone::National));
        assert_eq!(resolve_zone("canaries_minor"), Some(Zone::CanariesMinor));
        assert_eq!(resolve_zone("marte"), None);
    }

    #[test]
    fn test_canonical_keys_resolve_to_themselves() {
        for z in crate::zone::ALL_ZONES {
            assert_eq!(resolve_zone(z.key()), Some(z), "zone key {}", z.key());
        }
        for s in crate::service::ALL_SERVICES {
            assert_eq!(resolve_service(s.key()), Some(s), "service key {}", s.key());
        }
    }
}
