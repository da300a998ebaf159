//! Tariff table - the core data model
//!
//! A `TariffTable` is the wholesale load of a carrier's rate card: one row per
//! (service, weight bracket), each row pricing every destination zone with up
//! to three directional rates plus the "arrival" reference rate plan
//! discounts are computed from.
//!
//! ## Example table
//!
//! ```yaml
//! name: "Reseller rate card 2026"
//! rows:
//!   - service: courier24
//!     weight_from: 0
//!     weight_to: 1
//!     rates:
//!       provincial: { outbound: 3.10, pickup: 3.10, intercity: 3.45, arrival: 2.95 }
//!       national:   { outbound: 5.60, pickup: 5.60, intercity: 6.10, arrival: 5.20 }
//!   - service: courier24
//!     weight_from: 1
//!     rates:                       # no weight_to: open / per-extra-kg bracket
//!       provincial: { outbound: 0.35, arrival: 0.30 }
//! ```
//!
//! Open-endedness is detected once, at projection time, and becomes an
//! explicit [`Bracket::Open`] variant - the resolver never sniffs sentinels.

use std::collections::BTreeMap;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::canon;
use crate::error::{Error, Result};
use crate::service::Service;
use crate::zone::{Mode, Zone};

/// Legacy rate cards mark the open bracket with a huge upper bound instead of
/// omitting it; anything at or past this is treated as open.
pub const OPEN_WEIGHT_SENTINEL: f64 = 9999.0;

/// Rates for one zone within one row. Missing fields mean "not priced".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RateCell {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outbound: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intercity: Option<f64>,
    /// Reference "arrival" rate, used only for plan-discount math
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival: Option<f64>,
}

impl RateCell {
    /// Typed directional lookup - the only place a [`Mode`] picks a column.
    pub fn for_mode(&self, mode: Mode) -> Option<f64> {
        match mode {
            Mode::Outbound => self.outbound,
            Mode::Pickup => self.pickup,
            Mode::Intercity => self.intercity,
        }
    }

    fn is_empty(&self) -> bool {
        self.outbound.is_none()
            && self.pickup.is_none()
            && self.intercity.is_none()
            && self.arrival.is_none()
    }
}

/// One priced weight range for one service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TariffRow {
    /// Service name as it appears in the source data; resolved through
    /// [`canon::resolve_service`] when the table is queried
    pub service: String,

    /// Lower bound (exclusive except for the first bracket), kg
    pub weight_from: f64,

    /// Upper bound (inclusive), kg. Absent, `<= weight_from`, or at the
    /// sentinel means this is the open extrapolation bracket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_to: Option<f64>,

    /// Per-zone rates
    #[serde(default)]
    pub rates: BTreeMap<Zone, RateCell>,
}

impl TariffRow {
    /// Whether this row is the open (per-additional-unit) bracket.
    pub fn is_open(&self) -> bool {
        match self.weight_to {
            None => true,
            Some(to) => to <= self.weight_from || to >= OPEN_WEIGHT_SENTINEL,
        }
    }

    fn cell(&self, zone: Zone) -> RateCell {
        self.rates.get(&zone).copied().unwrap_or_default()
    }
}

/// A weight bracket projected for one (zone, mode): either a finite priced
/// range or the single open extrapolation bracket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bracket {
    Finite {
        from: f64,
        to: f64,
        /// Directional rate; `None` means the zone is not priced here
        rate: Option<f64>,
        /// Arrival reference rate for plan discounts
        arrival: Option<f64>,
    },
    Open {
        from: f64,
        rate: Option<f64>,
        arrival: Option<f64>,
    },
}

/// The brackets of one service projected onto one (zone, mode)
#[derive(Debug, Clone, Default)]
pub struct BracketSet {
    /// Finite brackets, sorted by `from` ascending
    pub finite: Vec<Bracket>,
    /// At most one open bracket (the extrapolation unit)
    pub open: Option<Bracket>,
}

impl BracketSet {
    pub fn is_empty(&self) -> bool {
        self.finite.is_empty() && self.open.is_none()
    }

    /// The finite bracket that prices `target` kg: the one whose `(from, to]`
    /// range contains it, falling back to the lowest bracket below the table
    /// and to the highest (the extrapolation base) above it.
    pub fn select(&self, target: f64) -> Option<Bracket> {
        self.finite
            .iter()
            .copied()
            .find(|b| matches!(b, Bracket::Finite { from, to, .. } if target > *from && target <= *to))
            .or_else(|| {
                self.finite
                    .first()
                    .copied()
                    .filter(|b| matches!(b, Bracket::Finite { from, .. } if target <= *from))
            })
            .or_else(|| {
                self.finite
                    .iter()
                    .rev()
                    .copied()
                    .find(|b| matches!(b, Bracket::Finite { from, .. } if *from <= target))
            })
    }
}

/// Optional table metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TableMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl TableMeta {
    pub fn is_empty(&self) -> bool {
        self.carrier.is_none() && self.effective.is_none() && self.version.is_none()
    }
}

/// A complete tariff table
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "Tariff Table", description = "Carrier rate card: weight brackets by service and zone")]
pub struct TariffTable {
    /// Human-readable name of the rate card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Metadata
    #[serde(default, skip_serializing_if = "TableMeta::is_empty")]
    pub meta: TableMeta,

    /// Bracket rows, any order; sorted per service when queried
    #[serde(default)]
    pub rows: Vec<TariffRow>,
}

impl TariffTable {
    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_norway::from_str(yaml).map_err(|e| Error::Table(e.to_string()))
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_norway::to_string(self).map_err(|e| Error::Table(e.to_string()))
    }

    /// Parse from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Table(e.to_string()))
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Table(e.to_string()))
    }

    /// Load from a `.yaml`/`.yml` or `.json` file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }

    /// Rows belonging to a canonical service, finite ones sorted by
    /// `weight_from` ascending, open row (if any) last.
    pub fn rows_for(&self, service: Service) -> Vec<&TariffRow> {
        let mut rows: Vec<&TariffRow> = self
            .rows
            .iter()
            .filter(|r| canon::resolve_service(&r.service) == Some(service))
            .collect();
        rows.sort_by(|a, b| {
            a.is_open()
                .cmp(&b.is_open())
                .then(a.weight_from.total_cmp(&b.weight_from))
        });
        rows
    }

    /// Canonical services present in the table, deduplicated, catalog order.
    pub fn services(&self) -> Vec<Service> {
        crate::service::ALL_SERVICES
            .into_iter()
            .filter(|s| self.rows.iter().any(|r| canon::resolve_service(&r.service) == Some(*s)))
            .collect()
    }

    /// Project the brackets of a service onto one (zone, mode).
    pub fn bracket_set(&self, service: Service, zone: Zone, mode: Mode) -> BracketSet {
        let mut set = BracketSet::default();
        for row in self.rows_for(service) {
            let cell = row.cell(zone);
            if row.is_open() {
                // first open row wins; validate() flags extras
                if set.open.is_none() {
                    set.open = Some(Bracket::Open {
                        from: row.weight_from,
                        rate: cell.for_mode(mode),
                        arrival: cell.arrival,
                    });
                }
            } else {
                set.finite.push(Bracket::Finite {
                    from: row.weight_from,
                    to: row.weight_to.unwrap_or(row.weight_from),
                    rate: cell.for_mode(mode),
                    arrival: cell.arrival,
                });
            }
        }
        set
    }

    /// Fingerprint for change detection: generated offers record which rate
    /// card they were priced against.
    pub fn hash(&self) -> String {
        use sha2::{Digest, Sha256};
        let content = self.to_yaml().unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("sha256:{}", hex::encode(&hasher.finalize()[..8]))
    }

    /// Validate structural invariants. Returns human-readable problems;
    /// entries prefixed `Warning:` do not make the table unusable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.rows.is_empty() {
            errors.push("Table has no rows".into());
        }

        for (i, row) in self.rows.iter().enumerate() {
            if canon::resolve_service(&row.service).is_none() {
                errors.push(format!("Row {}: unknown service '{}'", i, row.service));
            }
            if !row.weight_from.is_finite() || row.weight_from < 0.0 {
                errors.push(format!("Row {}: invalid weight_from {}", i, row.weight_from));
            }
            if row.rates.is_empty() || row.rates.values().all(|c| c.is_empty()) {
                errors.push(format!("Warning: Row {} prices no zone", i));
            }
            for (zone, cell) in &row.rates {
                for (label, rate) in [
                    ("outbound", cell.outbound),
                    ("pickup", cell.pickup),
                    ("intercity", cell.intercity),
                    ("arrival", cell.arrival),
                ] {
                    if let Some(r) = rate {
                        if !r.is_finite() || r < 0.0 {
                            errors.push(format!("Row {i}: negative {label} rate for {zone}"));
                        }
                    }
                }
            }
        }

        for service in self.services() {
            let rows = self.rows_for(service);
            let open_count = rows.iter().filter(|r| r.is_open()).count();
            if open_count > 1 {
                errors.push(format!("{service}: {open_count} open brackets, expected at most 1"));
            }

            let finite: Vec<_> = rows.iter().filter(|r| !r.is_open()).collect();
            for pair in finite.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if a.weight_from == b.weight_from {
                    errors.push(format!(
                        "{service}: duplicate bracket starting at {} kg",
                        a.weight_from
                    ));
                } else if b.weight_from < a.weight_to.unwrap_or(a.weight_from) {
                    errors.push(format!(
                        "Warning: {service}: brackets overlap around {} kg",
                        b.weight_from
                    ));
                }
            }
        }

        errors
    }
}
