//! Error types for the tariff engine

use thiserror::Error;

use crate::service::Service;
use crate::zone::{Mode, Zone};

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Tariff engine errors
///
/// `MissingTariff` and `Restriction` are the two recoverable lookup outcomes:
/// callers render them as "not available", never as a zero price. Everything
/// else is a document/CLI-level failure.
#[derive(Error, Debug)]
pub enum Error {
    /// No priced bracket exists for this (service, zone, mode) at the
    /// requested weight. Rendered as "this zone is not offered".
    #[error("no tariff for {service} to {zone} ({mode}) at {weight_kg} kg")]
    MissingTariff {
        service: Service,
        zone: Zone,
        mode: Mode,
        weight_kg: f64,
    },

    /// A service business rule forbids the combination (policy, not data
    /// absence) - e.g. an oversized package for the parcel-shop service.
    #[error("restriction: {0}")]
    Restriction(String),

    #[error("Tariff table error: {0}")]
    Table(String),

    #[error("Plan book error: {0}")]
    PlanBook(String),

    #[error("Unknown service: {0}")]
    UnknownService(String),

    #[error("Unknown zone: {0}")]
    UnknownZone(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_norway::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl Error {
    /// True for the two lookup outcomes a quote survives (the zone renders
    /// as "NO" instead of a price).
    pub fn is_not_available(&self) -> bool {
        matches!(self, Error::MissingTariff { .. } | Error::Restriction(_))
    }
}
