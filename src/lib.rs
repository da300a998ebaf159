// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # Tarifario — freight-tariff pricing engine
//!
//! Computes shipment costs for a parcel-carrier reseller: tiered
//! weight-bracket tariff resolution per destination zone, commercial plan
//! discounts, and fully itemized cost breakdowns for commercial offer
//! documents.
//!
//! ## Core concept
//!
//! A **tariff table** is the carrier's rate card: rows keyed by service and
//! weight bracket, pricing each destination zone in up to three shipping
//! directions plus an "arrival" reference rate used for discount math. From a
//! table the engine can:
//!
//! - **Resolve** the base cost of a chargeable weight, extrapolating past the
//!   last finite bracket with a per-unit open bracket
//! - **Discount** it through a named commercial plan (percentage, fixed, or
//!   weight-bracketed percentages off the arrival rate)
//! - **Break down** the final cost into the itemized, cent-rounded line items
//!   an offer prints: climate/coverage surcharges, fixed canons, the energy
//!   surcharge, free-form fees and year increments
//! - **Quote** a whole zone matrix in one call
//!
//! ## Quick start
//!
//! ```rust
//! use tarifario::{Mode, Package, QuoteRequest, Service, TariffTable, Zone};
//!
//! let table = TariffTable::from_yaml(r#"
//! rows:
//!   - service: courier24
//!     weight_from: 0
//!     weight_to: 1
//!     rates:
//!       provincial: { outbound: 5.00, arrival: 4.50 }
//!   - service: courier24
//!     weight_from: 1
//!     rates:
//!       provincial: { outbound: 1.20, arrival: 1.00 }
//! "#).unwrap();
//!
//! let request = QuoteRequest::new(
//!     Service::Courier24,
//!     Mode::Outbound,
//!     Package::new(0.8),
//! );
//! let quote = tarifario::quote_zone(&table, &request, None, Zone::Provincial);
//! assert_eq!(quote.breakdown.initial_cost, 5.00);
//! ```
//!
//! ## Determinism
//!
//! The engine is a pure, synchronous computation. Every intermediate amount
//! is rounded up to the cent through [`money::round_up`] before any
//! summation, so identical inputs always produce bit-identical outputs and
//! displayed line items sum exactly to displayed totals.
//!
//! ## Errors
//!
//! Lookups fail in exactly two recoverable ways: [`Error::MissingTariff`]
//! (no priced bracket for the combination) and [`Error::Restriction`] (a
//! business rule forbids it). Malformed numeric input never raises - it is
//! normalized to 0 inside the calculator.

pub mod breakdown;
pub mod canon;
pub mod error;
pub mod locale;
pub mod money;
pub mod package;
pub mod plan;
pub mod quote;
pub mod resolver;
pub mod service;
pub mod table;
pub mod zone;

pub use breakdown::{
    compute as compute_cost_breakdown, BreakdownInputs, BreakdownStatus, CostBreakdown, FlatFees,
    IncrementPercents,
};
pub use error::{Error, Result};
pub use money::{round_up, sale_price};
pub use package::{Dimensions, Package};
pub use plan::{resolve_plan_discount, Plan, PlanBook, PlanBrackets, PlanKind};
pub use quote::{quote_all_zones, quote_zone, QuoteRequest, UnavailableReason, ZoneQuote};
pub use resolver::resolve_bracket_cost;
pub use service::{Service, ServiceTerms, ALL_SERVICES};
pub use table::{Bracket, BracketSet, RateCell, TariffRow, TariffTable};
pub use zone::{Mode, Zone, ALL_ZONES};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
