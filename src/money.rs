//! Monetary rounding primitives
//!
//! Every intermediate amount in the engine goes through [`round_up`] before it
//! is summed into anything else, so displayed line items always add up exactly
//! to displayed subtotals. Rounding only at the end would let cent-level
//! drift show up in generated offer documents.

/// Epsilon subtracted before the ceiling so that float representation noise
/// (e.g. `12.000000001`) does not round up to the next cent.
const EPSILON: f64 = 1e-9;

/// Round a monetary amount up to the nearest cent.
///
/// `round_up(x) = ceil(x * 100 - EPSILON) / 100` for finite `x > 0`.
/// Non-finite or non-positive inputs collapse to exactly `0.0`.
///
/// # Examples
/// ```
/// use tarifario::money::round_up;
/// assert_eq!(round_up(12.345), 12.35);
/// assert_eq!(round_up(-3.0), 0.0);
/// assert_eq!(round_up(f64::NAN), 0.0);
/// ```
pub fn round_up(x: f64) -> f64 {
    if !x.is_finite() || x <= 0.0 {
        return 0.0;
    }
    let cents = (x * 100.0 - EPSILON).ceil();
    if cents <= 0.0 {
        0.0
    } else {
        cents / 100.0
    }
}

/// Normalize a caller-supplied amount: negative, NaN or infinite values become
/// `0.0`. Malformed numeric input never aborts a calculation.
pub fn sanitize(x: f64) -> f64 {
    if x.is_finite() && x > 0.0 {
        x
    } else {
        0.0
    }
}

/// Sale price for a cost at a margin percentage: `cost / (1 - margin/100)`,
/// rounded up.
///
/// A margin of 100% or more (or a non-finite margin) has no defined sale
/// price; returns `None` rather than dividing by zero.
pub fn sale_price(cost: f64, margin_percent: f64) -> Option<f64> {
    if !margin_percent.is_finite() || margin_percent >= 100.0 {
        return None;
    }
    let margin = margin_percent.max(0.0);
    Some(round_up(sanitize(cost) / (1.0 - margin / 100.0)))
}
