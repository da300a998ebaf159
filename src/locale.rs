//! es-ES currency formatting
//!
//! The UI and the generated offer documents print amounts the Spanish way:
//! dot-grouped thousands, comma decimals, trailing euro sign.

/// Format a monetary amount as an `es-ES` 2-decimal currency string.
///
/// # Examples
/// ```
/// use tarifario::locale::format_eur;
/// assert_eq!(format_eur(1234.5), "1.234,50 €");
/// assert_eq!(format_eur(0.37), "0,37 €");
/// ```
pub fn format_eur(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped},{frac:02} €")
}
