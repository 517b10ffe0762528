//! Minor-unit money helpers.
//!
//! All amounts in this service are integers in the smallest currency unit
//! (pence for GBP) to avoid floating-point rounding on monetary values.

use crate::domain::foundation::ValidationError;

/// Formats a minor-unit amount for display, e.g. `2500` -> `"£25.00"`.
pub fn format_amount(amount_minor: u64) -> String {
    format!("£{}.{:02}", amount_minor / 100, amount_minor % 100)
}

/// Parses a display amount back to minor units, e.g. `"£25.00"` -> `2500`.
///
/// Accepts an optional leading `£`, thousands separators, and up to two
/// fraction digits. A third fraction digit rounds half-up. Round-trips with
/// [`format_amount`] for every non-negative amount.
pub fn parse_amount(input: &str) -> Result<u64, ValidationError> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| *c != '£' && *c != ',')
        .collect();

    if cleaned.is_empty() {
        return Err(ValidationError::empty_field("amount"));
    }

    let (pounds_str, pence_str) = match cleaned.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (cleaned.as_str(), ""),
    };

    if !pounds_str.chars().all(|c| c.is_ascii_digit())
        || !pence_str.chars().all(|c| c.is_ascii_digit())
        || (pounds_str.is_empty() && pence_str.is_empty())
    {
        return Err(ValidationError::invalid_format(
            "amount",
            format!("'{}' is not a monetary amount", input.trim()),
        ));
    }

    let pounds: u64 = if pounds_str.is_empty() {
        0
    } else {
        pounds_str.parse().map_err(|_| {
            ValidationError::invalid_format("amount", format!("'{}' is too large", input.trim()))
        })?
    };

    let mut fraction = pence_str.to_string();
    while fraction.len() < 2 {
        fraction.push('0');
    }
    let pence: u64 = fraction[..2].parse().unwrap_or(0);
    let round_up = fraction.len() > 2 && fraction.as_bytes()[2] >= b'5';

    pounds
        .checked_mul(100)
        .and_then(|p| p.checked_add(pence + u64::from(round_up)))
        .ok_or_else(|| {
            ValidationError::invalid_format("amount", format!("'{}' is too large", input.trim()))
        })
}
