//! Conversion between the platform's decimal amount strings and integer minor units.
//!
//! Every conversion here is total: input that cannot be read as a non-negative
//! amount comes back as zero cents.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Parse the leading decimal number of an amount string
///
/// Reads an optional sign, digits with at most one decimal point and an optional
/// exponent ("8.25", "1e2", "8.25 CAD", "1e2abc"); anything after the number is
/// ignored. Digit separators are not part of a number, so "1_000" reads as 1.
/// Returns `None` when no number can be read or it does not fit a `Decimal`.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let number = leading_number(raw.trim())?;
    if number.contains(['e', 'E']) {
        Decimal::from_scientific(number).ok()
    } else {
        Decimal::from_str(number).ok()
    }
}

/// Convert a major-unit amount into minor units, rounding half-up at two decimals
///
/// Returns `None` when the result does not fit in an `i64`.
pub fn to_cents(amount: Decimal) -> Option<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Raw amount string to non-negative cents; anything unreadable degrades to 0
pub fn amount_to_cents(raw: Option<&str>) -> i64 {
    let cents = raw.and_then(parse_amount).and_then(to_cents).unwrap_or(0);
    if cents < 0 {
        tracing::trace!(raw = ?raw, "negative tax amount degraded to zero");
        return 0;
    }
    if cents == 0 && raw.is_some_and(|r| parse_amount(r).is_none()) {
        tracing::trace!(raw = ?raw, "unparsable tax amount degraded to zero");
    }
    cents
}

/// Render minor units as a two-decimal major-unit string, e.g. `1205` -> `"12.05"`
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

fn leading_number(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut digits = 0;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => digits += 1,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if digits == 0 {
        return None;
    }
    let mantissa = s[..end].trim_end_matches('.');

    // Exponent counts only when at least one digit follows the marker
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while matches!(bytes.get(exp_end), Some(b'0'..=b'9')) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start && mantissa.len() == end {
            return Some(&s[..exp_end]);
        }
    }

    Some(mantissa)
}
