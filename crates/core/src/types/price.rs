//! Money display helpers.
//!
//! The catalog backend stores USD amounts as decimal strings. These helpers
//! own the two client-side money rules: display formatting and the sale
//! price computed from a discount percentage.

use rust_decimal::{Decimal, RoundingStrategy};

/// Format a USD amount for display, e.g. `$1,234.50`.
///
/// Rounds to cents (midpoint away from zero) and inserts thousands
/// separators. Negative amounts render with a leading minus sign.
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let unsigned = rounded.abs();
    let text = format!("{unsigned:.2}");
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let grouped = group_thousands(int_part);
    if rounded.is_sign_negative() && !unsigned.is_zero() {
        format!("-${grouped}.{frac_part}")
    } else {
        format!("${grouped}.{frac_part}")
    }
}

/// Sale price for a discounted product: `price * (1 - discount/100)`,
/// rounded to cents. Computed for display only; the backend never stores it.
#[must_use]
pub fn sale_price(price: Decimal, discount_percentage: Decimal) -> Decimal {
    let factor = Decimal::ONE - discount_percentage / Decimal::ONE_HUNDRED;
    (price * factor).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_format_usd_basic() {
        assert_eq!(format_usd(dec("19.99")), "$19.99");
        assert_eq!(format_usd(dec("0")), "$0.00");
        assert_eq!(format_usd(dec("5")), "$5.00");
    }

    #[test]
    fn test_format_usd_thousands_separators() {
        assert_eq!(format_usd(dec("1234.5")), "$1,234.50");
        assert_eq!(format_usd(dec("1000000")), "$1,000,000.00");
        assert_eq!(format_usd(dec("999")), "$999.00");
    }

    #[test]
    fn test_format_usd_rounds_to_cents() {
        assert_eq!(format_usd(dec("19.999")), "$20.00");
        assert_eq!(format_usd(dec("19.994")), "$19.99");
        assert_eq!(format_usd(dec("19.995")), "$20.00");
    }

    #[test]
    fn test_format_usd_negative() {
        assert_eq!(format_usd(dec("-4.5")), "-$4.50");
    }

    #[test]
    fn test_sale_price_quarter_off() {
        assert_eq!(sale_price(dec("100"), dec("25")), dec("75.00"));
    }

    #[test]
    fn test_sale_price_rounds_to_cents() {
        // 19.99 * 0.90 = 17.991
        assert_eq!(sale_price(dec("19.99"), dec("10")), dec("17.99"));
        // 9.99 * 0.67 = 6.6933
        assert_eq!(sale_price(dec("9.99"), dec("33")), dec("6.69"));
    }

    #[test]
    fn test_sale_price_zero_discount() {
        assert_eq!(sale_price(dec("42.00"), dec("0")), dec("42.00"));
    }

    #[test]
    fn test_sale_price_full_discount() {
        assert_eq!(sale_price(dec("42.00"), dec("100")), dec("0.00"));
    }
}
