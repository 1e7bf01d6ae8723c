//! Currency display formatting.
//!
//! Formatting is a pure function of the amount and the currency code. The selected code itself
//! is a persisted preference managed by [`crate::Settings`]. Codes are not validated against a
//! known set; an unrecognized code falls back to `"<code> <amount to 2 decimals>"`.

use format_num::format_num;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// The currency used when no preference has ever been stored.
pub const DEFAULT_CURRENCY: &str = "COP";

/// Formats `amount` for display in the given currency.
///
/// - `"USD"`: two decimals with comma grouping, e.g. `$1,234.56`.
/// - `"COP"`: whole pesos with dot grouping, matching the `es-CO` rendering, e.g. `$ 1.234.567`.
/// - anything else: `"<code> <amount>"` with two decimals.
pub fn format_amount(amount: Decimal, code: &str) -> String {
    let (sign, magnitude) = if amount.is_sign_negative() {
        ("-", amount.abs())
    } else {
        ("", amount)
    };

    match code {
        "USD" => format!(
            "{sign}${}",
            format_num!(",.2", magnitude.to_f64().unwrap_or_default())
        ),
        "COP" => {
            let pesos = magnitude.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
            format!("{sign}$ {}", group_thousands(&pesos.to_string()))
        }
        other => format!("{other} {amount:.2}"),
    }
}

/// Inserts `.` thousands separators into a non-negative integer string.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (ix, c) in digits.chars().enumerate() {
        if ix != 0 && (ix + 3 - offset) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_usd_two_decimals_with_commas() {
        assert_eq!(format_amount(dec("1234.56"), "USD"), "$1,234.56");
        assert_eq!(format_amount(dec("40"), "USD"), "$40.00");
        assert_eq!(format_amount(dec("1234567.891"), "USD"), "$1,234,567.89");
    }

    #[test]
    fn test_usd_negative() {
        assert_eq!(format_amount(dec("-1234.5"), "USD"), "-$1,234.50");
    }

    #[test]
    fn test_cop_zero_decimals_with_dots() {
        assert_eq!(format_amount(dec("1234567"), "COP"), "$ 1.234.567");
        assert_eq!(format_amount(dec("950"), "COP"), "$ 950");
        assert_eq!(format_amount(dec("1000"), "COP"), "$ 1.000");
    }

    #[test]
    fn test_cop_rounds_to_whole_pesos() {
        assert_eq!(format_amount(dec("1234567.6"), "COP"), "$ 1.234.568");
        assert_eq!(format_amount(dec("0.4"), "COP"), "$ 0");
    }

    #[test]
    fn test_cop_negative() {
        assert_eq!(format_amount(dec("-75000"), "COP"), "-$ 75.000");
    }

    #[test]
    fn test_unknown_code_falls_back() {
        assert_eq!(format_amount(dec("50"), "EUR"), "EUR 50.00");
        assert_eq!(format_amount(dec("-12.34"), "EUR"), "EUR -12.34");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1.234");
        assert_eq!(group_thousands("123456"), "123.456");
        assert_eq!(group_thousands("1234567"), "1.234.567");
    }
}
