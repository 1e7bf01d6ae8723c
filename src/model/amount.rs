//! Amount type for handling monetary magnitudes.
//!
//! This module provides the `Amount` type which wraps `Decimal` and handles parsing values that
//! may or may not include a currency sign and thousands commas. An `Amount` is always a
//! non-negative magnitude; whether it adds to or subtracts from the balance is determined by the
//! transaction kind, never by the sign of the amount.

use crate::LedgerError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents a non-negative monetary magnitude.
///
/// Serializes as a plain JSON number so that the persisted layout matches a hand-written
/// `{"amount": 40}` record.
///
/// # Examples
///
/// ```
/// # use centavo::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("$1,250.50").unwrap();
/// assert_eq!(amount.to_string(), "1250.50");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Amount(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Amount {
    /// Creates a new `Amount` from a `Decimal` value. The value is not checked for sign here;
    /// submission validation rejects negative amounts.
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying `Decimal` value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount carries a negative value, which only happens when an `Amount`
    /// is constructed directly rather than parsed.
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// The value as an `f64` for display grouping.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }
}

impl FromStr for Amount {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(LedgerError::Validation("the amount is required".into()));
        }

        // Accept a leading currency sign and thousands commas, e.g. "$1,250.50".
        let without_sign = trimmed.strip_prefix('$').unwrap_or(trimmed);
        let without_commas = without_sign.replace(',', "");

        let value = Decimal::from_str(&without_commas)
            .map_err(|e| LedgerError::Validation(format!("'{trimmed}' is not an amount: {e}")))?;
        if value.is_sign_negative() {
            return Err(LedgerError::Validation(format!(
                "the amount must not be negative, got '{trimmed}'"
            )));
        }
        Ok(Amount(value))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let amount = Amount::from_str("50.00").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("50.00").unwrap());
    }

    #[test]
    fn test_parse_with_sign_and_commas() {
        let amount = Amount::from_str("$1,250.50").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("1250.50").unwrap());
    }

    #[test]
    fn test_parse_whitespace() {
        let amount = Amount::from_str("  $50.00  ").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("50.00").unwrap());
    }

    #[test]
    fn test_parse_empty_string_is_rejected() {
        let err = Amount::from_str("").unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn test_parse_negative_is_rejected() {
        let err = Amount::from_str("-50.00").unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn test_parse_garbage_is_rejected() {
        let err = Amount::from_str("lots").unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn test_serialize_as_number() {
        let amount = Amount::from_str("40").unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "40.0");
    }

    #[test]
    fn test_deserialize_from_integer() {
        let amount: Amount = serde_json::from_str("40").unwrap();
        assert_eq!(amount.value(), Decimal::from(40));
    }

    #[test]
    fn test_deserialize_from_float() {
        let amount: Amount = serde_json::from_str("40.5").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("40.5").unwrap());
    }

    #[test]
    fn test_ordering() {
        let a1 = Amount::from_str("30.00").unwrap();
        let a2 = Amount::from_str("50.00").unwrap();
        assert!(a1 < a2);
    }

    #[test]
    fn test_is_zero() {
        assert!(Amount::from_str("0.00").unwrap().is_zero());
        assert!(!Amount::from_str("50.00").unwrap().is_zero());
    }
}
