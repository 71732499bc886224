//! # Currency Pair Value Object
//!
//! Validated FX currency pair (base and quote currency).

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated FX currency pair such as `EURUSD`.
///
/// # Invariants
///
/// - Base and quote are each exactly three ASCII letters, stored uppercase.
/// - Base and quote are distinct.
///
/// # Examples
///
/// ```
/// use fx_rfq::domain::value_objects::currency_pair::CurrencyPair;
///
/// let pair: CurrencyPair = "eurusd".parse().unwrap();
/// assert_eq!(pair.base(), "EUR");
/// assert_eq!(pair.quote(), "USD");
/// assert_eq!(pair.to_string(), "EURUSD");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyPair {
    base: String,
    quote: String,
}

impl CurrencyPair {
    /// Parses and normalizes a six-letter pair code.
    ///
    /// Input is case-insensitive; `"eurusd"` and `"EURUSD"` are equivalent.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCurrencyPair` if the input is not six
    /// ASCII letters or if both legs are the same currency.
    pub fn parse(s: &str) -> DomainResult<Self> {
        let normalized = s.trim().to_ascii_uppercase();
        if normalized.len() != 6 || !normalized.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(DomainError::InvalidCurrencyPair(format!(
                "expected two 3-letter currency codes, got '{s}'"
            )));
        }
        let (base, quote) = normalized.split_at(3);
        if base == quote {
            return Err(DomainError::InvalidCurrencyPair(format!(
                "base and quote currency must differ, got '{normalized}'"
            )));
        }
        Ok(Self {
            base: base.to_string(),
            quote: quote.to_string(),
        })
    }

    /// Returns the base currency code.
    #[inline]
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Returns the quote currency code.
    #[inline]
    #[must_use]
    pub fn quote(&self) -> &str {
        &self.quote
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CurrencyPair {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<CurrencyPair> for String {
    fn from(pair: CurrencyPair) -> Self {
        pair.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_case() {
        let pair = CurrencyPair::parse("eurUsd").unwrap();
        assert_eq!(pair.base(), "EUR");
        assert_eq!(pair.quote(), "USD");
    }

    #[test]
    fn parse_trims_whitespace() {
        let pair = CurrencyPair::parse(" GBPJPY ").unwrap();
        assert_eq!(pair.to_string(), "GBPJPY");
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!(CurrencyPair::parse("EUR").is_err());
        assert!(CurrencyPair::parse("EURUSDX").is_err());
        assert!(CurrencyPair::parse("").is_err());
    }

    #[test]
    fn parse_rejects_separators_and_digits() {
        assert!(CurrencyPair::parse("EUR/US").is_err());
        assert!(CurrencyPair::parse("EU1USD").is_err());
    }

    #[test]
    fn parse_rejects_identical_legs() {
        let err = CurrencyPair::parse("EUREUR").unwrap_err();
        assert!(matches!(err, DomainError::InvalidCurrencyPair(_)));
    }

    #[test]
    fn serde_roundtrip_as_string() {
        let pair = CurrencyPair::parse("EURUSD").unwrap();
        let json = serde_json::to_string(&pair).unwrap();
        assert_eq!(json, "\"EURUSD\"");
        let deserialized: CurrencyPair = serde_json::from_str(&json).unwrap();
        assert_eq!(pair, deserialized);
    }

    #[test]
    fn serde_rejects_invalid() {
        let result: Result<CurrencyPair, _> = serde_json::from_str("\"EUREUR\"");
        assert!(result.is_err());
    }
}
