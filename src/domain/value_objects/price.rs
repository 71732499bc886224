//! # Price Value Object
//!
//! Positive decimal price with exact arithmetic.
//!
//! Prices are stored as `rust_decimal::Decimal` so that a dealer quote of
//! `1.10550` executes at exactly `1.10550`, never a float approximation.
//!
//! # Examples
//!
//! ```
//! use fx_rfq::domain::value_objects::price::Price;
//!
//! let price = Price::new(1.10550).unwrap();
//! assert!(price.is_positive());
//! assert_eq!(price.to_string(), "1.1055");
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A positive decimal price.
///
/// # Invariants
///
/// - Strictly positive when constructed via [`Price::new`] or
///   [`Price::from_decimal`]. [`Price::zero`] exists for comparisons only.
///
/// # Examples
///
/// ```
/// use fx_rfq::domain::value_objects::price::Price;
///
/// let a = Price::new(1.10).unwrap();
/// let b = Price::new(1.20).unwrap();
/// assert!(a < b);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Creates a price from an `f64`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` if the value is not finite,
    /// not representable as a decimal, or not strictly positive.
    pub fn new(value: f64) -> DomainResult<Self> {
        let decimal = Decimal::from_f64(value)
            .ok_or_else(|| DomainError::InvalidPrice("price is not a finite number".to_string()))?;
        Self::from_decimal(decimal)
    }

    /// Creates a price from a `Decimal`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` if the value is not strictly positive.
    pub fn from_decimal(value: Decimal) -> DomainResult<Self> {
        if value <= Decimal::ZERO {
            return Err(DomainError::InvalidPrice(
                "price must be positive".to_string(),
            ));
        }
        Ok(Self(value.normalize()))
    }

    /// The zero price. For comparisons only; not a valid quoted price.
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Returns the underlying decimal value.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> Decimal {
        self.0
    }

    /// Returns true if this price is strictly positive.
    #[inline]
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s)
            .map_err(|_| DomainError::InvalidPrice(format!("not a decimal number: '{s}'")))?;
        Self::from_decimal(decimal)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_positive() {
        let price = Price::new(1.10550).unwrap();
        assert!(price.is_positive());
    }

    #[test]
    fn new_rejects_zero_and_negative() {
        assert!(matches!(Price::new(0.0), Err(DomainError::InvalidPrice(_))));
        assert!(matches!(
            Price::new(-1.5),
            Err(DomainError::InvalidPrice(_))
        ));
    }

    #[test]
    fn new_rejects_non_finite() {
        assert!(Price::new(f64::NAN).is_err());
        assert!(Price::new(f64::INFINITY).is_err());
    }

    #[test]
    fn from_str_parses_exact_decimal() {
        let price: Price = "1.10550".parse().unwrap();
        assert_eq!(price.get(), Decimal::from_str("1.1055").unwrap());
    }

    #[test]
    fn from_str_rejects_garbage() {
        assert!("one-point-one".parse::<Price>().is_err());
        assert!("-2".parse::<Price>().is_err());
    }

    #[test]
    fn ordering() {
        let low = Price::new(1.10).unwrap();
        let high = Price::new(1.20).unwrap();
        assert!(low < high);
        assert!(Price::zero() < low);
    }

    #[test]
    fn zero_is_not_positive() {
        assert!(!Price::zero().is_positive());
    }

    #[test]
    fn serde_roundtrip() {
        let price = Price::new(50000.25).unwrap();
        let json = serde_json::to_string(&price).unwrap();
        let deserialized: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(price, deserialized);
    }
}
