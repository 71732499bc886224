//! # Notional Value Object
//!
//! Positive decimal notional amount for an RFQ.

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The notional amount of an RFQ, in units of the base currency.
///
/// # Invariants
///
/// - Strictly positive.
///
/// # Examples
///
/// ```
/// use fx_rfq::domain::value_objects::notional::Notional;
///
/// let notional = Notional::new(1_000_000.0).unwrap();
/// assert_eq!(notional.to_string(), "1000000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Notional(Decimal);

impl Notional {
    /// Creates a notional from an `f64`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidNotional` if the value is not finite,
    /// not representable as a decimal, or not strictly positive.
    pub fn new(value: f64) -> DomainResult<Self> {
        let decimal = Decimal::from_f64(value).ok_or_else(|| {
            DomainError::InvalidNotional("notional is not a finite number".to_string())
        })?;
        Self::from_decimal(decimal)
    }

    /// Creates a notional from a `Decimal`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidNotional` if the value is not strictly positive.
    pub fn from_decimal(value: Decimal) -> DomainResult<Self> {
        if value <= Decimal::ZERO {
            return Err(DomainError::InvalidNotional(
                "notional must be positive".to_string(),
            ));
        }
        Ok(Self(value.normalize()))
    }

    /// Returns the underlying decimal value.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Notional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
