//! # Quote Entity
//!
//! A price quote received from a dealer in response to an RFQ.
//!
//! Quotes are immutable once created. Expiry is evaluated lazily against an
//! explicit `now` — nothing actively cancels a quote, it simply stops
//! appearing in reads once `valid_until` has passed.
//!
//! # Examples
//!
//! ```
//! use fx_rfq::domain::entities::quote::Quote;
//! use fx_rfq::domain::value_objects::{DealerId, Price, RfqId, Timestamp};
//!
//! let now = Timestamp::now();
//! let quote = Quote::new(
//!     RfqId::new_v4(),
//!     DealerId::new("JPM"),
//!     Price::new(1.10550).unwrap(),
//!     now,
//!     now.add_secs(20),
//! ).unwrap();
//!
//! assert!(quote.is_live(now));
//! assert!(!quote.is_live(now.add_secs(20)));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{DealerId, Price, QuoteId, RfqId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dealer quote for one RFQ.
///
/// # Invariants
///
/// - `price` is strictly positive (enforced by [`Price`]).
/// - `valid_until` is strictly after `created_at`.
/// - Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Unique identifier for this quote.
    id: QuoteId,
    /// The RFQ this quote responds to.
    rfq_id: RfqId,
    /// The dealer that provided this quote.
    dealer_id: DealerId,
    /// The quoted price.
    price: Price,
    /// When this quote was received.
    created_at: Timestamp,
    /// When this quote stops being executable.
    valid_until: Timestamp,
}

impl Quote {
    /// Creates a new quote with validation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::QuoteExpired` if `valid_until` is not strictly
    /// after `created_at`.
    pub fn new(
        rfq_id: RfqId,
        dealer_id: DealerId,
        price: Price,
        created_at: Timestamp,
        valid_until: Timestamp,
    ) -> DomainResult<Self> {
        if !valid_until.is_after(&created_at) {
            return Err(DomainError::QuoteExpired(
                "valid_until must be after created_at".to_string(),
            ));
        }
        Ok(Self {
            id: QuoteId::new_v4(),
            rfq_id,
            dealer_id,
            price,
            created_at,
            valid_until,
        })
    }

    /// Creates a quote with a specific ID (for reconstruction).
    #[must_use]
    pub const fn from_parts(
        id: QuoteId,
        rfq_id: RfqId,
        dealer_id: DealerId,
        price: Price,
        created_at: Timestamp,
        valid_until: Timestamp,
    ) -> Self {
        Self {
            id,
            rfq_id,
            dealer_id,
            price,
            created_at,
            valid_until,
        }
    }

    /// Returns the quote ID.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> QuoteId {
        self.id
    }

    /// Returns the RFQ ID this quote responds to.
    #[inline]
    #[must_use]
    pub const fn rfq_id(&self) -> RfqId {
        self.rfq_id
    }

    /// Returns the dealer ID.
    #[inline]
    #[must_use]
    pub const fn dealer_id(&self) -> &DealerId {
        &self.dealer_id
    }

    /// Returns the quoted price.
    #[inline]
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Returns when this quote was received.
    #[inline]
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns when this quote stops being executable.
    #[inline]
    #[must_use]
    pub const fn valid_until(&self) -> Timestamp {
        self.valid_until
    }

    /// Returns true if this quote is still executable at `now`.
    ///
    /// A quote is live while `valid_until > now`; at the boundary it is
    /// already dead.
    #[inline]
    #[must_use]
    pub fn is_live(&self, now: Timestamp) -> bool {
        self.valid_until.is_after(&now)
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quote({} @ {} from {})", self.id, self.price, self.dealer_id)
    }
}
