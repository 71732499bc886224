//! # Execution Record
//!
//! The immutable record produced when an RFQ commits against a quote.
//! Exactly one record exists per executed RFQ.

use crate::domain::entities::quote::Quote;
use crate::domain::value_objects::{DealerId, Price, QuoteId, RfqId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Proof of a committed execution.
///
/// Captures the winning quote's terms at commit time so the record stays
/// accurate even after the quote is swept from the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// The executed RFQ.
    rfq_id: RfqId,
    /// The quote that was filled.
    quote_id: QuoteId,
    /// The dealer whose quote was filled.
    dealer_id: DealerId,
    /// The price the execution committed at.
    price: Price,
    /// When the execution committed.
    executed_at: Timestamp,
}

impl ExecutionRecord {
    /// Builds the record from the winning quote at commit time.
    #[must_use]
    pub fn from_quote(quote: &Quote, executed_at: Timestamp) -> Self {
        Self {
            rfq_id: quote.rfq_id(),
            quote_id: quote.id(),
            dealer_id: quote.dealer_id().clone(),
            price: quote.price(),
            executed_at,
        }
    }

    /// Returns the executed RFQ id.
    #[inline]
    #[must_use]
    pub const fn rfq_id(&self) -> RfqId {
        self.rfq_id
    }

    /// Returns the filled quote id.
    #[inline]
    #[must_use]
    pub const fn quote_id(&self) -> QuoteId {
        self.quote_id
    }

    /// Returns the filled dealer.
    #[inline]
    #[must_use]
    pub const fn dealer_id(&self) -> &DealerId {
        &self.dealer_id
    }

    /// Returns the committed price.
    #[inline]
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Returns when the execution committed.
    #[inline]
    #[must_use]
    pub const fn executed_at(&self) -> Timestamp {
        self.executed_at
    }
}

impl fmt::Display for ExecutionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Execution({} filled {} @ {} with {})",
            self.rfq_id, self.quote_id, self.price, self.dealer_id
        )
    }
}
