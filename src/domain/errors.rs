//! # Domain Errors
//!
//! Error types for domain-level invariant violations.
//!
//! # Error Taxonomy
//!
//! - [`ValidationError`] — a malformed RFQ request; recoverable, the caller
//!   fixes the named field and resubmits.
//! - [`DomainError::StaleState`] — an event reached an RFQ already in a
//!   terminal state; logged and dropped by callers, never surfaced as a
//!   failure to the inbound channel.
//! - [`DomainError::InvalidTransition`] — an operation requested a state
//!   change the lifecycle machine forbids.
//! - Remaining variants are value-object constructor failures.

use crate::domain::value_objects::{QuoteId, RfqState};
use thiserror::Error;

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// A request field failed validation.
///
/// Carries the first violated field (checks run in a fixed order, so the
/// reported field is reproducible) and a human-readable reason.
///
/// # Examples
///
/// ```
/// use fx_rfq::domain::errors::ValidationError;
///
/// let err = ValidationError::new("pair", "expected two 3-letter currency codes");
/// assert_eq!(err.to_string(), "invalid pair: expected two 3-letter currency codes");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    /// The first request field that failed validation.
    pub field: &'static str,
    /// Why the field was rejected.
    pub reason: String,
}

impl ValidationError {
    /// Creates a validation error for a field.
    #[must_use]
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Domain-level error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Request validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The lifecycle state machine forbids this transition.
    #[error("invalid state transition: {from} -> {to}")]
    InvalidTransition {
        /// Current state.
        from: RfqState,
        /// Requested state.
        to: RfqState,
    },

    /// An event reached an RFQ already in a terminal state.
    ///
    /// Dropping the event is the correct handling; nothing was mutated.
    #[error("rfq is in terminal state {state}, event dropped as stale")]
    StaleState {
        /// The terminal state the RFQ is in.
        state: RfqState,
    },

    /// The referenced quote has expired.
    #[error("quote expired: {0}")]
    QuoteExpired(String),

    /// The referenced quote does not exist in the book.
    #[error("quote not found: {0}")]
    QuoteNotFound(QuoteId),

    /// A price value violated its invariants.
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// A notional value violated its invariants.
    #[error("invalid notional: {0}")]
    InvalidNotional(String),

    /// A currency pair violated its invariants.
    #[error("invalid currency pair: {0}")]
    InvalidCurrencyPair(String),
}

impl DomainError {
    /// Returns true if this error is a stale-event drop rather than a
    /// genuine failure.
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        matches!(self, Self::StaleState { .. })
    }
}
