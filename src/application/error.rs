//! # Engine Errors
//!
//! Error types returned by the engine's inbound operations.
//!
//! # Error Hierarchy
//!
//! ```text
//! EngineError
//! ├── Validation(ValidationError)  - Malformed request, caller fixes and resubmits
//! ├── NotFound(RfqId)              - Unknown RFQ referenced
//! ├── InvalidState(RfqState)       - Operation not legal in the RFQ's current state
//! ├── QuoteNotFound(QuoteId)       - Execute referenced a quote not in the book
//! ├── QuoteExpired(QuoteId)        - Execute caught the quote past its validity
//! ├── AlreadyExecuted(RfqId)       - Lost the exactly-once execution race
//! └── Domain(DomainError)          - Invariant violation surfaced from the domain
//! ```
//!
//! # Examples
//!
//! ```
//! use fx_rfq::application::error::EngineError;
//! use fx_rfq::domain::value_objects::RfqId;
//!
//! let rfq_id = RfqId::new_v4();
//! let err = EngineError::NotFound(rfq_id);
//! assert!(err.is_not_found());
//! ```

use crate::domain::errors::{DomainError, ValidationError};
use crate::domain::value_objects::{QuoteId, RfqId, RfqState};
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Error returned by an engine operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The RFQ request was malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No RFQ with this id exists in the engine.
    #[error("rfq not found: {0}")]
    NotFound(RfqId),

    /// The operation is not legal in the RFQ's current state.
    #[error("operation not allowed in state {0}")]
    InvalidState(RfqState),

    /// The referenced quote is not in the RFQ's book.
    #[error("quote not found: {0}")]
    QuoteNotFound(QuoteId),

    /// The referenced quote expired before the execution could commit.
    #[error("quote expired: {0}")]
    QuoteExpired(QuoteId),

    /// A concurrent execution already won this RFQ.
    #[error("rfq already executed: {0}")]
    AlreadyExecuted(RfqId),

    /// A domain invariant was violated.
    #[error(transparent)]
    Domain(DomainError),
}

impl EngineError {
    /// Returns true if this is a not-found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::QuoteNotFound(_))
    }

    /// Returns true if this error means the caller sent a bad request.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if the operation can be retried against a fresh quote.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::QuoteExpired(_) | Self::QuoteNotFound(_))
    }
}

impl From<DomainError> for EngineError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(e) => Self::Validation(e),
            other => Self::Domain(other),
        }
    }
}
