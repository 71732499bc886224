//! # RFQ State
//!
//! RFQ lifecycle state machine.
//!
//! # State Machine
//!
//! ```text
//! Draft → Quoting → Quoted → Executing → Executed
//!   ↓        ↓         ↑↓        ↓
//!   │        ├→ Expired ←────────┤   (deadline / failed commit)
//!   ├────────┴→ Cancelled            (any non-terminal)
//!   └──────────→ Rejected            (any non-terminal)
//! ```
//!
//! `Executing → Quoted` is the commit-failure fallback: the selected quote
//! expired between selection and commit and at least one other live quote
//! remains.
//!
//! # Examples
//!
//! ```
//! use fx_rfq::domain::value_objects::rfq_state::RfqState;
//!
//! assert!(RfqState::Quoting.can_transition_to(RfqState::Quoted));
//! assert!(!RfqState::Executed.can_transition_to(RfqState::Quoted));
//! assert!(RfqState::Executed.is_terminal());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// RFQ lifecycle state.
///
/// Transitions are enforced via [`can_transition_to`](RfqState::can_transition_to);
/// the aggregate in `domain::entities::rfq` is the only writer.
///
/// # Terminal States
///
/// - [`Executed`](RfqState::Executed) — trade committed against one quote
/// - [`Expired`](RfqState::Expired) — quoting deadline elapsed unexecuted
/// - [`Cancelled`](RfqState::Cancelled) — explicit caller cancellation
/// - [`Rejected`](RfqState::Rejected) — validation or downstream rejection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum RfqState {
    /// Created but not yet accepted by the session manager.
    #[default]
    Draft = 0,

    /// Accepted; dealers are being solicited, no quote yet.
    Quoting = 1,

    /// At least one live dealer quote is in the book.
    Quoted = 2,

    /// An execute request holds exclusivity, commit check in progress.
    Executing = 3,

    /// Executed against exactly one quote (terminal).
    Executed = 4,

    /// Quoting deadline elapsed without execution (terminal).
    Expired = 5,

    /// Explicitly cancelled by the caller (terminal).
    Cancelled = 6,

    /// Rejected by validation or downstream (terminal).
    Rejected = 7,
}

impl RfqState {
    /// Returns true if this is a terminal state.
    ///
    /// Terminal states accept no further transitions; late events are
    /// dropped as stale.
    #[inline]
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Executed | Self::Expired | Self::Cancelled | Self::Rejected
        )
    }

    /// Returns true if this state can transition to the target state.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            // From Draft
            (Self::Draft, Self::Quoting)
                | (Self::Draft, Self::Cancelled)
                | (Self::Draft, Self::Rejected)
                // From Quoting
                | (Self::Quoting, Self::Quoted)
                | (Self::Quoting, Self::Expired)
                | (Self::Quoting, Self::Cancelled)
                | (Self::Quoting, Self::Rejected)
                // From Quoted
                | (Self::Quoted, Self::Executing)
                | (Self::Quoted, Self::Expired)
                | (Self::Quoted, Self::Cancelled)
                | (Self::Quoted, Self::Rejected)
                // From Executing
                | (Self::Executing, Self::Executed)
                | (Self::Executing, Self::Quoted)
                | (Self::Executing, Self::Expired)
                | (Self::Executing, Self::Cancelled)
                | (Self::Executing, Self::Rejected)
        )
    }

    /// Returns the valid next states from this state.
    #[must_use]
    pub fn valid_transitions(&self) -> Vec<Self> {
        match self {
            Self::Draft => vec![Self::Quoting, Self::Cancelled, Self::Rejected],
            Self::Quoting => vec![
                Self::Quoted,
                Self::Expired,
                Self::Cancelled,
                Self::Rejected,
            ],
            Self::Quoted => vec![
                Self::Executing,
                Self::Expired,
                Self::Cancelled,
                Self::Rejected,
            ],
            Self::Executing => vec![
                Self::Executed,
                Self::Quoted,
                Self::Expired,
                Self::Cancelled,
                Self::Rejected,
            ],
            Self::Executed | Self::Expired | Self::Cancelled | Self::Rejected => Vec::new(),
        }
    }
}

impl fmt::Display for RfqState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "DRAFT"),
            Self::Quoting => write!(f, "QUOTING"),
            Self::Quoted => write!(f, "QUOTED"),
            Self::Executing => write!(f, "EXECUTING"),
            Self::Executed => write!(f, "EXECUTED"),
            Self::Expired => write!(f, "EXPIRED"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Rejected => write!(f, "REJECTED"),
        }
    }
}
