//! # RFQ Aggregate Root
//!
//! The RFQ aggregate owns one request's lifecycle state and enforces its
//! valid transitions from creation to terminal outcome.
//!
//! # State Machine
//!
//! ```text
//! Draft → Quoting → Quoted → Executing → Executed
//!   ↓        ↓        ↑↓         ↓
//!   └────────┴────────┴──────────┴→ Expired/Cancelled/Rejected
//! ```
//!
//! Transitions attempted from a terminal state fail with
//! [`DomainError::StaleState`] and mutate nothing, which makes late or
//! duplicate events idempotent drops.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use fx_rfq::domain::entities::rfq::Rfq;
//! use fx_rfq::domain::value_objects::{
//!     CurrencyPair, Instrument, Notional, RfqState, Side, Timestamp,
//! };
//!
//! let now = Timestamp::now();
//! let mut rfq = Rfq::new(
//!     "EURUSD".parse().unwrap(),
//!     Side::Buy,
//!     Notional::new(1_000_000.0).unwrap(),
//!     Instrument::Spot,
//!     now,
//! );
//! rfq.accept(now, Duration::from_secs(10)).unwrap();
//! assert_eq!(rfq.state(), RfqState::Quoting);
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{
    CurrencyPair, Instrument, Notional, RfqId, RfqState, Side, Timestamp,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// RFQ (Request-for-Quote) aggregate root.
///
/// Immutable after creation except for `state`, `updated_at`, `version`,
/// and the rejection reason.
///
/// # Invariants
///
/// - Only transitions permitted by [`RfqState::can_transition_to`] occur.
/// - Terminal states accept no further mutation.
/// - `version` increases by one on every applied mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rfq {
    /// Unique identifier.
    id: RfqId,
    /// Currency pair being traded.
    pair: CurrencyPair,
    /// Buy or sell side.
    side: Side,
    /// Requested notional.
    notional: Notional,
    /// Validated instrument.
    instrument: Instrument,
    /// Current lifecycle state.
    state: RfqState,
    /// Deadline for quoting, fixed on entry into Quoting.
    quoting_deadline: Option<Timestamp>,
    /// Reason for rejection, if rejected.
    rejection_reason: Option<String>,
    /// Version counter, bumped on every applied mutation.
    version: u64,
    /// When this RFQ was created.
    created_at: Timestamp,
    /// When this RFQ was last mutated.
    updated_at: Timestamp,
}

impl Rfq {
    /// Creates a new RFQ in `Draft` state from validated fields.
    #[must_use]
    pub fn new(
        pair: CurrencyPair,
        side: Side,
        notional: Notional,
        instrument: Instrument,
        now: Timestamp,
    ) -> Self {
        Self {
            id: RfqId::new_v4(),
            pair,
            side,
            notional,
            instrument,
            state: RfqState::Draft,
            quoting_deadline: None,
            rejection_reason: None,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    fn transition_to(&mut self, target: RfqState, now: Timestamp) -> DomainResult<()> {
        if self.state.is_terminal() {
            return Err(DomainError::StaleState { state: self.state });
        }
        if !self.state.can_transition_to(target) {
            return Err(DomainError::InvalidTransition {
                from: self.state,
                to: target,
            });
        }
        self.state = target;
        self.updated_at = now;
        self.version = self.version.saturating_add(1);
        Ok(())
    }

    // ========== Accessors ==========

    /// Returns the RFQ ID.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> RfqId {
        self.id
    }

    /// Returns the currency pair.
    #[inline]
    #[must_use]
    pub const fn pair(&self) -> &CurrencyPair {
        &self.pair
    }

    /// Returns the order side.
    #[inline]
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Returns the notional.
    #[inline]
    #[must_use]
    pub const fn notional(&self) -> Notional {
        self.notional
    }

    /// Returns the instrument.
    #[inline]
    #[must_use]
    pub const fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    /// Returns the current state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> RfqState {
        self.state
    }

    /// Returns the quoting deadline, set once the RFQ enters Quoting.
    #[inline]
    #[must_use]
    pub const fn quoting_deadline(&self) -> Option<Timestamp> {
        self.quoting_deadline
    }

    /// Returns the rejection reason, if rejected.
    #[inline]
    #[must_use]
    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    /// Returns the version counter.
    #[inline]
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns when this RFQ was created.
    #[inline]
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns when this RFQ was last mutated.
    #[inline]
    #[must_use]
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    // ========== State Helpers ==========

    /// Returns true if this RFQ is in a terminal state.
    #[inline]
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Returns true if the quoting deadline has passed at `now`.
    ///
    /// Always false before the RFQ has been accepted into Quoting.
    #[must_use]
    pub fn is_past_deadline(&self, now: Timestamp) -> bool {
        self.quoting_deadline
            .is_some_and(|deadline| !deadline.is_after(&now))
    }

    // ========== State Transitions ==========

    /// Accepts the RFQ into quoting and fixes its quoting deadline.
    ///
    /// Transitions: Draft → Quoting.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` if not in Draft, or
    /// `DomainError::StaleState` if already terminal.
    pub fn accept(&mut self, now: Timestamp, quoting_deadline: Duration) -> DomainResult<()> {
        self.transition_to(RfqState::Quoting, now)?;
        self.quoting_deadline = Some(now.add_duration(quoting_deadline));
        Ok(())
    }

    /// Records that the first live quote has arrived.
    ///
    /// Transitions: Quoting → Quoted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` if not in Quoting, or
    /// `DomainError::StaleState` if already terminal.
    pub fn mark_quoted(&mut self, now: Timestamp) -> DomainResult<()> {
        self.transition_to(RfqState::Quoted, now)
    }

    /// Claims execution exclusivity ahead of the commit check.
    ///
    /// Transitions: Quoted → Executing.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` if not in Quoted, or
    /// `DomainError::StaleState` if already terminal.
    pub fn begin_execution(&mut self, now: Timestamp) -> DomainResult<()> {
        self.transition_to(RfqState::Executing, now)
    }

    /// Commits the execution.
    ///
    /// Transitions: Executing → Executed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` if not in Executing, or
    /// `DomainError::StaleState` if already terminal.
    pub fn complete_execution(&mut self, now: Timestamp) -> DomainResult<()> {
        self.transition_to(RfqState::Executed, now)
    }

    /// Rolls back a failed commit.
    ///
    /// Transitions: Executing → Quoted when another live quote remains,
    /// Executing → Expired otherwise.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` if not in Executing, or
    /// `DomainError::StaleState` if already terminal.
    pub fn fail_execution(&mut self, has_live_quotes: bool, now: Timestamp) -> DomainResult<()> {
        let target = if has_live_quotes {
            RfqState::Quoted
        } else {
            RfqState::Expired
        };
        self.transition_to(target, now)
    }

    /// Expires the RFQ after its quoting deadline elapsed.
    ///
    /// Transitions: Quoting/Quoted → Expired.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` if the current state cannot
    /// expire, or `DomainError::StaleState` if already terminal.
    pub fn expire(&mut self, now: Timestamp) -> DomainResult<()> {
        self.transition_to(RfqState::Expired, now)
    }

    /// Cancels the RFQ at the caller's request.
    ///
    /// Transitions: any non-terminal → Cancelled.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StaleState` if already terminal.
    pub fn cancel(&mut self, now: Timestamp) -> DomainResult<()> {
        self.transition_to(RfqState::Cancelled, now)
    }

    /// Rejects the RFQ with a reason.
    ///
    /// Transitions: any non-terminal → Rejected.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StaleState` if already terminal.
    pub fn reject(&mut self, reason: impl Into<String>, now: Timestamp) -> DomainResult<()> {
        self.transition_to(RfqState::Rejected, now)?;
        self.rejection_reason = Some(reason.into());
        Ok(())
    }
}

impl fmt::Display for Rfq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RFQ({} {} {} {} [{}])",
            self.id, self.side, self.notional, self.pair, self.state
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn t(secs: i64) -> Timestamp {
        Timestamp::from_secs(secs).unwrap()
    }

    fn deadline() -> Duration {
        Duration::from_secs(10)
    }

    fn draft_rfq() -> Rfq {
        Rfq::new(
            "EURUSD".parse().unwrap(),
            Side::Buy,
            Notional::new(1_000_000.0).unwrap(),
            Instrument::Spot,
            t(0),
        )
    }

    fn quoting_rfq() -> Rfq {
        let mut rfq = draft_rfq();
        rfq.accept(t(0), deadline()).unwrap();
        rfq
    }

    fn quoted_rfq() -> Rfq {
        let mut rfq = quoting_rfq();
        rfq.mark_quoted(t(1)).unwrap();
        rfq
    }

    mod construction {
        use super::*;

        #[test]
        fn new_starts_in_draft() {
            let rfq = draft_rfq();
            assert_eq!(rfq.state(), RfqState::Draft);
            assert_eq!(rfq.version(), 1);
            assert!(rfq.quoting_deadline().is_none());
            assert!(!rfq.is_terminal());
        }
    }

    mod transitions {
        use super::*;

        #[test]
        fn accept_sets_deadline() {
            let mut rfq = draft_rfq();
            rfq.accept(t(0), deadline()).unwrap();

            assert_eq!(rfq.state(), RfqState::Quoting);
            assert_eq!(rfq.quoting_deadline(), Some(t(10)));
            assert_eq!(rfq.version(), 2);
        }

        #[test]
        fn full_happy_path() {
            let mut rfq = quoted_rfq();
            rfq.begin_execution(t(5)).unwrap();
            assert_eq!(rfq.state(), RfqState::Executing);

            rfq.complete_execution(t(5)).unwrap();
            assert_eq!(rfq.state(), RfqState::Executed);
            assert!(rfq.is_terminal());
        }

        #[test]
        fn begin_execution_requires_quoted() {
            let mut rfq = quoting_rfq();
            let result = rfq.begin_execution(t(5));
            assert!(matches!(
                result,
                Err(DomainError::InvalidTransition { .. })
            ));
        }

        #[test]
        fn fail_execution_falls_back_to_quoted_with_live_quotes() {
            let mut rfq = quoted_rfq();
            rfq.begin_execution(t(5)).unwrap();
            rfq.fail_execution(true, t(6)).unwrap();
            assert_eq!(rfq.state(), RfqState::Quoted);
        }

        #[test]
        fn fail_execution_expires_without_live_quotes() {
            let mut rfq = quoted_rfq();
            rfq.begin_execution(t(5)).unwrap();
            rfq.fail_execution(false, t(6)).unwrap();
            assert_eq!(rfq.state(), RfqState::Expired);
        }

        #[test]
        fn expire_from_quoting_and_quoted() {
            let mut rfq = quoting_rfq();
            rfq.expire(t(11)).unwrap();
            assert_eq!(rfq.state(), RfqState::Expired);

            let mut rfq = quoted_rfq();
            rfq.expire(t(11)).unwrap();
            assert_eq!(rfq.state(), RfqState::Expired);
        }

        #[test]
        fn cancel_from_any_non_terminal() {
            let mut rfq = draft_rfq();
            rfq.cancel(t(1)).unwrap();
            assert_eq!(rfq.state(), RfqState::Cancelled);

            let mut rfq = quoted_rfq();
            rfq.cancel(t(1)).unwrap();
            assert_eq!(rfq.state(), RfqState::Cancelled);
        }

        #[test]
        fn reject_records_reason() {
            let mut rfq = quoting_rfq();
            rfq.reject("no dealer responded", t(30)).unwrap();
            assert_eq!(rfq.state(), RfqState::Rejected);
            assert_eq!(rfq.rejection_reason(), Some("no dealer responded"));
        }
    }

    mod terminal_idempotence {
        use super::*;

        #[test]
        fn executed_drops_all_further_events() {
            let mut rfq = quoted_rfq();
            rfq.begin_execution(t(5)).unwrap();
            rfq.complete_execution(t(5)).unwrap();
            let version = rfq.version();

            for result in [
                rfq.mark_quoted(t(6)),
                rfq.cancel(t(6)),
                rfq.expire(t(6)),
                rfq.reject("late", t(6)),
            ] {
                assert!(matches!(result, Err(DomainError::StaleState { .. })));
            }
            assert_eq!(rfq.state(), RfqState::Executed);
            assert_eq!(rfq.version(), version);
            assert!(rfq.rejection_reason().is_none());
        }

        #[test]
        fn cancelled_is_terminal() {
            let mut rfq = quoting_rfq();
            rfq.cancel(t(2)).unwrap();
            assert!(matches!(
                rfq.mark_quoted(t(3)),
                Err(DomainError::StaleState { .. })
            ));
        }
    }

    mod deadline {
        use super::*;

        #[test]
        fn not_past_deadline_before_accept() {
            let rfq = draft_rfq();
            assert!(!rfq.is_past_deadline(t(1_000)));
        }

        #[test]
        fn deadline_boundary_is_inclusive() {
            let rfq = quoting_rfq();
            assert!(!rfq.is_past_deadline(t(9)));
            assert!(rfq.is_past_deadline(t(10)));
            assert!(rfq.is_past_deadline(t(11)));
        }
    }

    mod version {
        use super::*;

        #[test]
        fn version_increments_per_applied_transition() {
            let mut rfq = draft_rfq();
            assert_eq!(rfq.version(), 1);
            rfq.accept(t(0), deadline()).unwrap();
            assert_eq!(rfq.version(), 2);
            rfq.mark_quoted(t(1)).unwrap();
            assert_eq!(rfq.version(), 3);
        }

        #[test]
        fn rejected_transition_leaves_version() {
            let mut rfq = draft_rfq();
            let _ = rfq.mark_quoted(t(1));
            assert_eq!(rfq.version(), 1);
        }
    }

    mod display {
        use super::*;

        #[test]
        fn display_format() {
            let rfq = draft_rfq();
            let display = rfq.to_string();
            assert!(display.contains("RFQ"));
            assert!(display.contains("BUY"));
            assert!(display.contains("EURUSD"));
            assert!(display.contains("DRAFT"));
        }
    }

    mod serde {
        use super::*;

        #[test]
        fn serde_roundtrip() {
            let rfq = quoted_rfq();
            let json = serde_json::to_string(&rfq).unwrap();
            let deserialized: Rfq = serde_json::from_str(&json).unwrap();
            assert_eq!(rfq, deserialized);
        }
    }
}
