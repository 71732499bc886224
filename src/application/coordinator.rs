//! # Execution Coordinator
//!
//! Two-phase execution of an RFQ against one quote.
//!
//! Phase one claims exclusivity by moving the RFQ to `Executing`; phase two
//! re-fetches the quote and re-checks its validity at commit time, because
//! the quote may have expired or been replaced between the caller's read
//! and the commit. A failed commit rolls the RFQ back to `Quoted` when
//! other live quotes remain, or to `Expired` when none do.
//!
//! The coordinator runs under the session's lock, so only one execution
//! attempt per RFQ is in flight at a time; a second attempt observes either
//! `Executed` (and gets [`EngineError::AlreadyExecuted`]) or a non-`Quoted`
//! state.

use crate::application::error::{EngineError, EngineResult};
use crate::application::session::RfqSession;
use crate::domain::entities::{ExecutionRecord, Quote};
use crate::domain::events::RfqEventKind;
use crate::domain::value_objects::{QuoteId, RfqState, Timestamp};
use tracing::{debug, warn};

/// Drives the two-phase execute for one session at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecutionCoordinator;

impl ExecutionCoordinator {
    /// Executes the RFQ against the given quote.
    ///
    /// # Errors
    ///
    /// - [`EngineError::AlreadyExecuted`] if the RFQ has already committed.
    /// - [`EngineError::InvalidState`] if the RFQ is not in `Quoted`.
    /// - [`EngineError::QuoteNotFound`] if the quote is not in the book
    ///   (including a quote superseded by a dealer re-quote).
    /// - [`EngineError::QuoteExpired`] if the quote died before commit.
    ///
    /// On a quote failure the RFQ has already fallen back to `Quoted` or
    /// `Expired` by the time the error returns.
    pub fn execute(
        session: &mut RfqSession,
        quote_id: QuoteId,
        now: Timestamp,
    ) -> EngineResult<ExecutionRecord> {
        match session.rfq().state() {
            RfqState::Quoted => {}
            RfqState::Executed => {
                return Err(EngineError::AlreadyExecuted(session.rfq_id()));
            }
            other => return Err(EngineError::InvalidState(other)),
        }

        session.rfq_mut().begin_execution(now)?;
        session.publish_transition(RfqState::Quoted, now);

        match Self::commit_check(session, quote_id, now) {
            Ok(quote) => {
                session.rfq_mut().complete_execution(now)?;
                session.publish_transition(RfqState::Executing, now);

                let record = ExecutionRecord::from_quote(&quote, now);
                session.record_execution(record.clone());
                session.publish(
                    RfqEventKind::Executed {
                        record: record.clone(),
                    },
                    now,
                );
                debug!(
                    rfq_id = %record.rfq_id(),
                    quote_id = %record.quote_id(),
                    dealer_id = %record.dealer_id(),
                    price = %record.price(),
                    "execution committed"
                );
                Ok(record)
            }
            Err(err) => {
                session.book_mut().expire_stale(now);
                let has_live = session.book().has_live(now);
                session.rfq_mut().fail_execution(has_live, now)?;
                session.publish_transition(RfqState::Executing, now);
                warn!(
                    rfq_id = %session.rfq_id(),
                    %quote_id,
                    fallback = %session.rfq().state(),
                    error = %err,
                    "execution commit failed"
                );
                Err(err)
            }
        }
    }

    /// Re-fetches the quote and re-checks validity under the claim.
    fn commit_check(
        session: &RfqSession,
        quote_id: QuoteId,
        now: Timestamp,
    ) -> EngineResult<Quote> {
        let Some(quote) = session.book().get(quote_id) else {
            return Err(EngineError::QuoteNotFound(quote_id));
        };
        if !quote.is_live(now) {
            return Err(EngineError::QuoteExpired(quote_id));
        }
        Ok(quote.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::{Quote, Rfq};
    use crate::domain::value_objects::{DealerId, Instrument, Notional, Price, RfqId, Side};
    use std::time::Duration;

    fn t(secs: i64) -> Timestamp {
        Timestamp::from_secs(secs).unwrap()
    }

    fn quote(rfq_id: RfqId, dealer: &str, price: f64, created: i64, expires: i64) -> Quote {
        Quote::new(
            rfq_id,
            DealerId::new(dealer),
            Price::new(price).unwrap(),
            t(created),
            t(expires),
        )
        .unwrap()
    }

    /// Session in Quoted state holding the given quotes.
    fn quoted_session(quotes: &[(&str, f64, i64, i64)]) -> RfqSession {
        let mut rfq = Rfq::new(
            "EURUSD".parse().unwrap(),
            Side::Buy,
            Notional::new(1_000_000.0).unwrap(),
            Instrument::Spot,
            t(0),
        );
        rfq.accept(t(0), Duration::from_secs(10)).unwrap();
        rfq.mark_quoted(t(1)).unwrap();

        let mut session = RfqSession::new(rfq);
        for (dealer, price, created, expires) in quotes {
            let q = quote(session.rfq_id(), dealer, *price, *created, *expires);
            session.book_mut().insert(q);
        }
        session
    }

    #[test]
    fn happy_path_commits_and_records() {
        let mut session = quoted_session(&[("JPM", 1.1055, 1, 21)]);
        let quote_id = session.book().active(t(2), Side::Buy)[0].id();

        let record = ExecutionCoordinator::execute(&mut session, quote_id, t(2)).unwrap();

        assert_eq!(session.rfq().state(), RfqState::Executed);
        assert_eq!(record.quote_id(), quote_id);
        assert_eq!(record.executed_at(), t(2));
        assert_eq!(session.execution(), Some(&record));
    }

    #[test]
    fn expired_quote_falls_back_to_quoted_when_others_live() {
        let mut session = quoted_session(&[("JPM", 1.1055, 1, 5), ("UBS", 1.1060, 1, 30)]);
        let dying = session
            .book()
            .active(t(2), Side::Buy)
            .iter()
            .find(|q| q.dealer_id().as_str() == "JPM")
            .unwrap()
            .id();

        // JPM's quote is dead at t=10, UBS's is still live.
        let err = ExecutionCoordinator::execute(&mut session, dying, t(10)).unwrap_err();
        assert_eq!(err, EngineError::QuoteExpired(dying));
        assert_eq!(session.rfq().state(), RfqState::Quoted);
        assert_eq!(session.book().len(), 1);
    }

    #[test]
    fn expired_quote_expires_rfq_when_book_is_dead() {
        let mut session = quoted_session(&[("JPM", 1.1055, 1, 5)]);
        let dying = session.book().active(t(2), Side::Buy)[0].id();

        let err = ExecutionCoordinator::execute(&mut session, dying, t(10)).unwrap_err();
        assert_eq!(err, EngineError::QuoteExpired(dying));
        assert_eq!(session.rfq().state(), RfqState::Expired);
    }

    #[test]
    fn unknown_quote_is_not_found() {
        let mut session = quoted_session(&[("JPM", 1.1055, 1, 21)]);
        let missing = QuoteId::new_v4();

        let err = ExecutionCoordinator::execute(&mut session, missing, t(2)).unwrap_err();
        assert_eq!(err, EngineError::QuoteNotFound(missing));
        assert_eq!(session.rfq().state(), RfqState::Quoted);
    }

    #[test]
    fn execute_before_any_quote_is_invalid_state() {
        let mut rfq = Rfq::new(
            "EURUSD".parse().unwrap(),
            Side::Buy,
            Notional::new(1_000_000.0).unwrap(),
            Instrument::Spot,
            t(0),
        );
        rfq.accept(t(0), Duration::from_secs(10)).unwrap();
        let mut session = RfqSession::new(rfq);

        let err =
            ExecutionCoordinator::execute(&mut session, QuoteId::new_v4(), t(1)).unwrap_err();
        assert_eq!(err, EngineError::InvalidState(RfqState::Quoting));
    }

    #[test]
    fn second_execute_is_already_executed() {
        let mut session = quoted_session(&[("JPM", 1.1055, 1, 21)]);
        let quote_id = session.book().active(t(2), Side::Buy)[0].id();
        ExecutionCoordinator::execute(&mut session, quote_id, t(2)).unwrap();

        let err = ExecutionCoordinator::execute(&mut session, quote_id, t(3)).unwrap_err();
        assert_eq!(err, EngineError::AlreadyExecuted(session.rfq_id()));
        // First execution record is untouched.
        assert_eq!(session.execution().unwrap().executed_at(), t(2));
    }

    #[test]
    fn failed_commit_publishes_fallback_transition() {
        let mut session = quoted_session(&[("JPM", 1.1055, 1, 5)]);
        let dying = session.book().active(t(2), Side::Buy)[0].id();
        let mut rx = session.subscribe();

        let _ = ExecutionCoordinator::execute(&mut session, dying, t(10));

        // Quoted -> Executing, then Executing -> Expired.
        let first = rx.try_recv().unwrap();
        assert!(matches!(
            first.kind,
            RfqEventKind::StateChanged {
                from: RfqState::Quoted,
                to: RfqState::Executing,
            }
        ));
        let second = rx.try_recv().unwrap();
        assert!(matches!(
            second.kind,
            RfqEventKind::StateChanged {
                from: RfqState::Executing,
                to: RfqState::Expired,
            }
        ));
    }
}
