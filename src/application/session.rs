//! # RFQ Session
//!
//! One session bundles everything the engine tracks for a single RFQ: the
//! lifecycle aggregate, its quote book, the execution record once one
//! exists, and a broadcast channel carrying the RFQ's event stream.
//!
//! Sessions are always driven under their manager's per-RFQ lock, so every
//! mutation and every event publication for one RFQ is serialized. That is
//! what gives subscribers a causally ordered stream without any global
//! ordering machinery.

use crate::domain::entities::{ExecutionRecord, Quote, QuoteBook, Rfq};
use crate::domain::events::{RfqEvent, RfqEventKind};
use crate::domain::value_objects::{RfqId, RfqState, Timestamp};
use tokio::sync::broadcast;

/// Buffered events per subscriber before lagging kicks in.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// All engine-side state for one RFQ.
#[derive(Debug)]
pub struct RfqSession {
    rfq: Rfq,
    book: QuoteBook,
    execution: Option<ExecutionRecord>,
    events: broadcast::Sender<RfqEvent>,
}

impl RfqSession {
    /// Creates a session around a freshly accepted RFQ.
    #[must_use]
    pub fn new(rfq: Rfq) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let book = QuoteBook::new(rfq.id());
        Self {
            rfq,
            book,
            execution: None,
            events,
        }
    }

    /// Returns the session's RFQ id.
    #[inline]
    #[must_use]
    pub const fn rfq_id(&self) -> RfqId {
        self.rfq.id()
    }

    /// Returns the lifecycle aggregate.
    #[inline]
    #[must_use]
    pub const fn rfq(&self) -> &Rfq {
        &self.rfq
    }

    /// Returns the lifecycle aggregate mutably.
    #[inline]
    pub fn rfq_mut(&mut self) -> &mut Rfq {
        &mut self.rfq
    }

    /// Returns the quote book.
    #[inline]
    #[must_use]
    pub const fn book(&self) -> &QuoteBook {
        &self.book
    }

    /// Returns the quote book mutably.
    #[inline]
    pub fn book_mut(&mut self) -> &mut QuoteBook {
        &mut self.book
    }

    /// Returns the execution record, once the RFQ has executed.
    #[inline]
    #[must_use]
    pub fn execution(&self) -> Option<&ExecutionRecord> {
        self.execution.as_ref()
    }

    /// Stores the execution record at commit.
    pub fn record_execution(&mut self, record: ExecutionRecord) {
        self.execution = Some(record);
    }

    /// Opens a new subscription to this RFQ's event stream.
    ///
    /// Subscribers receive events published after the subscription opens.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<RfqEvent> {
        self.events.subscribe()
    }

    /// Publishes an event to this RFQ's stream.
    ///
    /// A send with no live subscribers is not an error; the event is simply
    /// unobserved.
    pub fn publish(&self, kind: RfqEventKind, now: Timestamp) {
        let event = RfqEvent::new(self.rfq.id(), now, kind);
        let _ = self.events.send(event);
    }

    /// Publishes a state-change event for a transition that just applied.
    pub fn publish_transition(&self, from: RfqState, now: Timestamp) {
        self.publish(
            RfqEventKind::StateChanged {
                from,
                to: self.rfq.state(),
            },
            now,
        );
    }

    /// Records an incoming quote, publishing the book change.
    ///
    /// Returns the quote replaced by a dealer re-quote, if any.
    pub fn admit_quote(&mut self, quote: Quote, now: Timestamp) -> Option<Quote> {
        let replacement = quote.id();
        let replaced = self.book.insert(quote.clone());
        if let Some(superseded) = &replaced {
            self.publish(
                RfqEventKind::QuoteReplaced {
                    dealer_id: superseded.dealer_id().clone(),
                    superseded: superseded.id(),
                    replacement,
                },
                now,
            );
        }
        self.publish(RfqEventKind::QuoteReceived { quote }, now);
        replaced
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{DealerId, Instrument, Notional, Price, Side};

    fn t(secs: i64) -> Timestamp {
        Timestamp::from_secs(secs).unwrap()
    }

    fn session() -> RfqSession {
        let rfq = Rfq::new(
            "EURUSD".parse().unwrap(),
            Side::Buy,
            Notional::new(1_000_000.0).unwrap(),
            Instrument::Spot,
            t(0),
        );
        RfqSession::new(rfq)
    }

    fn quote(rfq_id: RfqId, dealer: &str, price: f64) -> Quote {
        Quote::new(
            rfq_id,
            DealerId::new(dealer),
            Price::new(price).unwrap(),
            t(1),
            t(21),
        )
        .unwrap()
    }

    #[test]
    fn admit_quote_publishes_received() {
        let mut session = session();
        let mut rx = session.subscribe();

        session.admit_quote(quote(session.rfq_id(), "JPM", 1.1055), t(1));

        let event = rx.try_recv().unwrap();
        assert!(matches!(event.kind, RfqEventKind::QuoteReceived { .. }));
        assert_eq!(event.rfq_id(), session.rfq_id());
    }

    #[test]
    fn requote_publishes_replacement_before_received() {
        let mut session = session();
        let first = quote(session.rfq_id(), "JPM", 1.1055);
        session.admit_quote(first, t(1));

        let mut rx = session.subscribe();
        let replaced = session.admit_quote(quote(session.rfq_id(), "JPM", 1.1050), t(2));
        assert!(replaced.is_some());

        let event = rx.try_recv().unwrap();
        assert!(matches!(event.kind, RfqEventKind::QuoteReplaced { .. }));
        let event = rx.try_recv().unwrap();
        assert!(matches!(event.kind, RfqEventKind::QuoteReceived { .. }));
    }

    #[test]
    fn publish_without_subscribers_is_fine() {
        let session = session();
        session.publish(RfqEventKind::Created, t(0));
    }
}
