//! # Domain Events
//!
//! Events emitted as an RFQ moves through its lifecycle. Every event carries
//! [`EventMetadata`] identifying which RFQ it belongs to and when it
//! occurred; subscribers to one RFQ observe its events in causal order.

use crate::domain::entities::{ExecutionRecord, Quote};
use crate::domain::value_objects::{DealerId, EventId, QuoteId, RfqId, RfqState, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Metadata common to every lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique identifier for this event.
    pub event_id: EventId,
    /// The RFQ this event belongs to.
    pub rfq_id: RfqId,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}

impl EventMetadata {
    /// Creates metadata for an event on an RFQ.
    #[must_use]
    pub fn new(rfq_id: RfqId, occurred_at: Timestamp) -> Self {
        Self {
            event_id: EventId::new_v4(),
            rfq_id,
            occurred_at,
        }
    }
}

/// A lifecycle event on one RFQ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RfqEvent {
    /// Event identity and ordering metadata.
    pub metadata: EventMetadata,
    /// What happened.
    pub kind: RfqEventKind,
}

impl RfqEvent {
    /// Creates an event for an RFQ at a point in time.
    #[must_use]
    pub fn new(rfq_id: RfqId, occurred_at: Timestamp, kind: RfqEventKind) -> Self {
        Self {
            metadata: EventMetadata::new(rfq_id, occurred_at),
            kind,
        }
    }

    /// Returns the RFQ this event belongs to.
    #[inline]
    #[must_use]
    pub const fn rfq_id(&self) -> RfqId {
        self.metadata.rfq_id
    }
}

/// The payload of a lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RfqEventKind {
    /// The RFQ was validated and accepted into quoting.
    Created,
    /// The RFQ moved between lifecycle states.
    StateChanged {
        /// State before the transition.
        from: RfqState,
        /// State after the transition.
        to: RfqState,
    },
    /// A dealer quote entered the book.
    QuoteReceived {
        /// The accepted quote.
        quote: Quote,
    },
    /// A dealer re-quoted, superseding its outstanding quote.
    QuoteReplaced {
        /// The dealer that re-quoted.
        dealer_id: DealerId,
        /// The quote that was superseded.
        superseded: QuoteId,
        /// The quote that replaced it.
        replacement: QuoteId,
    },
    /// The RFQ committed against a quote.
    Executed {
        /// The committed execution terms.
        record: ExecutionRecord,
    },
}

impl fmt::Display for RfqEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "CREATED"),
            Self::StateChanged { from, to } => write!(f, "STATE_CHANGED {from} -> {to}"),
            Self::QuoteReceived { quote } => write!(f, "QUOTE_RECEIVED {}", quote.id()),
            Self::QuoteReplaced { superseded, .. } => {
                write!(f, "QUOTE_REPLACED {superseded}")
            }
            Self::Executed { record } => write!(f, "EXECUTED {}", record.quote_id()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Price;

    fn t(secs: i64) -> Timestamp {
        Timestamp::from_secs(secs).unwrap()
    }

    #[test]
    fn event_carries_rfq_id() {
        let rfq_id = RfqId::new_v4();
        let event = RfqEvent::new(rfq_id, t(0), RfqEventKind::Created);
        assert_eq!(event.rfq_id(), rfq_id);
        assert_eq!(event.metadata.occurred_at, t(0));
    }

    #[test]
    fn state_changed_serializes_with_tag() {
        let event = RfqEvent::new(
            RfqId::new_v4(),
            t(1),
            RfqEventKind::StateChanged {
                from: RfqState::Quoting,
                to: RfqState::Quoted,
            },
        );
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event_type\":\"STATE_CHANGED\""));
        assert!(json.contains("\"from\":\"QUOTING\""));

        let back: RfqEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn quote_received_roundtrip() {
        let rfq_id = RfqId::new_v4();
        let quote = Quote::new(
            rfq_id,
            DealerId::new("JPM"),
            Price::new(1.1055).unwrap(),
            t(0),
            t(20),
        )
        .unwrap();
        let event = RfqEvent::new(rfq_id, t(0), RfqEventKind::QuoteReceived { quote });

        let json = serde_json::to_string(&event).unwrap();
        let back: RfqEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn display_names_the_kind() {
        let kind = RfqEventKind::StateChanged {
            from: RfqState::Draft,
            to: RfqState::Quoting,
        };
        assert_eq!(kind.to_string(), "STATE_CHANGED DRAFT -> QUOTING");
    }
}
