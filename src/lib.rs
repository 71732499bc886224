//! # fx-rfq
//!
//! An FX request-for-quote engine: validates incoming RFQ requests against
//! per-instrument rules, drives each RFQ through its lifecycle state
//! machine, aggregates competing dealer quotes into a per-RFQ book, and
//! executes with a two-phase commit that re-checks quote validity at the
//! moment of execution.
//!
//! ## Architecture
//!
//! Two layers, domain-driven:
//!
//! - [`domain`] — pure business logic. Value objects, the RFQ aggregate and
//!   its state machine, the quote book, lifecycle events, and request
//!   validation. Time is always an explicit argument; nothing here does I/O.
//! - [`application`] — orchestration. The session manager owns one session
//!   per RFQ behind a per-RFQ lock, routes quotes, serves reads, runs the
//!   sweeper, and drives executions through the coordinator.
//!
//! ## Lifecycle
//!
//! ```text
//! Draft → Quoting → Quoted → Executing → Executed
//!            ↓        ↑↓         ↓
//!            └────────┴──────────┴→ Expired / Cancelled / Rejected
//! ```
//!
//! Terminal states are absorbing: late quotes and duplicate commands are
//! logged and dropped without mutating anything.
//!
//! ## Example
//!
//! ```
//! use fx_rfq::application::{EngineConfig, RfqSessionManager};
//! use fx_rfq::domain::validation::RfqRequest;
//! use fx_rfq::domain::value_objects::{InstrumentType, Side, Timestamp};
//!
//! # tokio_test::block_on(async {
//! let manager = RfqSessionManager::new(EngineConfig::default());
//! let now = Timestamp::now();
//!
//! let request = RfqRequest::new("EURUSD", Side::Buy, 1_000_000.0, InstrumentType::Spot);
//! let rfq_id = manager.create_session(&request, now).unwrap();
//!
//! manager.route_quote(rfq_id, "JPM".into(), 1.10550, now).await;
//! manager.route_quote(rfq_id, "UBS".into(), 1.10480, now).await;
//!
//! // Buy side: lowest price ranks best.
//! let best = manager.active_quotes(rfq_id, now).await.unwrap()[0].clone();
//! let record = manager.execute(rfq_id, best.id(), now).await.unwrap();
//! assert_eq!(record.dealer_id().as_str(), "UBS");
//! # });
//! ```

pub mod application;
pub mod domain;
