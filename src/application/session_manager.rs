//! # RFQ Session Manager
//!
//! The engine's front door. Owns every live RFQ session, routes inbound
//! dealer quotes, drives executions and cancellations, serves reads, and
//! runs the periodic sweep that expires deadlines and evicts finished
//! sessions.
//!
//! # Concurrency Model
//!
//! Sessions live in a [`DashMap`] keyed by RFQ id; each entry is an
//! `Arc<Mutex<RfqSession>>`. Every mutation for one RFQ happens under that
//! session's `tokio::sync::Mutex`, so one RFQ is a single logical owner
//! while distinct RFQs proceed fully in parallel. Map guards are never held
//! across an `.await`.
//!
//! # Examples
//!
//! ```
//! use fx_rfq::application::config::EngineConfig;
//! use fx_rfq::application::session_manager::RfqSessionManager;
//! use fx_rfq::domain::validation::RfqRequest;
//! use fx_rfq::domain::value_objects::{InstrumentType, Side, Timestamp};
//!
//! # tokio_test::block_on(async {
//! let manager = RfqSessionManager::new(EngineConfig::default());
//! let now = Timestamp::now();
//! let request = RfqRequest::new("EURUSD", Side::Buy, 1_000_000.0, InstrumentType::Spot);
//! let rfq_id = manager.create_session(&request, now).unwrap();
//!
//! manager.route_quote(rfq_id, "JPM".into(), 1.10550, now).await;
//! assert_eq!(manager.active_quotes(rfq_id, now).await.unwrap().len(), 1);
//! # });
//! ```

use crate::application::config::EngineConfig;
use crate::application::coordinator::ExecutionCoordinator;
use crate::application::error::{EngineError, EngineResult};
use crate::application::session::RfqSession;
use crate::domain::entities::{ExecutionRecord, Quote, Rfq};
use crate::domain::events::{RfqEvent, RfqEventKind};
use crate::domain::validation::{self, RfqRequest};
use crate::domain::value_objects::{DealerId, Price, QuoteId, RfqId, RfqState, Timestamp};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, info, warn};

/// What one sweep pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// RFQs expired for missing their quoting deadline.
    pub rfqs_expired: usize,
    /// Dead quotes physically removed from books.
    pub quotes_pruned: usize,
    /// Terminal sessions evicted past the retention window.
    pub sessions_evicted: usize,
    /// Sessions force-rejected after an internal invariant violation.
    pub sessions_rejected: usize,
}

/// Owns all live RFQ sessions and the operations on them.
#[derive(Debug)]
pub struct RfqSessionManager {
    sessions: DashMap<RfqId, Arc<Mutex<RfqSession>>>,
    config: EngineConfig,
}

impl RfqSessionManager {
    /// Creates an empty manager with the given configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            sessions: DashMap::new(),
            config,
        }
    }

    /// Returns the engine configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the number of sessions currently held, live or terminal.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn session(&self, rfq_id: RfqId) -> Option<Arc<Mutex<RfqSession>>> {
        self.sessions.get(&rfq_id).map(|entry| Arc::clone(entry.value()))
    }

    /// Validates a request and opens a quoting session for it.
    ///
    /// The RFQ enters `Quoting` immediately with its deadline fixed at
    /// `now + quoting_deadline`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Validation` naming the first bad field.
    pub fn create_session(&self, request: &RfqRequest, now: Timestamp) -> EngineResult<RfqId> {
        let validated = validation::validate(request)?;
        let mut rfq = Rfq::new(
            validated.pair,
            validated.side,
            validated.notional,
            validated.instrument,
            now,
        );
        rfq.accept(now, self.config.quoting_deadline)?;

        let rfq_id = rfq.id();
        info!(
            %rfq_id,
            pair = %rfq.pair(),
            side = %rfq.side(),
            notional = %rfq.notional(),
            instrument = %rfq.instrument().instrument_type(),
            "rfq accepted into quoting"
        );

        let session = RfqSession::new(rfq);
        session.publish(RfqEventKind::Created, now);
        session.publish_transition(RfqState::Draft, now);
        self.sessions.insert(rfq_id, Arc::new(Mutex::new(session)));
        Ok(rfq_id)
    }

    /// Routes an inbound dealer quote to its RFQ.
    ///
    /// Inbound quotes never fail loudly: a quote for an unknown RFQ (a race
    /// with eviction), a terminal RFQ, or with a malformed price is logged
    /// and dropped, leaving all state untouched. The first quote on a
    /// `Quoting` RFQ drives it to `Quoted`, with the state change published
    /// after the quote event.
    pub async fn route_quote(
        &self,
        rfq_id: RfqId,
        dealer_id: DealerId,
        price: f64,
        now: Timestamp,
    ) {
        let Some(session) = self.session(rfq_id) else {
            debug!(%rfq_id, %dealer_id, "quote for unknown rfq dropped");
            return;
        };

        let price = match Price::new(price) {
            Ok(p) => p,
            Err(err) => {
                warn!(%rfq_id, %dealer_id, error = %err, "malformed quote dropped");
                return;
            }
        };

        let mut session = session.lock().await;
        let state = session.rfq().state();
        if state.is_terminal() {
            warn!(%rfq_id, %dealer_id, %state, "quote for terminal rfq dropped as stale");
            return;
        }

        let valid_until = now.add_duration(self.config.quote_ttl);
        let quote = match Quote::new(rfq_id, dealer_id.clone(), price, now, valid_until) {
            Ok(q) => q,
            Err(err) => {
                warn!(%rfq_id, %dealer_id, error = %err, "malformed quote dropped");
                return;
            }
        };

        let quote_id = quote.id();
        let replaced = session.admit_quote(quote, now);
        debug!(
            %rfq_id,
            %dealer_id,
            %quote_id,
            %price,
            replaced = replaced.is_some(),
            "quote admitted"
        );

        if state == RfqState::Quoting {
            // First live quote; transition published after the quote event.
            if session.rfq_mut().mark_quoted(now).is_ok() {
                session.publish_transition(RfqState::Quoting, now);
                info!(%rfq_id, "rfq quoted");
            }
        }
    }

    /// Executes an RFQ against one of its quotes.
    ///
    /// # Errors
    ///
    /// `EngineError::NotFound` for an unknown RFQ; otherwise whatever the
    /// two-phase commit in [`ExecutionCoordinator`] returns.
    pub async fn execute(
        &self,
        rfq_id: RfqId,
        quote_id: QuoteId,
        now: Timestamp,
    ) -> EngineResult<ExecutionRecord> {
        let session = self.session(rfq_id).ok_or(EngineError::NotFound(rfq_id))?;
        let mut session = session.lock().await;
        let record = ExecutionCoordinator::execute(&mut session, quote_id, now)?;
        info!(
            %rfq_id,
            %quote_id,
            dealer_id = %record.dealer_id(),
            price = %record.price(),
            "rfq executed"
        );
        Ok(record)
    }

    /// Cancels a non-terminal RFQ.
    ///
    /// # Errors
    ///
    /// `EngineError::NotFound` for an unknown RFQ, `EngineError::InvalidState`
    /// if the RFQ is already terminal.
    pub async fn cancel(&self, rfq_id: RfqId, now: Timestamp) -> EngineResult<()> {
        let session = self.session(rfq_id).ok_or(EngineError::NotFound(rfq_id))?;
        let mut session = session.lock().await;

        let from = session.rfq().state();
        match session.rfq_mut().cancel(now) {
            Ok(()) => {
                session.publish_transition(from, now);
                info!(%rfq_id, %from, "rfq cancelled");
                Ok(())
            }
            Err(err) if err.is_stale() => Err(EngineError::InvalidState(from)),
            Err(err) => Err(err.into()),
        }
    }

    /// Returns a snapshot of the RFQ aggregate.
    ///
    /// # Errors
    ///
    /// `EngineError::NotFound` for an unknown RFQ.
    pub async fn status(&self, rfq_id: RfqId) -> EngineResult<Rfq> {
        let session = self.session(rfq_id).ok_or(EngineError::NotFound(rfq_id))?;
        let session = session.lock().await;
        Ok(session.rfq().clone())
    }

    /// Returns the RFQ's live quotes at `now`, best-for-side first.
    ///
    /// # Errors
    ///
    /// `EngineError::NotFound` for an unknown RFQ.
    pub async fn active_quotes(&self, rfq_id: RfqId, now: Timestamp) -> EngineResult<Vec<Quote>> {
        let session = self.session(rfq_id).ok_or(EngineError::NotFound(rfq_id))?;
        let session = session.lock().await;
        let side = session.rfq().side();
        Ok(session
            .book()
            .active(now, side)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Returns the execution record, if the RFQ has executed.
    ///
    /// # Errors
    ///
    /// `EngineError::NotFound` for an unknown RFQ.
    pub async fn execution(&self, rfq_id: RfqId) -> EngineResult<Option<ExecutionRecord>> {
        let session = self.session(rfq_id).ok_or(EngineError::NotFound(rfq_id))?;
        let session = session.lock().await;
        Ok(session.execution().cloned())
    }

    /// Subscribes to an RFQ's event stream.
    ///
    /// Events for one RFQ arrive in causal order. Returns `None` for an
    /// unknown RFQ.
    pub async fn subscribe(&self, rfq_id: RfqId) -> Option<broadcast::Receiver<RfqEvent>> {
        let session = self.session(rfq_id)?;
        let session = session.lock().await;
        Some(session.subscribe())
    }

    /// Subscribes to an RFQ's event stream as a [`Stream`].
    ///
    /// Stream items are `Err` only when the subscriber lagged behind the
    /// channel's buffer. Returns `None` for an unknown RFQ.
    ///
    /// [`Stream`]: futures::Stream
    pub async fn event_stream(&self, rfq_id: RfqId) -> Option<BroadcastStream<RfqEvent>> {
        Some(BroadcastStream::new(self.subscribe(rfq_id).await?))
    }

    /// Runs one sweep pass at `now`.
    ///
    /// Expires RFQs past their quoting deadline, prunes dead quotes from
    /// books, and evicts terminal sessions older than the retention window.
    /// A session whose bookkeeping violates its own invariants is
    /// force-rejected and evicted rather than crashing the sweep.
    pub async fn sweep(&self, now: Timestamp) -> SweepReport {
        let mut report = SweepReport::default();

        // Snapshot so no map guard is held across an await.
        let snapshot: Vec<(RfqId, Arc<Mutex<RfqSession>>)> = self
            .sessions
            .iter()
            .map(|entry| (*entry.key(), Arc::clone(entry.value())))
            .collect();

        let mut evict = Vec::new();
        for (rfq_id, session) in snapshot {
            let mut session = session.lock().await;

            report.quotes_pruned += session.book_mut().expire_stale(now);

            let state = session.rfq().state();
            if matches!(state, RfqState::Quoting | RfqState::Quoted)
                && session.rfq().is_past_deadline(now)
            {
                match session.rfq_mut().expire(now) {
                    Ok(()) => {
                        session.publish_transition(state, now);
                        report.rfqs_expired += 1;
                        info!(%rfq_id, from = %state, "rfq expired past quoting deadline");
                    }
                    Err(err) => {
                        // Bookkeeping no longer matches the state machine.
                        warn!(%rfq_id, %state, error = %err, "force-rejecting inconsistent session");
                        if session.rfq_mut().reject("internal inconsistency", now).is_ok() {
                            session.publish_transition(state, now);
                        }
                        report.sessions_rejected += 1;
                        evict.push(rfq_id);
                        continue;
                    }
                }
            }

            if session.rfq().is_terminal() {
                let idle = now.duration_since(&session.rfq().updated_at());
                if idle >= self.config.retention {
                    evict.push(rfq_id);
                }
            }
        }

        for rfq_id in evict {
            if self.sessions.remove(&rfq_id).is_some() {
                report.sessions_evicted += 1;
                info!(%rfq_id, "session evicted");
            }
        }
        report
    }

    /// Spawns the periodic sweeper task.
    ///
    /// Ticks at the configured sweep interval until the handle is aborted.
    /// The timer is a scheduling point, not a preemption: expiry only ever
    /// happens inside a sweep pass, under the session locks.
    pub fn run_sweeper(self: &Arc<Self>) -> JoinHandle<()> {
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(manager.config.sweep_interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let report = manager.sweep(Timestamp::now()).await;
                if report != SweepReport::default() {
                    debug!(
                        rfqs_expired = report.rfqs_expired,
                        quotes_pruned = report.quotes_pruned,
                        sessions_evicted = report.sessions_evicted,
                        "sweep pass"
                    );
                }
            }
        })
    }
}
